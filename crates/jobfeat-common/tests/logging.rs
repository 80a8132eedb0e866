//! Tests for subscriber installation.
//!
//! A global subscriber can only be installed once per process, so this file
//! holds a single test.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use jobfeat_common::logging::{LogConfig, LogFormat, init_logging_with_writer};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    fn contents(&self) -> String {
        String::from_utf8(self.buffer.lock().unwrap().clone()).unwrap()
    }
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn json_events_reach_the_writer() {
    let writer = BufferWriter::default();
    let config = LogConfig::default()
        .with_level(Level::DEBUG)
        .with_format(LogFormat::Json)
        .with_ansi(false);
    init_logging_with_writer(&config, writer.clone());

    tracing::debug!(target: "jobfeat_transform", stage = "drop_na", dropped = 3, "dropped rows");
    tracing::trace!(target: "jobfeat_transform", "below configured level");

    let output = writer.contents();
    assert!(output.contains("dropped rows"), "output: {output}");
    assert!(output.contains("\"dropped\":3"), "output: {output}");
    assert!(!output.contains("below configured level"));
}
