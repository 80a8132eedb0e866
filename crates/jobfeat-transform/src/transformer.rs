//! The fit/transform seam shared by all stages.
//!
//! Every stage implements [`Transformer`]. [`Stage`] is the closed set of
//! stages as a tagged enum, so an orchestrator can hold a heterogeneous
//! sequence without boxing.
//!
//! # Example
//!
//! ```ignore
//! use jobfeat_transform::{DropCols, Stage, Transformer};
//!
//! let stage = Stage::from(DropCols::new(["Queue"]));
//! let output = stage.fit(&df).transform(&mut df)?;
//! ```

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::stages::{
    AssignJobs, CalculateFeatures, CategoricalEncoder, ColumnSelector, DateTimeConverter,
    DropCols, DropNa, Lookup,
};

/// Two-phase preprocessing contract.
///
/// `fit` learns nothing: every stage derives what it needs from the frame
/// passed to `transform`. It exists so stages slot into fit-then-transform
/// orchestration.
pub trait Transformer: Send + Sync {
    /// Stable snake_case stage name, also used as the configuration tag.
    fn name(&self) -> &'static str;

    /// Whether `transform` mutates the frame it is given.
    ///
    /// In-place stages also return the mutated frame; the others leave the
    /// input untouched and return a new frame.
    fn modifies_input(&self) -> bool;

    /// Accept and ignore `data`, returning the stage itself.
    fn fit(&self, _data: &DataFrame) -> &Self
    where
        Self: Sized,
    {
        self
    }

    /// Apply the stage.
    ///
    /// # Errors
    ///
    /// Returns an error if configured columns are absent or values cannot
    /// be coerced.
    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame>;

    /// `fit` followed by `transform`.
    ///
    /// # Errors
    ///
    /// Same as [`Transformer::transform`].
    fn fit_transform(&self, data: &mut DataFrame) -> Result<DataFrame>
    where
        Self: Sized,
    {
        self.fit(data).transform(data)
    }
}

/// A configured stage.
#[derive(Debug, Clone)]
pub enum Stage {
    CategoricalEncoder(CategoricalEncoder),
    DropNa(DropNa),
    DropCols(DropCols),
    ColumnSelector(ColumnSelector),
    AssignJobs(AssignJobs),
    DateTimeConverter(DateTimeConverter),
    Lookup(Lookup),
    CalculateFeatures(CalculateFeatures),
}

impl Stage {
    fn inner(&self) -> &dyn Transformer {
        match self {
            Self::CategoricalEncoder(stage) => stage,
            Self::DropNa(stage) => stage,
            Self::DropCols(stage) => stage,
            Self::ColumnSelector(stage) => stage,
            Self::AssignJobs(stage) => stage,
            Self::DateTimeConverter(stage) => stage,
            Self::Lookup(stage) => stage,
            Self::CalculateFeatures(stage) => stage,
        }
    }
}

impl Transformer for Stage {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn modifies_input(&self) -> bool {
        self.inner().modifies_input()
    }

    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame> {
        let span = tracing::debug_span!("stage", name = self.name());
        let _guard = span.enter();
        let (rows_in, columns_in) = (data.height(), data.width());
        let output = self.inner().transform(data)?;
        tracing::debug!(
            rows_in,
            columns_in,
            rows_out = output.height(),
            columns_out = output.width(),
            "stage complete"
        );
        Ok(output)
    }
}

macro_rules! impl_from_stage {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Stage {
                fn from(stage: $variant) -> Self {
                    Self::$variant(stage)
                }
            }
        )+
    };
}

impl_from_stage!(
    CategoricalEncoder,
    DropNa,
    DropCols,
    ColumnSelector,
    AssignJobs,
    DateTimeConverter,
    Lookup,
    CalculateFeatures,
);
