//! Core traits connecting minimal solvers to a RANSAC pipeline.
//!
//! A [`Solver`] turns one minimal sample into zero or more model hypotheses.
//! An [`Estimator`] is what a sampling loop talks to: it knows its sample
//! size, screens samples and models, and hides the solver's error channel.

use crate::{error::Result, types::DataMatrix};

/// Minimal solver producing model hypotheses from a fixed-size sample.
pub trait Solver {
    /// Model type produced by this solver.
    type Model: Clone;

    /// Number of correspondences in a minimal sample.
    const SAMPLE_SIZE: usize;

    /// Upper bound on the number of models one sample can produce.
    const MAXIMUM_SOLUTIONS: usize;

    /// Size of a minimal sample for this solver.
    fn sample_size(&self) -> usize {
        Self::SAMPLE_SIZE
    }

    /// Upper bound on the number of hypotheses per sample.
    fn maximum_solutions(&self) -> usize {
        Self::MAXIMUM_SOLUTIONS
    }

    /// Estimate candidate models from the rows of `data` selected by `sample`.
    ///
    /// New models are appended to `models`; existing entries are left alone.
    /// Returns `Ok(false)` when the sample is geometrically unusable and
    /// `Err` when the inputs violate the solver's preconditions.
    fn estimate_model(
        &self,
        data: &DataMatrix,
        sample: &[usize],
        models: &mut Vec<Self::Model>,
    ) -> Result<bool>;
}

/// Estimator responsible for generating model hypotheses from minimal samples.
pub trait Estimator {
    /// Model type produced by this estimator.
    type Model: Clone;

    /// Size of a minimal sample for this estimator.
    fn sample_size(&self) -> usize;

    /// Check whether a given sample is valid.
    fn is_valid_sample(&self, data: &DataMatrix, sample: &[usize]) -> bool;

    /// Estimate candidate models from a minimal sample.
    fn estimate_model(&self, data: &DataMatrix, sample: &[usize]) -> Vec<Self::Model>;

    /// Validate a candidate model before scoring.
    fn is_valid_model(
        &self,
        model: &Self::Model,
        data: &DataMatrix,
        sample: &[usize],
        threshold: f64,
    ) -> bool;
}
