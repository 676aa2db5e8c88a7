//! Fundamental matrix estimator built on the seven-point solver.

use log::warn;

use crate::core::{Estimator, Solver};
use crate::models::FundamentalMatrix;
use crate::settings::SevenPointSettings;
use crate::solvers::SevenPointSolver;
use crate::types::DataMatrix;

/// Fundamental matrix estimator producing up to three hypotheses per
/// seven-point sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct FundamentalEstimator {
    solver: SevenPointSolver,
}

impl FundamentalEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SevenPointSettings) -> Self {
        Self {
            solver: SevenPointSolver::with_settings(settings),
        }
    }

    pub fn solver(&self) -> &SevenPointSolver {
        &self.solver
    }
}

impl Estimator for FundamentalEstimator {
    type Model = FundamentalMatrix;

    fn sample_size(&self) -> usize {
        SevenPointSolver::SAMPLE_SIZE
    }

    fn is_valid_sample(&self, data: &DataMatrix, sample: &[usize]) -> bool {
        self.solver.validate_sample(data, sample).is_ok()
    }

    fn estimate_model(&self, data: &DataMatrix, sample: &[usize]) -> Vec<Self::Model> {
        let mut models = Vec::with_capacity(SevenPointSolver::MAXIMUM_SOLUTIONS);
        match self.solver.estimate_model(data, sample, &mut models) {
            Ok(true) => models,
            Ok(false) => Vec::new(),
            Err(err) => {
                warn!("discarding seven-point sample {sample:?}: {err}");
                Vec::new()
            }
        }
    }

    /// Checks that the model is finite and of rank two. The inlier
    /// `threshold` is a point-to-model distance and plays no part in the
    /// rank test, which uses `model_validation_threshold` alone.
    fn is_valid_model(
        &self,
        model: &Self::Model,
        _data: &DataMatrix,
        _sample: &[usize],
        _threshold: f64,
    ) -> bool {
        if model.f.iter().any(|v| !v.is_finite()) {
            return false;
        }
        // Rank-2 constraint, measured relative to the scale of F.
        let scale = model.f.amax();
        if scale == 0.0 {
            return false;
        }
        let det = model.determinant().abs() / scale.powi(3);
        det < self.solver.settings().model_validation_threshold
    }
}
