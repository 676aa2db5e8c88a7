//! Configuration types for the seven-point solver.
//!
//! Defaults reproduce the behavior of the SupeRANSAC
//! `FundamentalMatrixSevenPointSolver`: the null space is taken from an SVD
//! of the normal equations and candidates are normalized whenever their
//! (3,3) entry exceeds machine epsilon in magnitude.

/// Decomposition used to extract the null space of the normal equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullSpaceMethod {
    /// Singular value decomposition of `AᵗA`.
    Svd,
    /// Symmetric eigen decomposition of `AᵗA`.
    SymmetricEigen,
}

/// Settings of [`SevenPointSolver`](crate::solvers::SevenPointSolver).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SevenPointSettings {
    /// Candidates whose (3,3) entry is at most this large in magnitude are
    /// dropped instead of being scaled to 1.
    pub normalization_epsilon: f64,
    /// Decomposition back-end for the null-space basis.
    pub null_space: NullSpaceMethod,
    /// Convergence tolerance of the iterative decomposition.
    pub decomposition_epsilon: f64,
    /// Iteration cap of the iterative decomposition. `0` means unbounded,
    /// which can spin forever on non-finite input.
    pub decomposition_max_iterations: usize,
    /// Relative determinant bound used by
    /// [`FundamentalEstimator::is_valid_model`](crate::estimators::FundamentalEstimator).
    pub model_validation_threshold: f64,
}

impl Default for SevenPointSettings {
    fn default() -> Self {
        Self {
            normalization_epsilon: f64::EPSILON,
            null_space: NullSpaceMethod::Svd,
            decomposition_epsilon: f64::EPSILON,
            decomposition_max_iterations: 1000,
            model_validation_threshold: 1e-3,
        }
    }
}
