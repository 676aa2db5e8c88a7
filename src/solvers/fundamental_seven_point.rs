//! Seven-point minimal solver for the fundamental matrix.
//!
//! Seven correspondences give seven linear equations in the nine entries of
//! `F`, leaving a two-dimensional solution space `λ·f1 + (1 - λ)·f2`. The
//! rank-2 constraint `det(F) = 0` turns into a cubic in `λ`, and every real
//! root yields one candidate, scaled so that `F[(2, 2)] == 1`.

use log::{debug, trace};
use nalgebra::{SMatrix, SVD};

use crate::core::Solver;
use crate::error::{Result, SolverError};
use crate::models::FundamentalMatrix;
use crate::settings::{NullSpaceMethod, SevenPointSettings};
use crate::types::{CoefficientMatrix, DataMatrix, FlatMatrix3};
use crate::utils::real_roots_cubic;

/// Columns a correspondence occupies in the data matrix: `x0, y0, x1, y1`.
const CORRESPONDENCE_COLUMNS: usize = 4;

/// Fundamental matrix solver using the seven-point algorithm.
///
/// The solver is stateless apart from its settings and can be shared freely
/// between threads; each call only appends to the output vector it is given.
#[derive(Debug, Clone, Copy)]
pub struct SevenPointSolver {
    settings: SevenPointSettings,
}

impl Default for SevenPointSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SevenPointSolver {
    pub fn new() -> Self {
        Self::with_settings(SevenPointSettings::default())
    }

    pub fn with_settings(settings: SevenPointSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SevenPointSettings {
        &self.settings
    }

    /// Check the preconditions [`Solver::estimate_model`] relies on.
    ///
    /// The sample must hold exactly seven distinct, in-bounds row indices and
    /// every sampled correspondence must be finite.
    pub fn validate_sample(&self, data: &DataMatrix, sample: &[usize]) -> Result<()> {
        if sample.len() != Self::SAMPLE_SIZE {
            return Err(SolverError::InvalidSampleSize {
                expected: Self::SAMPLE_SIZE,
                actual: sample.len(),
            });
        }
        if data.ncols() < CORRESPONDENCE_COLUMNS {
            return Err(SolverError::InsufficientColumns {
                required: CORRESPONDENCE_COLUMNS,
                actual: data.ncols(),
            });
        }
        for (i, &index) in sample.iter().enumerate() {
            if index >= data.nrows() {
                return Err(SolverError::IndexOutOfBounds {
                    index,
                    rows: data.nrows(),
                });
            }
            if sample[..i].contains(&index) {
                return Err(SolverError::DuplicateIndex { index });
            }
            if (0..CORRESPONDENCE_COLUMNS).any(|col| !data[(index, col)].is_finite()) {
                return Err(SolverError::NonFiniteCoordinate { index });
            }
        }
        Ok(())
    }
}

impl Solver for SevenPointSolver {
    type Model = FundamentalMatrix;

    const SAMPLE_SIZE: usize = 7;
    const MAXIMUM_SOLUTIONS: usize = 3;

    fn estimate_model(
        &self,
        data: &DataMatrix,
        sample: &[usize],
        models: &mut Vec<FundamentalMatrix>,
    ) -> Result<bool> {
        self.validate_sample(data, sample)?;

        let coefficients = build_coefficient_matrix(data, sample);
        let Some((f1, f2)) = null_space_basis(&coefficients, &self.settings) else {
            debug!("seven-point sample {sample:?}: null-space decomposition did not converge");
            return Ok(false);
        };

        let usable = candidates_from_basis(&f1, &f2, &self.settings, models);
        if !usable {
            debug!("seven-point sample {sample:?}: no usable real root");
        }
        Ok(usable)
    }
}

/// Form the linear system: the i-th row encodes `(x1, y1, 1) · F · (x0, y0, 1)ᵗ = 0`
/// for the i-th sampled correspondence, over the row-major entries of `F`.
pub(crate) fn build_coefficient_matrix(data: &DataMatrix, sample: &[usize]) -> CoefficientMatrix {
    let mut coefficients = CoefficientMatrix::zeros();
    for (i, &idx) in sample.iter().take(SevenPointSolver::SAMPLE_SIZE).enumerate() {
        let x0 = data[(idx, 0)];
        let y0 = data[(idx, 1)];
        let x1 = data[(idx, 2)];
        let y1 = data[(idx, 3)];

        coefficients[(i, 0)] = x1 * x0;
        coefficients[(i, 1)] = x1 * y0;
        coefficients[(i, 2)] = x1;
        coefficients[(i, 3)] = y1 * x0;
        coefficients[(i, 4)] = y1 * y0;
        coefficients[(i, 5)] = y1;
        coefficients[(i, 6)] = x0;
        coefficients[(i, 7)] = y0;
        coefficients[(i, 8)] = 1.0;
    }
    coefficients
}

/// Basis `(f1, f2)` of the null space of the coefficient matrix.
///
/// The decomposition runs on the 9x9 normal equations `AᵗA` instead of the
/// 7x9 system: the extra product is cheaper than decomposing the rectangular
/// matrix. `f2` belongs to the smallest singular value, `f1` to the second
/// smallest. Returns `None` if the decomposition does not converge.
pub(crate) fn null_space_basis(
    coefficients: &CoefficientMatrix,
    settings: &SevenPointSettings,
) -> Option<(FlatMatrix3, FlatMatrix3)> {
    let normal: SMatrix<f64, 9, 9> = coefficients.transpose() * coefficients;
    let eps = settings.decomposition_epsilon;
    let max_iterations = settings.decomposition_max_iterations;

    match settings.null_space {
        NullSpaceMethod::Svd => {
            let svd = SVD::try_new(normal, false, true, eps, max_iterations)?;
            let v_t = svd.v_t?;
            let (second, smallest) = two_smallest(svd.singular_values.as_slice());
            Some((v_t.row(second).transpose(), v_t.row(smallest).transpose()))
        }
        NullSpaceMethod::SymmetricEigen => {
            let eigen = normal.try_symmetric_eigen(eps, max_iterations)?;
            let (second, smallest) = two_smallest(eigen.eigenvalues.as_slice());
            Some((
                eigen.eigenvectors.column(second).into_owned(),
                eigen.eigenvectors.column(smallest).into_owned(),
            ))
        }
    }
}

/// Indices of the second smallest and the smallest of nine values.
fn two_smallest(values: &[f64]) -> (usize, usize) {
    let mut order: [usize; 9] = std::array::from_fn(|i| i);
    // Descending, stable: ties keep the decomposition's own order.
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    (order[7], order[8])
}

/// Coefficients `[c0, c1, c2, c3]` of `det(λ·difference + f2)`, ascending in `λ`.
///
/// Expanding the determinant of an affine matrix pencil by cofactors:
/// `c0 = det(f2)`, `c3 = det(difference)`, and the mixed terms pair the
/// entries of one matrix with the 2x2 cofactors of the other.
pub(crate) fn cubic_coefficients(difference: &FlatMatrix3, f2: &FlatMatrix3) -> [f64; 4] {
    let d = difference;

    let t0 = f2[4] * f2[8] - f2[5] * f2[7];
    let t1 = f2[3] * f2[8] - f2[5] * f2[6];
    let t2 = f2[3] * f2[7] - f2[4] * f2[6];

    let c0 = f2[0] * t0 - f2[1] * t1 + f2[2] * t2;

    let c1 = d[0] * t0 - d[1] * t1 + d[2] * t2 - d[3] * (f2[1] * f2[8] - f2[2] * f2[7])
        + d[4] * (f2[0] * f2[8] - f2[2] * f2[6])
        - d[5] * (f2[0] * f2[7] - f2[1] * f2[6])
        + d[6] * (f2[1] * f2[5] - f2[2] * f2[4])
        - d[7] * (f2[0] * f2[5] - f2[2] * f2[3])
        + d[8] * (f2[0] * f2[4] - f2[1] * f2[3]);

    let t0 = d[4] * d[8] - d[5] * d[7];
    let t1 = d[3] * d[8] - d[5] * d[6];
    let t2 = d[3] * d[7] - d[4] * d[6];

    let c2 = f2[0] * t0 - f2[1] * t1 + f2[2] * t2 - f2[3] * (d[1] * d[8] - d[2] * d[7])
        + f2[4] * (d[0] * d[8] - d[2] * d[6])
        - f2[5] * (d[0] * d[7] - d[1] * d[6])
        + f2[6] * (d[1] * d[5] - d[2] * d[4])
        - f2[7] * (d[0] * d[5] - d[2] * d[3])
        + f2[8] * (d[0] * d[4] - d[1] * d[3]);

    let c3 = d[0] * t0 - d[1] * t1 + d[2] * t2;

    [c0, c1, c2, c3]
}

/// Solve the rank constraint for a given null-space basis and append the
/// resulting candidates to `models`.
///
/// Returns `false`, leaving `models` untouched, when the cubic has no real
/// root or reports more than [`Solver::MAXIMUM_SOLUTIONS`] of them.
pub(crate) fn candidates_from_basis(
    f1: &FlatMatrix3,
    f2: &FlatMatrix3,
    settings: &SevenPointSettings,
    models: &mut Vec<FundamentalMatrix>,
) -> bool {
    // F(λ) = λ·f1 + (1 - λ)·f2 = λ·difference + f2
    let difference = f1 - f2;
    let polynomial = cubic_coefficients(&difference, f2);
    let roots = real_roots_cubic(&polynomial);
    trace!("seven-point cubic {polynomial:?} has real roots {roots:?}");

    if roots.is_empty() || roots.len() > SevenPointSolver::MAXIMUM_SOLUTIONS {
        return false;
    }

    let mut entries = [0.0; 9];
    for &root in &roots {
        let scale = difference[8] * root + f2[8];
        if scale.abs() <= settings.normalization_epsilon {
            trace!("seven-point root {root} skipped: F(3,3) = {scale} cannot be normalized");
            continue;
        }

        // Divide through by F(3,3) so the last entry becomes exactly one.
        let mu = 1.0 / scale;
        let lambda = root * mu;
        for (i, entry) in entries.iter_mut().enumerate().take(8) {
            *entry = difference[i] * lambda + f2[i] * mu;
        }
        entries[8] = 1.0;

        models.push(FundamentalMatrix::from_row_slice(&entries));
    }

    true
}
