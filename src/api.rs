//! High-level Rust API.
//!
//! Convenience entry points for callers that hold two separate point sets
//! rather than a packed correspondence table.

use nalgebra::DMatrix;

use crate::core::Solver;
use crate::error::{Result, SolverError};
use crate::models::FundamentalMatrix;
use crate::settings::SevenPointSettings;
use crate::solvers::SevenPointSolver;
use crate::types::DataMatrix;

/// Estimate fundamental matrix candidates from exactly seven correspondences.
///
/// # Arguments
/// * `points1` - Points in the first image (7x2 matrix)
/// * `points2` - Matching points in the second image (7x2 matrix)
/// * `settings` - Optional solver settings (uses defaults if None)
///
/// # Returns
/// `Some` with zero to three candidates, or `None` when the seven points are
/// a degenerate configuration and should be replaced by another sample.
pub fn fundamental_seven_point(
    points1: &DMatrix<f64>,
    points2: &DMatrix<f64>,
    settings: Option<SevenPointSettings>,
) -> Result<Option<Vec<FundamentalMatrix>>> {
    let n = SevenPointSolver::SAMPLE_SIZE;
    if points1.shape() != (n, 2) || points2.shape() != (n, 2) {
        return Err(SolverError::PointShapeMismatch {
            expected_rows: n,
            rows1: points1.nrows(),
            cols1: points1.ncols(),
            rows2: points2.nrows(),
            cols2: points2.ncols(),
        });
    }

    // Combine into data matrix: [x1, y1, x2, y2]
    let mut data = DataMatrix::zeros(n, 4);
    for i in 0..n {
        data[(i, 0)] = points1[(i, 0)];
        data[(i, 1)] = points1[(i, 1)];
        data[(i, 2)] = points2[(i, 0)];
        data[(i, 3)] = points2[(i, 1)];
    }

    let solver = SevenPointSolver::with_settings(settings.unwrap_or_default());
    let sample: Vec<usize> = (0..n).collect();
    let mut models = Vec::with_capacity(SevenPointSolver::MAXIMUM_SOLUTIONS);
    let usable = solver.estimate_model(&data, &sample, &mut models)?;
    Ok(usable.then_some(models))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_point_sets_of_the_wrong_shape() {
        let points1 = DMatrix::<f64>::zeros(7, 2);
        let points2 = DMatrix::<f64>::zeros(8, 2);
        let err = fundamental_seven_point(&points1, &points2, None).unwrap_err();
        assert_eq!(
            err,
            SolverError::PointShapeMismatch {
                expected_rows: 7,
                rows1: 7,
                cols1: 2,
                rows2: 8,
                cols2: 2,
            }
        );

        let points2 = DMatrix::<f64>::zeros(7, 3);
        assert!(fundamental_seven_point(&points1, &points2, None).is_err());
    }

    #[test]
    fn packs_point_sets_in_solver_layout() {
        #[rustfmt::skip]
        let points1 = DMatrix::from_row_slice(7, 2, &[
            -0.21, 0.14,
            0.33, -0.27,
            0.08, 0.41,
            -0.37, -0.19,
            0.19, 0.07,
            -0.02, -0.44,
            0.45, 0.29,
        ]);
        #[rustfmt::skip]
        let points2 = DMatrix::from_row_slice(7, 2, &[
            -0.05, 0.11,
            0.52, -0.31,
            0.27, 0.39,
            -0.18, -0.24,
            0.38, 0.03,
            0.16, -0.50,
            0.66, 0.27,
        ]);

        let models = fundamental_seven_point(&points1, &points2, None)
            .expect("well-formed input")
            .expect("generic configuration");
        assert!(!models.is_empty());
        for model in &models {
            assert_eq!(model.f[(2, 2)], 1.0);
            for i in 0..7 {
                let r = model.algebraic_residual(
                    points1[(i, 0)],
                    points1[(i, 1)],
                    points2[(i, 0)],
                    points2[(i, 1)],
                );
                assert!(r.abs() < 1e-8 * model.f.amax(), "residual {r}");
            }
        }
    }
}
