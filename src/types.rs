//! Core shared types.
//!
//! Correspondences are stored one per row in a dense `f64` matrix, the same
//! layout SupeRANSAC uses for its `DataMatrix` alias.

use nalgebra::{DMatrix, SMatrix, SVector};

/// Dynamic matrix of `f64` holding one correspondence per row.
///
/// Two-view solvers read columns `0..4` as `x0, y0, x1, y1`: the point in the
/// first image followed by its match in the second image. Any further columns
/// (scores, descriptors indices, ...) are ignored by the solvers.
pub type DataMatrix = DMatrix<f64>;

/// Linear system built from a seven-point sample, one epipolar constraint per row.
pub type CoefficientMatrix = SMatrix<f64, 7, 9>;

/// Row-major flattened 3x3 matrix.
pub type FlatMatrix3 = SVector<f64, 9>;
