//! Geometric models produced by the solvers.

use nalgebra::{Matrix3, Vector3};

/// Fundamental matrix relating two pinhole views.
///
/// The matrix maps a point of the first image to its epipolar line in the
/// second image: `(x1, y1, 1) · F · (x0, y0, 1)ᵗ = 0` for every true match.
#[derive(Clone, Debug, PartialEq)]
pub struct FundamentalMatrix {
    pub f: Matrix3<f64>,
}

impl FundamentalMatrix {
    pub fn new(f: Matrix3<f64>) -> Self {
        Self { f }
    }

    /// Build from nine entries in row-major order.
    pub fn from_row_slice(entries: &[f64; 9]) -> Self {
        Self::new(Matrix3::from_row_slice(entries))
    }

    pub fn determinant(&self) -> f64 {
        self.f.determinant()
    }

    /// Value of the bilinear epipolar form for one correspondence.
    pub fn algebraic_residual(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
        let p0 = Vector3::new(x0, y0, 1.0);
        let p1 = Vector3::new(x1, y1, 1.0);
        p1.dot(&(self.f * p0))
    }

    /// First-order approximation of the geometric reprojection distance.
    ///
    /// Returns `f64::INFINITY` when both epipolar lines are degenerate.
    pub fn sampson_distance(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
        let p0 = Vector3::new(x0, y0, 1.0);
        let p1 = Vector3::new(x1, y1, 1.0);
        let line1 = self.f * p0;
        let line0 = self.f.transpose() * p1;
        let denom = line1.x * line1.x + line1.y * line1.y + line0.x * line0.x + line0.y * line0.y;
        if denom <= f64::MIN_POSITIVE {
            return f64::INFINITY;
        }
        p1.dot(&line1).abs() / denom.sqrt()
    }
}
