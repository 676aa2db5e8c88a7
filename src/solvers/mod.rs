//! Minimal solvers.
//!
//! - [`fundamental_seven_point`]: fundamental matrix from seven correspondences

pub mod fundamental_seven_point;

pub use fundamental_seven_point::SevenPointSolver;
