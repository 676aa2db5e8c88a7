//! # seven-point - Minimal fundamental matrix solver
//!
//! `seven-point` estimates fundamental matrices from seven point
//! correspondences with the classical seven-point algorithm. It is built to
//! be driven by a RANSAC-style loop: the loop draws minimal samples, asks the
//! solver for hypotheses, and scores them elsewhere.
//!
//! ## Quick Start
//!
//! ```rust
//! use seven_point::{DataMatrix, SevenPointSolver, Solver};
//!
//! // One correspondence per row: x0, y0 (first image), x1, y1 (second image).
//! let data = DataMatrix::from_row_slice(7, 4, &[
//!     -0.21, 0.14, -0.05, 0.11,
//!     0.33, -0.27, 0.52, -0.31,
//!     0.08, 0.41, 0.27, 0.39,
//!     -0.37, -0.19, -0.18, -0.24,
//!     0.19, 0.07, 0.38, 0.03,
//!     -0.02, -0.44, 0.16, -0.50,
//!     0.45, 0.29, 0.66, 0.27,
//! ]);
//!
//! let solver = SevenPointSolver::new();
//! let mut models = Vec::new();
//! let usable = solver.estimate_model(&data, &[0, 1, 2, 3, 4, 5, 6], &mut models)?;
//! assert!(usable);
//! for model in &models {
//!     assert_eq!(model.f[(2, 2)], 1.0);
//! }
//! # Ok::<(), seven_point::SolverError>(())
//! ```
//!
//! ## Outcomes
//!
//! [`Solver::estimate_model`] reports three kinds of result:
//!
//! - `Ok(true)`: zero to three candidates were appended to the output vector.
//! - `Ok(false)`: the sample is degenerate; draw another one.
//! - `Err(SolverError)`: the sample or table violates a precondition
//!   (wrong size, duplicate or out-of-range index, missing columns, NaN).
//!
//! ## Modules
//!
//! - **[`api`](api)**: High-level functions taking separate point sets
//! - **[`core`](core)**: [`Solver`] and [`Estimator`] traits
//! - **[`solvers`](solvers)**: Minimal solvers
//! - **[`estimators`](estimators)**: RANSAC-facing estimators
//! - **[`models`](models)**: Geometric model types
//! - **[`settings`](settings)**: Solver configuration
//! - **[`utils`](utils)**: Polynomial root finders

pub mod api;
pub mod core;
pub mod error;
pub mod estimators;
pub mod models;
pub mod settings;
pub mod solvers;
pub mod types;
pub mod utils;

pub use api::fundamental_seven_point;
pub use crate::core::{Estimator, Solver};
pub use error::{Result, SolverError};
pub use estimators::FundamentalEstimator;
pub use models::FundamentalMatrix;
pub use settings::{NullSpaceMethod, SevenPointSettings};
pub use solvers::SevenPointSolver;
pub use types::DataMatrix;
