//! Estimators for geometric models.
//!
//! Estimators wrap minimal solvers behind the [`Estimator`](crate::core::Estimator)
//! interface a sampling loop drives.

pub mod fundamental;

pub use fundamental::FundamentalEstimator;
