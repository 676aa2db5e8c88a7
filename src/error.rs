//! Error type for precondition violations.
//!
//! Degenerate geometry is not an error: solvers report an unusable sample
//! through their boolean success channel. The variants here cover inputs the
//! caller should never have produced in the first place.

/// Errors raised when a sample or correspondence table violates a solver's
/// preconditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    /// The sample does not contain exactly the number of indices the solver needs.
    #[error("invalid sample size: expected {expected} indices, got {actual}")]
    InvalidSampleSize {
        /// Required sample size.
        expected: usize,
        /// Number of indices supplied.
        actual: usize,
    },

    /// The correspondence table has fewer columns than a correspondence needs.
    #[error("correspondence table needs at least {required} columns, got {actual}")]
    InsufficientColumns {
        /// Required column count.
        required: usize,
        /// Column count of the table.
        actual: usize,
    },

    /// A sample index points past the last row of the table.
    #[error("sample index {index} is out of bounds for a table with {rows} rows")]
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Row count of the table.
        rows: usize,
    },

    /// The same row was drawn twice.
    #[error("sample index {index} appears more than once")]
    DuplicateIndex {
        /// Repeated index.
        index: usize,
    },

    /// A sampled correspondence holds a NaN or infinite coordinate.
    #[error("correspondence at row {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Row of the offending correspondence.
        index: usize,
    },

    /// Two point sets passed to the high-level API do not line up.
    #[error("point sets must both be {expected_rows}x2, got {rows1}x{cols1} and {rows2}x{cols2}")]
    PointShapeMismatch {
        /// Row count both sets must have.
        expected_rows: usize,
        /// Shape of the first set.
        rows1: usize,
        /// Columns of the first set.
        cols1: usize,
        /// Rows of the second set.
        rows2: usize,
        /// Columns of the second set.
        cols2: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SolverError>;
