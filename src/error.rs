use thiserror::Error;

/// Errors returned by clustering runs in this crate.
///
/// All variants except [`Error::InvalidDistance`] are detected by input
/// validation before any clustering work starts; a failed run never
/// produces partial labels.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A point contains a NaN or infinite coordinate.
    #[error("non-finite coordinate in point {index}")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },

    /// The distance metric returned a negative or non-finite value.
    #[error("metric returned {value} for points {a} and {b}; distances must be finite and non-negative")]
    InvalidDistance {
        /// First point index.
        a: usize,
        /// Second point index.
        b: usize,
        /// The offending value.
        value: f32,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
