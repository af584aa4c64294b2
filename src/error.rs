//! Error types for augrand

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using augrand's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in augrand operations
#[derive(Error, Debug)]
pub enum Error {
    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Seed value outside the supported unsigned range
    #[error("Invalid seed {value}: seeds must be non-negative")]
    InvalidSeed {
        /// The rejected seed value
        value: i64,
    },

    /// A user-supplied rng callback failed or produced an unusable value
    #[error("Rng callback error: {reason}")]
    RngCallback {
        /// What went wrong in the callback
        reason: String,
    },

    /// Mutually exclusive arguments were both supplied
    #[error("Conflicting arguments: '{first}' and '{second}' are mutually exclusive")]
    ConfigConflict {
        /// First argument name
        first: &'static str,
        /// Second argument name
        second: &'static str,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// CUDA-specific error
    #[cfg(feature = "cuda")]
    #[error("CUDA error: {0}")]
    Cuda(#[from] cudarc::driver::DriverError),

    /// Feature not yet implemented
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Description of the unimplemented feature
        feature: &'static str,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an rng callback error
    pub fn rng_callback(reason: impl Into<String>) -> Self {
        Self::RngCallback {
            reason: reason.into(),
        }
    }
}
