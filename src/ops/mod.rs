//! Stochastic operators
//!
//! # Design
//!
//! Operations are defined as traits implemented by `RuntimeClient`. This
//! gives operations access to device and allocator for creating output
//! tensors.
//!
//! ```text
//! RuntimeClient<R>
//!   └── implements RandomOps<R>
//!         ├── philox_uniform, philox_normal   (bulk, counter-keyed)
//!         └── *_from_source                   (sequential, any RngSource)
//! ```
//!
//! On top of the client traits, [`random`] provides the operator objects
//! (`Uniform`, `Normal`) and functional wrappers that implement the
//! seed/rng binding rules.

pub mod cpu;
pub mod random;
pub mod traits;

#[cfg(feature = "cuda")]
pub mod cuda;

pub use traits::RandomOps;

// ============================================================================
// DType Dispatch Macro
// ============================================================================

/// Macro for dtype dispatch to typed code
///
/// Matches on dtype and executes the block with the appropriate Rust type.
/// Usage: `dispatch_dtype!(dtype, T => { code using T }, "op_name")`
///
/// Random operators produce floating point output; integer dtypes return
/// an `UnsupportedDType` error.
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            other => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: other,
                    op: $error_op,
                });
            }
        }
    };
}

pub(crate) use dispatch_dtype;
