//! # augrand
//!
//! **Deterministic random value streams and stochastic tensor operators for
//! data-augmentation pipelines.**
//!
//! augrand provides seedable, cloneable random number streams and the
//! stochastic operators (`Uniform`, `Normal`) that consume them, with the
//! same results across CPU and CUDA backends and across batched and
//! unbatched execution.
//!
//! ## Why augrand?
//!
//! - **Reproducible**: every value is a pure function of `(seed, cursor)`
//!   via Philox4x32-10 - no global state, no hidden RNG pool
//! - **Cloneable streams**: `RngHandle::clone()` forks a stream
//!   mid-sequence; both copies produce the same future values independently
//! - **Pluggable sources**: operators accept any zero-argument
//!   `u32`-producing source, so user callbacks and native streams are
//!   interchangeable
//! - **Multi-backend**: the same operator call runs on CPU or CUDA and
//!   produces identical values
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use augrand::prelude::*;
//! use augrand::ops::random::{Uniform, UniformArgs};
//!
//! let device = CpuDevice::new();
//! let mut op = Uniform::<CpuRuntime>::with_seed(&device, 42);
//!
//! let args = UniformArgs::new(&[10]).range(0.0, 1.0);
//! let out = op.call(&args, None, None)?;
//! let values: Vec<f32> = out.into_item().unwrap().to_vec();
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): multi-threaded bulk generation
//! - `cuda`: NVIDIA CUDA backend

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod batch;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod rng;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::batch::Batch;
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::ops::RandomOps;
    pub use crate::ops::random::Output;
    pub use crate::rng::{RngCallback, RngHandle, RngSource};
    pub use crate::runtime::cpu::{CpuDevice, CpuRuntime};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::tensor::{Layout, Tensor};

    #[cfg(feature = "cuda")]
    pub use crate::runtime::cuda::{CudaDevice, CudaRuntime};
}

/// Default runtime based on enabled features
///
/// - With `cuda` feature: `CudaRuntime`
/// - Otherwise: `CpuRuntime`
#[cfg(feature = "cuda")]
pub type DefaultRuntime = runtime::cuda::CudaRuntime;

/// Default runtime based on enabled features
#[cfg(not(feature = "cuda"))]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
