//! CUDA backend
//!
//! GPU tensor placement via cudarc. Random generation stays on the host
//! (see [`crate::ops::cuda`]); this backend is responsible for device
//! memory and transfer, which is exactly what keeps CPU and CUDA results
//! identical for equal streams.

mod cache;
mod client;
mod device;
mod runtime;

pub use client::{CudaAllocator, CudaClient};
pub use device::CudaDevice;
pub use runtime::CudaRuntime;
