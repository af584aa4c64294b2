//! CPU backend
//!
//! The default backend, available on every platform. Memory lives on the
//! host heap; bulk generation kernels run in-process (multi-threaded with
//! the `rayon` feature).

mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use client::{CpuAllocator, CpuClient};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
