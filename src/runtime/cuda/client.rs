//! CUDA client implementation
//!
//! `CudaClient` owns the context and stream for a device.
//!
//! # Thread Safety
//!
//! `CudaClient` is `Clone` and can be shared across threads. The underlying
//! CUDA context and stream are reference-counted via `Arc`. CUDA driver
//! calls require the context to be bound to the calling thread; client
//! methods bind it before every operation.

use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::device::CudaDevice;
use super::runtime::CudaRuntime;
use crate::error::Result;
use crate::runtime::{DefaultAllocator, Runtime, RuntimeClient};

/// CUDA runtime client
///
/// All operations for a device go through one cached client (see
/// `cache.rs`), so contexts and streams are created once per device, not
/// once per call.
#[derive(Clone)]
pub struct CudaClient {
    pub(crate) device: CudaDevice,
    pub(crate) ctx: Arc<CudaContext>,
    pub(crate) stream: Arc<CudaStream>,
    allocator: CudaAllocator,
}

impl CudaClient {
    /// Create a new client for a device, initializing its context
    pub fn new(device: CudaDevice) -> Result<Self> {
        let ctx = CudaContext::new(device.index)?;
        let stream = ctx.default_stream();
        let allocator = create_cuda_allocator(device.clone());

        Ok(Self {
            device,
            ctx,
            stream,
            allocator,
        })
    }

    /// Bind this client's context to the calling thread
    #[inline]
    pub(crate) fn bind(&self) -> Result<()> {
        self.ctx.bind_to_thread()?;
        Ok(())
    }
}

impl RuntimeClient<CudaRuntime> for CudaClient {
    fn device(&self) -> &CudaDevice {
        &self.device
    }

    fn synchronize(&self) {
        let result = self
            .bind()
            .and_then(|()| self.stream.synchronize().map_err(Into::into));
        if let Err(e) = result {
            // Teardown order can leave a dead context behind; nothing the
            // caller can do about it here.
            log::error!("CUDA synchronize failed on {:?}: {}", self.device, e);
        }
    }

    fn allocator(&self) -> &CudaAllocator {
        &self.allocator
    }
}

impl std::fmt::Debug for CudaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CudaClient")
            .field("device", &self.device)
            .finish()
    }
}

/// CUDA-specific allocator type alias
pub type CudaAllocator = DefaultAllocator<CudaDevice>;

/// Create a CUDA allocator for the given device
fn create_cuda_allocator(device: CudaDevice) -> CudaAllocator {
    DefaultAllocator::new(
        device,
        |size, dev| {
            // The closure returns a raw pointer; the fallible path is
            // Runtime::allocate, which callers should prefer.
            CudaRuntime::allocate(size, dev).expect("CUDA allocation failed")
        },
        |ptr, size, dev| {
            CudaRuntime::deallocate(ptr, size, dev);
        },
    )
}
