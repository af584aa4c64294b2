//! CUDA runtime implementation

use super::cache::get_or_create_client;
use super::client::CudaClient;
use super::device::CudaDevice;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// CUDA runtime adapter
///
/// Implements the generic Runtime trait for the CUDA backend, using cudarc
/// for direct driver control. Memory operations are synchronous with
/// respect to the host; the generation path never launches device kernels,
/// so ordering reduces to plain alloc/copy.
#[derive(Clone, Debug, Default)]
pub struct CudaRuntime;

impl Runtime for CudaRuntime {
    type Device = CudaDevice;
    type Client = CudaClient;
    type Allocator = super::client::CudaAllocator;

    fn name() -> &'static str {
        "cuda"
    }

    /// Allocate zeroed GPU memory.
    ///
    /// Returns `Err(OutOfMemory)` if CUDA memory allocation fails.
    fn allocate(size_bytes: usize, device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let client = get_or_create_client(device)?;
        client.bind()?;

        unsafe {
            let ptr = cudarc::driver::result::malloc_sync(size_bytes)
                .map_err(|_| Error::OutOfMemory { size: size_bytes })?;

            if let Err(e) = cudarc::driver::result::memset_d8_sync(ptr, 0, size_bytes) {
                let _ = cudarc::driver::result::free_sync(ptr);
                return Err(e.into());
            }

            Ok(ptr)
        }
    }

    fn deallocate(ptr: u64, _size_bytes: usize, device: &Self::Device) {
        if ptr == 0 {
            return;
        }

        let bound = get_or_create_client(device).and_then(|c| c.bind());
        if bound.is_err() {
            // Context is gone - memory is reclaimed by the driver on
            // context destruction.
            return;
        }

        unsafe {
            if let Err(e) = cudarc::driver::result::free_sync(ptr) {
                // Deallocation failures are typically benign (teardown
                // order); report, don't panic.
                log::error!("cuMemFree failed for ptr 0x{:x}: {:?}", ptr, e);
            }
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()> {
        if src.is_empty() || dst == 0 {
            return Ok(());
        }

        let client = get_or_create_client(device)?;
        client.bind()?;

        unsafe {
            cudarc::driver::result::memcpy_htod_sync(dst, src)?;
        }
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()> {
        if dst.is_empty() || src == 0 {
            return Ok(());
        }

        let client = get_or_create_client(device)?;
        client.bind()?;

        unsafe {
            cudarc::driver::result::memcpy_dtoh_sync(dst, src)?;
        }
        Ok(())
    }

    fn default_device() -> Self::Device {
        CudaDevice::new(0)
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        get_or_create_client(device).expect("Failed to create CUDA client")
    }
}
