//! CPU runtime implementation

use super::client::CpuClient;
use super::device::CpuDevice;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::alloc::{Layout as AllocLayout, alloc_zeroed, dealloc};

/// Alignment for CPU tensor buffers (SIMD compatibility)
pub(super) const CPU_ALLOC_ALIGN: usize = 64;

/// CPU compute runtime
///
/// This is the default runtime that works on any platform.
/// Memory is allocated on the heap using the system allocator.
#[derive(Clone, Debug, Default)]
pub struct CpuRuntime;

impl Runtime for CpuRuntime {
    type Device = CpuDevice;
    type Client = CpuClient;
    type Allocator = super::client::CpuAllocator;

    fn name() -> &'static str {
        "cpu"
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let layout = AllocLayout::from_size_align(size_bytes, CPU_ALLOC_ALIGN)
            .map_err(|_| Error::OutOfMemory { size: size_bytes })?;

        let ptr = unsafe { alloc_zeroed(layout) };

        if ptr.is_null() {
            return Err(Error::OutOfMemory { size: size_bytes });
        }

        Ok(ptr as u64)
    }

    fn deallocate(ptr: u64, size_bytes: usize, _device: &Self::Device) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }

        let layout = AllocLayout::from_size_align(size_bytes, CPU_ALLOC_ALIGN)
            .expect("Invalid allocation layout");

        unsafe {
            dealloc(ptr as *mut u8, layout);
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) -> Result<()> {
        if src.is_empty() || dst == 0 {
            return Ok(());
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst as *mut u8, src.len());
        }
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) -> Result<()> {
        if dst.is_empty() || src == 0 {
            return Ok(());
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src as *const u8, dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }

    fn default_device() -> Self::Device {
        CpuDevice::new()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        CpuClient::new(device.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_roundtrip() {
        let device = CpuDevice::new();
        let ptr = CpuRuntime::allocate(256, &device).unwrap();
        assert_ne!(ptr, 0);

        let src = [7u8; 256];
        CpuRuntime::copy_to_device(&src, ptr, &device).unwrap();

        let mut dst = [0u8; 256];
        CpuRuntime::copy_from_device(ptr, &mut dst, &device).unwrap();
        assert_eq!(src, dst);

        CpuRuntime::deallocate(ptr, 256, &device);
    }

    #[test]
    fn test_zero_sized_allocation() {
        let device = CpuDevice::new();
        assert_eq!(CpuRuntime::allocate(0, &device).unwrap(), 0);
    }

    #[test]
    fn test_allocation_is_zeroed() {
        let device = CpuDevice::new();
        let ptr = CpuRuntime::allocate(64, &device).unwrap();
        let mut dst = [0xFFu8; 64];
        CpuRuntime::copy_from_device(ptr, &mut dst, &device).unwrap();
        assert_eq!(dst, [0u8; 64]);
        CpuRuntime::deallocate(ptr, 64, &device);
    }
}
