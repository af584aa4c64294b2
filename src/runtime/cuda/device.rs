//! CUDA device implementation

use crate::runtime::Device;

/// CUDA device identified by ordinal (0, 1, 2, ...)
#[derive(Clone, Debug)]
pub struct CudaDevice {
    pub(crate) index: usize,
}

impl CudaDevice {
    /// Create a new CUDA device
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Get memory information for this device
    ///
    /// Returns (free_bytes, total_bytes) for the device's global memory.
    /// Requires a bound context on the calling thread.
    pub fn memory_info(&self) -> crate::error::Result<(usize, usize)> {
        let (free, total) = cudarc::driver::result::mem_get_info()?;
        Ok((free, total))
    }
}

impl Device for CudaDevice {
    fn id(&self) -> usize {
        self.index
    }

    fn name(&self) -> String {
        format!("cuda:{}", self.index)
    }
}

impl Default for CudaDevice {
    fn default() -> Self {
        Self::new(0)
    }
}
