//! CPU implementation of random generation operations

use crate::dtype::DType;
use crate::error::Result;
use crate::ops::RandomOps;
use crate::ops::dispatch_dtype;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;

/// RandomOps implementation for the CPU runtime.
///
/// The `*_from_source` methods use the generic host-sampling defaults; the
/// bulk counter-keyed methods dispatch the typed fill kernels directly into
/// tensor storage.
impl RandomOps<CpuRuntime> for CpuClient {
    fn philox_uniform(
        &self,
        shape: &[usize],
        key: u64,
        cursor: u64,
        lo: f64,
        hi: f64,
        dtype: DType,
    ) -> Result<Tensor<CpuRuntime>> {
        let out = Tensor::<CpuRuntime>::zeros(shape, dtype, &self.device)?;
        let numel = out.numel();

        if numel == 0 {
            return Ok(out);
        }

        let out_ptr = out.storage().ptr();

        dispatch_dtype!(dtype, T => {
            unsafe {
                kernels::philox_uniform_kernel::<T>(out_ptr as *mut T, numel, key, cursor, lo, hi);
            }
            Ok(out)
        }, "philox_uniform")
    }

    fn philox_normal(
        &self,
        shape: &[usize],
        key: u64,
        cursor: u64,
        mean: f64,
        stddev: f64,
        dtype: DType,
    ) -> Result<Tensor<CpuRuntime>> {
        let out = Tensor::<CpuRuntime>::zeros(shape, dtype, &self.device)?;
        let numel = out.numel();

        if numel == 0 {
            return Ok(out);
        }

        let out_ptr = out.storage().ptr();

        dispatch_dtype!(dtype, T => {
            unsafe {
                kernels::philox_normal_kernel::<T>(out_ptr as *mut T, numel, key, cursor, mean, stddev);
            }
            Ok(out)
        }, "philox_normal")
    }
}
