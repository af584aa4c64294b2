//! CUDA implementation of random generation operations
//!
//! Generation stays on the host: the bulk methods run the same CPU fill
//! kernels and upload the result. Equal streams therefore produce
//! bit-identical tensors on CPU and CUDA, which is the contract the
//! operator layer relies on. The `*_from_source` methods use the generic
//! host-sampling defaults, which already place results on this client's
//! device.

use crate::dtype::DType;
use crate::error::Result;
use crate::ops::RandomOps;
use crate::ops::dispatch_dtype;
use crate::runtime::RuntimeClient;
use crate::runtime::cpu::kernels;
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::tensor::Tensor;

impl RandomOps<CudaRuntime> for CudaClient {
    fn philox_uniform(
        &self,
        shape: &[usize],
        key: u64,
        cursor: u64,
        lo: f64,
        hi: f64,
        dtype: DType,
    ) -> Result<Tensor<CudaRuntime>> {
        let numel: usize = shape.iter().product();

        dispatch_dtype!(dtype, T => {
            let mut host = vec![T::zeroed(); numel];
            if numel > 0 {
                unsafe {
                    kernels::philox_uniform_kernel::<T>(host.as_mut_ptr(), numel, key, cursor, lo, hi);
                }
            }
            Tensor::try_from_slice(&host, shape, self.device())
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
    ) -> Result<Tensor<CudaRuntime>> {
        let numel: usize = shape.iter().product();

        dispatch_dtype!(dtype, T => {
            let mut host = vec![T::zeroed(); numel];
            if numel > 0 {
                unsafe {
                    kernels::philox_normal_kernel::<T>(host.as_mut_ptr(), numel, key, cursor, mean, stddev);
                }
            }
            Tensor::try_from_slice(&host, shape, self.device())
        }, "philox_normal")
    }
}
