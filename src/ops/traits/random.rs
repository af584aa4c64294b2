//! Random generation operations
//!
//! Counter-based generation enables reproducible results: same
//! (key, cursor) → same output, on any backend, batched or not.
//!
//! Two families of methods:
//! - `philox_*` - bulk generation keyed by `(key, word cursor)`, the fast
//!   path for operator-owned streams. Backends without a bulk
//!   implementation leave the `NotImplemented` default.
//! - `*_from_source` - sequential generation drawing one word per required
//!   value from any [`RngSource`] (native handle or user callback). The
//!   default bodies sample on the host and place the result on the
//!   client's device, which is correct for every backend.

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::ops::dispatch_dtype;
use crate::ops::random::sample;
use crate::rng::RngSource;
use crate::runtime::{Runtime, RuntimeClient};
use crate::tensor::Tensor;

/// Random generation operations for runtime clients.
///
/// # Reproducibility
/// `philox_uniform(key, cursor)` produces exactly the values obtained by
/// feeding a handle with the same state through `uniform_from_source`,
/// word for word.
///
/// # Example
/// ```
/// # use augrand::prelude::*;
/// # use augrand::ops::RandomOps;
/// # let device = CpuDevice::new();
/// # let client = CpuRuntime::default_client(&device);
/// let a = client.philox_uniform(&[1000], 42, 0, 0.0, 1.0, DType::F32)?;
/// let b = client.philox_uniform(&[1000], 42, 0, 0.0, 1.0, DType::F32)?;
/// assert_eq!(a.to_vec::<f32>(), b.to_vec::<f32>()); // same (key, cursor), same values
/// # Ok::<(), augrand::error::Error>(())
/// ```
pub trait RandomOps<R: Runtime>: RuntimeClient<R> {
    /// Generate uniform samples in `[lo, hi)` from words
    /// `cursor..cursor + numel` of the stream keyed by `key`.
    fn philox_uniform(
        &self,
        shape: &[usize],
        key: u64,
        cursor: u64,
        lo: f64,
        hi: f64,
        dtype: DType,
    ) -> Result<Tensor<R>> {
        let _ = (shape, key, cursor, lo, hi, dtype);
        Err(Error::NotImplemented {
            feature: "RandomOps::philox_uniform",
        })
    }

    /// Generate `N(mean, stddev^2)` samples from `2 * ceil(numel / 2)`
    /// words starting at `cursor` of the stream keyed by `key`.
    fn philox_normal(
        &self,
        shape: &[usize],
        key: u64,
        cursor: u64,
        mean: f64,
        stddev: f64,
        dtype: DType,
    ) -> Result<Tensor<R>> {
        let _ = (shape, key, cursor, mean, stddev, dtype);
        Err(Error::NotImplemented {
            feature: "RandomOps::philox_normal",
        })
    }

    /// Generate uniform samples in `[lo, hi)`, drawing one word per
    /// element from `source`.
    fn uniform_from_source(
        &self,
        source: &mut dyn RngSource,
        lo: f64,
        hi: f64,
        shape: &[usize],
        dtype: DType,
    ) -> Result<Tensor<R>> {
        let numel: usize = shape.iter().product();
        let samples = sample::uniform(source, numel, lo, hi)?;
        dispatch_dtype!(dtype, T => {
            let data: Vec<T> = samples.iter().map(|&v| T::from_f64(v)).collect();
            Tensor::try_from_slice(&data, shape, self.device())
        }, "uniform_from_source")
    }

    /// Generate samples drawn uniformly from a discrete value set, one
    /// word per element.
    fn discrete_from_source(
        &self,
        source: &mut dyn RngSource,
        values: &[f64],
        shape: &[usize],
        dtype: DType,
    ) -> Result<Tensor<R>> {
        let numel: usize = shape.iter().product();
        let samples = sample::discrete(source, numel, values)?;
        dispatch_dtype!(dtype, T => {
            let data: Vec<T> = samples.iter().map(|&v| T::from_f64(v)).collect();
            Tensor::try_from_slice(&data, shape, self.device())
        }, "discrete_from_source")
    }

    /// Generate `N(mean, stddev^2)` samples, drawing a word pair per
    /// element pair from `source`.
    fn normal_from_source(
        &self,
        source: &mut dyn RngSource,
        mean: f64,
        stddev: f64,
        shape: &[usize],
        dtype: DType,
    ) -> Result<Tensor<R>> {
        let numel: usize = shape.iter().product();
        let samples = sample::normal(source, numel, mean, stddev)?;
        dispatch_dtype!(dtype, T => {
            let data: Vec<T> = samples.iter().map(|&v| T::from_f64(v)).collect();
            Tensor::try_from_slice(&data, shape, self.device())
        }, "normal_from_source")
    }
}
