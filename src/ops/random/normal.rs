//! Normal distribution operator

use super::{Output, SourceBinding, item_count, resolve_source, wrap_output};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::RandomOps;
use crate::rng::philox::normal_word_cost;
use crate::rng::{RngHandle, RngSource};
use crate::runtime::Runtime;

/// Call arguments for the [`Normal`] operator
///
/// Defaults to the standard normal distribution `N(0, 1)` with `F32`
/// output.
#[derive(Clone, Debug)]
pub struct NormalArgs {
    shape: Vec<usize>,
    dtype: DType,
    mean: f64,
    stddev: f64,
}

impl NormalArgs {
    /// Arguments for the given per-item output shape
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            dtype: DType::F32,
            mean: 0.0,
            stddev: 1.0,
        }
    }

    /// Mean of the distribution
    pub fn mean(mut self, mean: f64) -> Self {
        self.mean = mean;
        self
    }

    /// Standard deviation of the distribution (non-negative)
    pub fn stddev(mut self, stddev: f64) -> Self {
        self.stddev = stddev;
        self
    }

    /// Output element type (floating point only)
    pub fn dtype(mut self, dtype: DType) -> Self {
        self.dtype = dtype;
        self
    }

    /// The per-item output shape
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn validate(&self) -> Result<()> {
        if self.stddev < 0.0 || !self.stddev.is_finite() {
            return Err(Error::invalid_argument(
                "stddev",
                format!("expected a non-negative finite value, got {}", self.stddev),
            ));
        }
        Ok(())
    }
}

/// Normally distributed random tensors
///
/// Same binding rules as [`super::Uniform`]: the internal stream seeded at
/// construction serves calls without an explicit `rng`; a call-time `rng`
/// overrides it and leaves it untouched.
pub struct Normal<R: Runtime> {
    client: R::Client,
    stream: RngHandle,
}

impl<R: Runtime> Normal<R>
where
    R::Client: RandomOps<R>,
{
    /// Create an operator with an entropy-seeded internal stream
    pub fn new(device: &R::Device) -> Self {
        Self::from_stream(device, RngHandle::from_entropy())
    }

    /// Create an operator whose internal stream starts from `seed`
    ///
    /// The seed only matters for calls that do not supply an `rng`.
    pub fn with_seed(device: &R::Device, seed: u64) -> Self {
        Self::from_stream(device, RngHandle::new(seed))
    }

    fn from_stream(device: &R::Device, stream: RngHandle) -> Self {
        Self {
            client: R::default_client(device),
            stream,
        }
    }

    /// Produce one sample (`batch_size = None`) or a batch of samples,
    /// drawing from `rng` if supplied and the internal stream otherwise
    pub fn call(
        &mut self,
        args: &NormalArgs,
        batch_size: Option<usize>,
        rng: Option<&mut dyn RngSource>,
    ) -> Result<Output<R>> {
        args.validate()?;
        let count = item_count(batch_size)?;
        let numel: usize = args.shape.iter().product();

        log::debug!(
            "normal: shape={:?} batch_size={:?} dtype={} external_rng={}",
            args.shape,
            batch_size,
            args.dtype,
            rng.is_some(),
        );

        let mut items = Vec::with_capacity(count);
        match resolve_source(&mut self.stream, rng) {
            SourceBinding::Stream(stream) => {
                for _ in 0..count {
                    let tensor = self.client.philox_normal(
                        &args.shape,
                        stream.seed(),
                        stream.cursor(),
                        args.mean,
                        args.stddev,
                        args.dtype,
                    )?;
                    stream.advance(normal_word_cost(numel));
                    items.push(tensor);
                }
            }
            SourceBinding::External(source) => {
                for _ in 0..count {
                    items.push(self.client.normal_from_source(
                        source,
                        args.mean,
                        args.stddev,
                        &args.shape,
                        args.dtype,
                    )?);
                }
            }
        }

        Ok(wrap_output(batch_size, items))
    }
}

/// Functional form of [`Normal`]: construct a fresh entropy-seeded
/// operator and call it once
pub fn normal<R: Runtime>(
    device: &R::Device,
    args: &NormalArgs,
    batch_size: Option<usize>,
    rng: Option<&mut dyn RngSource>,
) -> Result<Output<R>>
where
    R::Client: RandomOps<R>,
{
    Normal::<R>::new(device).call(args, batch_size, rng)
}
