//! Uniform distribution operator

use super::{Output, SourceBinding, item_count, resolve_source, wrap_output};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::RandomOps;
use crate::rng::{RngHandle, RngSource};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Call arguments for the [`Uniform`] operator
///
/// By default samples are drawn from the continuous range `[-1, 1)`.
/// Supplying `values` switches to a discrete uniform distribution over the
/// given set; `range` and `values` are mutually exclusive.
#[derive(Clone, Debug)]
pub struct UniformArgs {
    shape: Vec<usize>,
    dtype: DType,
    range: Option<[f64; 2]>,
    values: Option<Vec<f64>>,
}

/// Default sampling range `[min, max)` of the continuous distribution
const DEFAULT_RANGE: [f64; 2] = [-1.0, 1.0];

impl UniformArgs {
    /// Arguments for the given per-item output shape, with default range
    /// and `F32` output
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            dtype: DType::F32,
            range: None,
            values: None,
        }
    }

    /// Sample from the continuous range `[lo, hi)`
    pub fn range(mut self, lo: f64, hi: f64) -> Self {
        self.range = Some([lo, hi]);
        self
    }

    /// Sample from a discrete set of values (mutually exclusive with
    /// `range`)
    pub fn values(mut self, values: impl Into<Vec<f64>>) -> Self {
        self.values = Some(values.into());
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

    fn validate(&self) -> Result<UniformDist<'_>> {
        match (&self.range, &self.values) {
            (Some(_), Some(_)) => Err(Error::ConfigConflict {
                first: "range",
                second: "values",
            }),
            (_, Some(values)) => {
                if values.is_empty() {
                    return Err(Error::invalid_argument(
                        "values",
                        "discrete distribution needs at least one value",
                    ));
                }
                Ok(UniformDist::Values(values))
            }
            (range, None) => {
                let [lo, hi] = range.unwrap_or(DEFAULT_RANGE);
                let valid = lo.is_finite() && hi.is_finite() && lo < hi;
                if !valid {
                    return Err(Error::invalid_argument(
                        "range",
                        format!("expected finite min < max, got [{}, {})", lo, hi),
                    ));
                }
                Ok(UniformDist::Range { lo, hi })
            }
        }
    }
}

enum UniformDist<'a> {
    Range { lo: f64, hi: f64 },
    Values(&'a [f64]),
}

/// Uniformly distributed random tensors
///
/// The operator owns an internal random stream seeded at construction;
/// calls that pass an explicit `rng` use it instead and leave the internal
/// stream untouched. Instances are created once and reused across calls; a
/// failed call leaves the operator usable.
pub struct Uniform<R: Runtime> {
    client: R::Client,
    stream: RngHandle,
}

impl<R: Runtime> Uniform<R>
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
        args: &UniformArgs,
        batch_size: Option<usize>,
        rng: Option<&mut dyn RngSource>,
    ) -> Result<Output<R>> {
        let dist = args.validate()?;
        let count = item_count(batch_size)?;

        log::debug!(
            "uniform: shape={:?} batch_size={:?} dtype={} external_rng={}",
            args.shape,
            batch_size,
            args.dtype,
            rng.is_some(),
        );

        let mut items = Vec::with_capacity(count);
        match resolve_source(&mut self.stream, rng) {
            SourceBinding::Stream(stream) => {
                for _ in 0..count {
                    items.push(uniform_item_bulk(
                        &self.client,
                        stream,
                        &dist,
                        &args.shape,
                        args.dtype,
                    )?);
                }
            }
            SourceBinding::External(source) => {
                for _ in 0..count {
                    items.push(uniform_item_from_source(
                        &self.client,
                        source,
                        &dist,
                        &args.shape,
                        args.dtype,
                    )?);
                }
            }
        }

        Ok(wrap_output(batch_size, items))
    }
}

/// One sample from the operator's own stream, using the bulk kernels where
/// the distribution allows
fn uniform_item_bulk<R: Runtime>(
    client: &R::Client,
    stream: &mut RngHandle,
    dist: &UniformDist<'_>,
    shape: &[usize],
    dtype: DType,
) -> Result<Tensor<R>>
where
    R::Client: RandomOps<R>,
{
    match dist {
        UniformDist::Range { lo, hi } => {
            let tensor =
                client.philox_uniform(shape, stream.seed(), stream.cursor(), *lo, *hi, dtype)?;
            stream.advance(tensor.numel() as u64);
            Ok(tensor)
        }
        // Discrete draws go through the sequential path; the handle is
        // itself a source, so the cursor advances exactly as consumed.
        UniformDist::Values(values) => client.discrete_from_source(stream, values, shape, dtype),
    }
}

/// One sample from a caller-supplied source
fn uniform_item_from_source<R: Runtime>(
    client: &R::Client,
    source: &mut dyn RngSource,
    dist: &UniformDist<'_>,
    shape: &[usize],
    dtype: DType,
) -> Result<Tensor<R>>
where
    R::Client: RandomOps<R>,
{
    match dist {
        UniformDist::Range { lo, hi } => client.uniform_from_source(source, *lo, *hi, shape, dtype),
        UniformDist::Values(values) => client.discrete_from_source(source, values, shape, dtype),
    }
}

/// Functional form of [`Uniform`]: construct a fresh entropy-seeded
/// operator and call it once
pub fn uniform<R: Runtime>(
    device: &R::Device,
    args: &UniformArgs,
    batch_size: Option<usize>,
    rng: Option<&mut dyn RngSource>,
) -> Result<Output<R>>
where
    R::Client: RandomOps<R>,
{
    Uniform::<R>::new(device).call(args, batch_size, rng)
}
