//! Stochastic operator objects and functional API
//!
//! Two equivalent surfaces, mirroring how augmentation pipelines consume
//! these operators:
//!
//! - **Operator objects** - construct once (optionally with a seed), call
//!   many times: [`Uniform`], [`Normal`].
//! - **Functional** - one-shot calls: [`uniform`], [`normal`].
//!
//! # Random source binding
//!
//! An operator owns an internal stream, seeded at construction (explicitly
//! or from entropy). Every call resolves its source anew: a call-time
//! `rng` always overrides the internal stream, which is then neither
//! consulted nor advanced for that call. A construction-time seed has no
//! observable effect on calls that supply an `rng`.

pub(crate) mod sample;

mod normal;
mod uniform;

pub use normal::{Normal, NormalArgs, normal};
pub use uniform::{Uniform, UniformArgs, uniform};

use crate::batch::Batch;
use crate::error::{Error, Result};
use crate::rng::{RngHandle, RngSource};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Result of a stochastic operator call
///
/// `batch_size = None` produces a single item; `batch_size = Some(n)`
/// produces a batch of `n` items, each with the operator's declared
/// per-item shape.
#[derive(Debug)]
pub enum Output<R: Runtime> {
    /// A single sample
    Item(Tensor<R>),
    /// A batch of samples
    Batch(Batch<R>),
}

impl<R: Runtime> Output<R> {
    /// True if this is a batched result
    pub fn is_batch(&self) -> bool {
        matches!(self, Output::Batch(_))
    }

    /// Borrow the single sample, if unbatched
    pub fn item(&self) -> Option<&Tensor<R>> {
        match self {
            Output::Item(t) => Some(t),
            Output::Batch(_) => None,
        }
    }

    /// Borrow the batch, if batched
    pub fn batch(&self) -> Option<&Batch<R>> {
        match self {
            Output::Item(_) => None,
            Output::Batch(b) => Some(b),
        }
    }

    /// Consume into the single sample, if unbatched
    pub fn into_item(self) -> Option<Tensor<R>> {
        match self {
            Output::Item(t) => Some(t),
            Output::Batch(_) => None,
        }
    }

    /// Consume into the batch, if batched
    pub fn into_batch(self) -> Option<Batch<R>> {
        match self {
            Output::Item(_) => None,
            Output::Batch(b) => Some(b),
        }
    }
}

/// The random source a single call is bound to
///
/// The two lifetimes keep the operator's stream borrow independent of the
/// caller's source borrow.
pub(crate) enum SourceBinding<'s, 'r> {
    /// The operator's own seeded stream
    Stream(&'s mut RngHandle),
    /// A caller-supplied source, for this call only
    External(&'r mut dyn RngSource),
}

/// Resolve which random source a call uses
///
/// Precedence: a call-time `rng` always wins. The construction-time stream
/// is used only when no `rng` is supplied; a call with an external source
/// leaves it untouched, so the seed given at construction is dead for that
/// call.
pub(crate) fn resolve_source<'s, 'r>(
    stream: &'s mut RngHandle,
    rng: Option<&'r mut dyn RngSource>,
) -> SourceBinding<'s, 'r> {
    match rng {
        Some(external) => SourceBinding::External(external),
        None => SourceBinding::Stream(stream),
    }
}

/// Validate a batch size and return the number of items to produce
pub(crate) fn item_count(batch_size: Option<usize>) -> Result<usize> {
    match batch_size {
        None => Ok(1),
        Some(0) => Err(Error::invalid_argument(
            "batch_size",
            "batch size must be positive",
        )),
        Some(n) => Ok(n),
    }
}

/// Wrap produced items according to the requested batch mode
pub(crate) fn wrap_output<R: Runtime>(
    batch_size: Option<usize>,
    mut items: Vec<Tensor<R>>,
) -> Output<R> {
    match batch_size {
        None => Output::Item(items.pop().expect("item_count produced one item")),
        Some(_) => Output::Batch(Batch::new(items)),
    }
}
