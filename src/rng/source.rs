//! Random source capability and callback adapters
//!
//! Stochastic operators consume random words through [`RngSource`]: the
//! zero-argument, `u32`-producing capability. A native [`RngHandle`] is a
//! source; so is any user callback wrapped in [`RngCallback`] or
//! [`TryRngCallback`]. The operator layer draws exactly one word per
//! required value through whichever source is bound.

use super::RngHandle;
use crate::error::{Error, Result};

/// A zero-argument source of unsigned 32-bit random words
///
/// The contract with the operator layer: each call returns one word and is
/// free of side effects other than advancing the source's own state. A
/// failing call aborts the operator invocation; nothing is retried, since a
/// retry would silently perturb the stream position.
pub trait RngSource {
    /// Produce the next word
    fn next(&mut self) -> Result<u32>;
}

impl RngSource for RngHandle {
    #[inline]
    fn next(&mut self) -> Result<u32> {
        Ok(self.next_u32())
    }
}

/// Adapts a plain callback into an [`RngSource`]
///
/// The callback returns a raw `u64` so sources producing wider words can be
/// range-checked instead of silently truncated: a value above `u32::MAX`
/// fails the operator call with [`Error::RngCallback`].
///
/// ```
/// use augrand::rng::{RngCallback, RngSource};
///
/// let mut state = 0u64;
/// let mut rng = RngCallback::new(move || {
///     state += 1;
///     state * 12345
/// });
/// assert_eq!(rng.next().unwrap(), 12345);
/// assert_eq!(rng.next().unwrap(), 24690);
/// ```
pub struct RngCallback<F> {
    f: F,
}

impl<F> RngCallback<F>
where
    F: FnMut() -> u64,
{
    /// Wrap a callback
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> RngSource for RngCallback<F>
where
    F: FnMut() -> u64,
{
    fn next(&mut self) -> Result<u32> {
        let word = (self.f)();
        u32::try_from(word).map_err(|_| {
            Error::rng_callback(format!(
                "callback returned {}, outside the unsigned 32-bit domain",
                word
            ))
        })
    }
}

/// Adapts a fallible callback into an [`RngSource`]
///
/// For callbacks that can themselves fail (exhausted replay buffers, closed
/// channels, ...). Failures surface as [`Error::RngCallback`] from the
/// operator call; the operator instance stays reusable afterwards.
pub struct TryRngCallback<F> {
    f: F,
}

impl<F> TryRngCallback<F>
where
    F: FnMut() -> std::result::Result<u32, String>,
{
    /// Wrap a fallible callback
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> RngSource for TryRngCallback<F>
where
    F: FnMut() -> std::result::Result<u32, String>,
{
    fn next(&mut self) -> Result<u32> {
        (self.f)().map_err(Error::rng_callback)
    }
}
