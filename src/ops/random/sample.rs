//! Sequential host-side sampling from an `RngSource`
//!
//! One source invocation per required word, in element order. The math is
//! shared with the bulk kernels through [`crate::rng::philox`], so feeding
//! a handle through these functions is bit-identical to the bulk path at
//! the same cursor.

use crate::error::{Error, Result};
use crate::rng::RngSource;
use crate::rng::philox::{box_muller, u32_to_uniform};

/// `n` uniform samples in `[lo, hi)`, one word each
pub(crate) fn uniform(source: &mut dyn RngSource, n: usize, lo: f64, hi: f64) -> Result<Vec<f64>> {
    let span = hi - lo;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(lo + span * u32_to_uniform(source.next()?));
    }
    Ok(out)
}

/// `n` samples drawn uniformly from `values`, one word each
pub(crate) fn discrete(source: &mut dyn RngSource, n: usize, values: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(Error::invalid_argument(
            "values",
            "discrete distribution needs at least one value",
        ));
    }
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let index = source.next()? as usize % values.len();
        out.push(values[index]);
    }
    Ok(out)
}

/// `n` samples of `N(mean, stddev^2)` via Box-Muller, a word pair per
/// element pair; a trailing odd element consumes a full pair
pub(crate) fn normal(
    source: &mut dyn RngSource,
    n: usize,
    mean: f64,
    stddev: f64,
) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let u1 = u32_to_uniform(source.next()?);
        let u2 = u32_to_uniform(source.next()?);
        let (z0, z1) = box_muller(u1, u2);

        out.push(mean + stddev * z0);
        if out.len() < n {
            out.push(mean + stddev * z1);
        }
    }
    Ok(out)
}
