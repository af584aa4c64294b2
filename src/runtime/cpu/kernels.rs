//! Bulk Philox fill kernels for CPU
//!
//! These kernels generate words `word_base .. word_base + cost` of the
//! stream keyed by `key`, exactly as a stream handle would produce them one
//! call at a time. Counter-based generation makes the chunked parallel fill
//! (`rayon` feature) bit-identical to the sequential one.

use crate::dtype::Element;
use crate::rng::philox::{box_muller, u32_to_uniform, word_at};

/// Elements per parallel chunk
const CHUNK: usize = 4096;

/// Fill `out` with uniform values in `[lo, hi)`
///
/// Element `i` is derived from word `word_base + i`. Consumes exactly `n`
/// words.
///
/// # Safety
/// - `out` must be a valid pointer to `n` elements
pub unsafe fn philox_uniform_kernel<T: Element>(
    out: *mut T,
    n: usize,
    key: u64,
    word_base: u64,
    lo: f64,
    hi: f64,
) {
    let out_slice = unsafe { std::slice::from_raw_parts_mut(out, n) };
    let span = hi - lo;

    let fill = |chunk: &mut [T], start: usize| {
        for (j, slot) in chunk.iter_mut().enumerate() {
            let word = word_at(key, word_base.wrapping_add((start + j) as u64));
            *slot = T::from_f64(lo + span * u32_to_uniform(word));
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        out_slice
            .par_chunks_mut(CHUNK)
            .enumerate()
            .for_each(|(c, chunk)| fill(chunk, c * CHUNK));
    }

    #[cfg(not(feature = "rayon"))]
    fill(out_slice, 0);
}

/// Fill `out` with `N(mean, stddev^2)` values via Box-Muller
///
/// Elements are produced in pairs; pair `p` is derived from words
/// `word_base + 2p` and `word_base + 2p + 1`. A trailing odd element
/// consumes a full pair and keeps `z0`, so the kernel consumes exactly
/// `2 * ceil(n / 2)` words.
///
/// # Safety
/// - `out` must be a valid pointer to `n` elements
pub unsafe fn philox_normal_kernel<T: Element>(
    out: *mut T,
    n: usize,
    key: u64,
    word_base: u64,
    mean: f64,
    stddev: f64,
) {
    let out_slice = unsafe { std::slice::from_raw_parts_mut(out, n) };

    // `chunk` holds whole pairs except possibly a trailing odd element, so
    // `start` is always even and pair alignment is preserved across chunks.
    let fill = |chunk: &mut [T], start: usize| {
        let mut i = 0;
        while i < chunk.len() {
            let word = word_base.wrapping_add((start + i) as u64);
            let u1 = u32_to_uniform(word_at(key, word));
            let u2 = u32_to_uniform(word_at(key, word.wrapping_add(1)));
            let (z0, z1) = box_muller(u1, u2);

            chunk[i] = T::from_f64(mean + stddev * z0);
            if i + 1 < chunk.len() {
                chunk[i + 1] = T::from_f64(mean + stddev * z1);
            }
            i += 2;
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        debug_assert_eq!(CHUNK % 2, 0);
        out_slice
            .par_chunks_mut(CHUNK)
            .enumerate()
            .for_each(|(c, chunk)| fill(chunk, c * CHUNK));
    }

    #[cfg(not(feature = "rayon"))]
    fill(out_slice, 0);
}
