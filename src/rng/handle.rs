//! Seedable, cloneable random stream handle

use super::philox;
use crate::error::{Error, Result};

/// A deterministic random value stream
///
/// An `RngHandle` owns a `(seed, cursor)` pair; each [`next_u32`] call
/// returns Philox word `cursor` of the stream keyed by `seed` and advances
/// the cursor by one. There is no other state: two handles with equal seed
/// and equal cursor produce identical future sequences, forever, under any
/// device or batch context.
///
/// `Clone` deep-copies the state, so a clone taken mid-sequence continues
/// from the same position and both copies advance independently:
///
/// ```
/// use augrand::rng::RngHandle;
///
/// let mut a = RngHandle::new(5678);
/// a.next_u32();
/// let mut b = a.clone();
/// assert_eq!(a.seed(), b.seed());
/// for _ in 0..10 {
///     assert_eq!(a.next_u32(), b.next_u32());
/// }
/// ```
///
/// # Thread safety
///
/// A handle must be advanced by one logical caller at a time; there is no
/// internal locking. To feed multiple workers, give each its own clone.
///
/// [`next_u32`]: RngHandle::next_u32
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RngHandle {
    seed: u64,
    cursor: u64,
}

impl RngHandle {
    /// Create a stream at cursor 0 for the given seed
    pub fn new(seed: u64) -> Self {
        Self { seed, cursor: 0 }
    }

    /// Create a stream with an OS-entropy seed
    ///
    /// Used as the implicit default when an operator is given neither a
    /// `seed` nor an `rng`.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Validate a seed supplied as a signed integer
    ///
    /// Seeds arriving from external configuration are often signed;
    /// negative values are rejected with [`Error::InvalidSeed`] rather than
    /// wrapped.
    pub fn try_from_signed(seed: i64) -> Result<Self> {
        if seed < 0 {
            return Err(Error::InvalidSeed { value: seed });
        }
        Ok(Self::new(seed as u64))
    }

    /// The seed this stream was created with
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current position in the word stream
    #[inline]
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Produce the next word and advance the cursor by one
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let word = philox::word_at(self.seed, self.cursor);
        self.cursor = self.cursor.wrapping_add(1);
        word
    }

    /// Advance the cursor by `n` words without producing them
    ///
    /// Bulk kernels generate words `cursor..cursor + n` directly from the
    /// counter; this records the consumption on the handle afterwards.
    #[inline]
    pub(crate) fn advance(&mut self, n: u64) {
        self.cursor = self.cursor.wrapping_add(n);
    }
}
