//! Deterministic random value streams
//!
//! Counter-based generation: every word is a pure function of
//! `(seed, cursor)`, so equal state means equal future output - across
//! devices, across batch layouts, and across clones.
//!
//! # Design
//!
//! ```text
//! RngHandle (seed + cursor)          user callback (FnMut() -> u64)
//!      │                                   │
//!      │ impl RngSource                    │ RngCallback / TryRngCallback
//!      └───────────────┬───────────────────┘
//!                      ▼
//!            &mut dyn RngSource  ──►  stochastic operators
//! ```
//!
//! Handles are not meant for concurrent mutation: one handle (or clone) per
//! worker. `clone()` is the sanctioned way to hand two consumers
//! identical-but-independent streams.

pub(crate) mod philox;

mod handle;
mod source;

pub use handle::RngHandle;
pub use source::{RngCallback, RngSource, TryRngCallback};
