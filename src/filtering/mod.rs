//! Spurious-event detection: distance histograms, adaptive threshold
//! estimation, and the streaming filter pass.
//!
//! Filtering is two-pass: a bounded first pass over the library builds an
//! [`EventHistogram`] from which [`Thresholds`] are estimated, then a full
//! second pass classifies every pair and writes the kept ones. An
//! interactive caller can run the two halves independently, rendering the
//! histogram and supplying its own thresholds.

pub mod engine;
pub mod histogram;
pub mod thresholds;

pub use engine::{classify, filter_pairs, PairClass};
pub use histogram::{EventHistogram, ESTIMATION_PAIRS, MAX_SITES};
pub use thresholds::{ThresholdError, Thresholds};
