//! `cvm-estimator` is a Rust crate designed to estimate the number of distinct elements in a stream or dataset
//! in a single pass with a hard memory ceiling.
//!
//! This library uses the CVM sampling algorithm, whose memory is bounded by a sketch capacity derived from
//! an `(epsilon, delta)` accuracy target, suitable for log analytics, flow counting and data profiling.
pub mod estimator;
pub mod observer;
#[cfg(feature = "with_serde")]
mod serde;
mod sketch;
pub mod threshold;

pub use estimator::{estimate_distinct, estimate_distinct_with_capacity, DistinctCounter, Summary};
pub use observer::Observer;
pub use threshold::{calculate_threshold, Accuracy, AccuracyError};
