//! Distinct-count estimator estimates number of distinct elements in a stream
//! using bounded memory, following the CVM sampling algorithm:
//! - The stream is consumed exactly once, in order, and never buffered.
//! - The sketch never holds more than `capacity` elements, so memory is `O(capacity)`
//!   regardless of stream length.
//! - Capacity is either given explicitly or derived from an `(epsilon, delta)` accuracy target,
//!   see [`calculate_threshold`](crate::threshold::calculate_threshold).
//!
//! # Accuracy
//! With capacity derived for `(epsilon, delta)` the estimate `C` of `D` distinct elements lies in
//! `[D * (1 - epsilon), D * (1 + epsilon)]` with probability at least `1 - delta`.
//!
//! If capacity is not smaller than the number of elements, no eviction ever happens and
//! the estimate is the exact distinct count.
//!
//! # Example
//! ```
//! use cvm_estimator::{Accuracy, DistinctCounter};
//!
//! let items = [1, 1, 2, 2, 3, 3];
//! let estimate = DistinctCounter::with_accuracy(Accuracy::default())
//!     .seed(42)
//!     .count(items, items.len());
//! assert_eq!(estimate, 3);
//! ```

use std::hash::Hash;

use crate::observer::Observer;
use crate::sketch::Sketch;
use crate::threshold::Accuracy;

/// Result of a completed estimation run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Distinct elements estimate
    pub estimate: usize,
    /// Effective sketch capacity
    pub capacity: usize,
    /// Sketch size at the end of the run
    pub retained: usize,
    /// Number of eviction rounds, each halving keep probability
    pub eviction_rounds: u32,
    /// Final keep probability, equal to `2^-eviction_rounds`
    pub keep_probability: f64,
    /// Number of elements consumed from the stream
    pub elements: usize,
}

/// Memory budget of a run
#[derive(Debug, Clone, Copy, PartialEq)]
enum Budget {
    Capacity(usize),
    Accuracy(Accuracy),
}

/// Configures and runs a single distinct-count estimation.
///
/// Runs consume the counter, so sketch and random generator are never shared between runs.
#[derive(Debug)]
pub struct DistinctCounter<O: Observer = ()> {
    budget: Budget,
    seed: Option<u64>,
    observer: O,
}

impl DistinctCounter {
    /// Creates counter with explicit sketch capacity
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            budget: Budget::Capacity(capacity),
            seed: None,
            observer: (),
        }
    }

    /// Creates counter with sketch capacity derived from accuracy target
    #[inline]
    pub fn with_accuracy(accuracy: Accuracy) -> Self {
        Self {
            budget: Budget::Accuracy(accuracy),
            seed: None,
            observer: (),
        }
    }
}

impl<O: Observer> DistinctCounter<O> {
    /// Seed random generator for reproducible runs. Without seed OS entropy is used.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attach observer to be notified during the run
    #[inline]
    pub fn observer<P: Observer>(self, observer: P) -> DistinctCounter<P> {
        DistinctCounter {
            budget: self.budget,
            seed: self.seed,
            observer,
        }
    }

    /// Consume the whole stream and return the estimate with run statistics.
    ///
    /// `element_count` is the expected number of elements. It only bounds the capacity,
    /// the stream is consumed until exhausted regardless.
    pub fn run<T, I>(mut self, items: I, element_count: usize) -> Summary
    where
        T: Hash + Eq,
        I: IntoIterator<Item = T>,
    {
        let capacity = match self.budget {
            Budget::Capacity(capacity) => capacity,
            Budget::Accuracy(accuracy) => {
                let capacity = accuracy.threshold(element_count);
                self.observer.on_threshold(&accuracy, element_count, capacity);
                capacity
            }
        };

        let mut sketch = Sketch::<T>::new(element_count.min(capacity), self.seed);
        let mut elements = 0;
        for item in items {
            sketch.insert(item, &mut self.observer);
            elements += 1;
        }

        let summary = Summary {
            estimate: sketch.estimate(),
            capacity: sketch.capacity(),
            retained: sketch.len(),
            eviction_rounds: sketch.halvings(),
            keep_probability: sketch.keep_probability(),
            elements,
        };
        self.observer.on_finish(&summary);
        summary
    }

    /// Consume the whole stream and return the distinct elements estimate
    #[inline]
    pub fn count<T, I>(self, items: I, element_count: usize) -> usize
    where
        T: Hash + Eq,
        I: IntoIterator<Item = T>,
    {
        self.run(items, element_count).estimate
    }
}

/// Estimate number of distinct elements using at most `capacity` sketch slots.
///
/// Capacity is clamped to `element_count`. When `seed` is `None` the random generator is
/// seeded from OS entropy.
pub fn estimate_distinct_with_capacity<T, I>(
    items: I,
    element_count: usize,
    capacity: usize,
    seed: Option<u64>,
) -> usize
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let counter = DistinctCounter::with_capacity(capacity);
    match seed {
        Some(seed) => counter.seed(seed).count(items, element_count),
        None => counter.count(items, element_count),
    }
}

/// Estimate number of distinct elements so that the estimate is within relative error `epsilon`
/// with probability at least `1 - delta`.
///
/// Sketch capacity is derived with [`calculate_threshold`](crate::threshold::calculate_threshold).
pub fn estimate_distinct<T, I>(
    items: I,
    element_count: usize,
    epsilon: f64,
    delta: f64,
    seed: Option<u64>,
) -> usize
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let capacity = crate::threshold::calculate_threshold(element_count, epsilon, delta);
    estimate_distinct_with_capacity(items, element_count, capacity, seed)
}
