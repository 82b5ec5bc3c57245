//! ## Sketch
//! Capacity-bounded sample of stream elements together with the probability `p`
//! with which every element seen so far is expected to be retained.
//!
//! Each processed element is first removed from the sample and then re-inserted
//! with probability `p` using a fresh random draw, so membership never depends on
//! stale earlier draws. Once the sample overflows its capacity an eviction round keeps
//! every element with independent probability 1/2 and halves `p`.
//!
//! Rounds repeat until the sample fits again, so the sample holds at most `capacity`
//! elements after every processed element, and a sketch whose capacity covers the whole
//! stream never evicts. A zero capacity sketch retains nothing.

use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wyhash::WyHash;

use crate::observer::Observer;

/// Uniform `[0, 1)` sampler backed by a seedable PRNG
pub(crate) struct UnitSampler(StdRng);

impl UnitSampler {
    /// Create sampler from explicit seed or, when absent, from OS entropy
    pub(crate) fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }

    /// Draw next value in `[0, 1)`
    #[inline]
    pub(crate) fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Sketch maintained during a single estimation pass.
///
/// Hasher defaults to unseeded `WyHash` so that set iteration order, and with it the
/// assignment of eviction coins to elements, only depends on the PRNG seed.
pub(crate) struct Sketch<T, S = BuildHasherDefault<WyHash>> {
    retained: HashSet<T, S>,
    keep_probability: f64,
    halvings: u32,
    capacity: usize,
    sampler: UnitSampler,
}

impl<T: Hash + Eq, S: BuildHasher + Default> Sketch<T, S> {
    /// Create empty sketch with `p = 1`
    pub(crate) fn new(capacity: usize, seed: Option<u64>) -> Self {
        Self {
            retained: HashSet::with_hasher(S::default()),
            keep_probability: 1.0,
            halvings: 0,
            capacity,
            sampler: UnitSampler::new(seed),
        }
    }

    /// Process next stream element
    #[inline]
    pub(crate) fn insert<O: Observer>(&mut self, item: T, observer: &mut O) {
        if self.capacity == 0 {
            return;
        }

        self.retained.remove(&item);
        if self.sampler.next_unit() < self.keep_probability {
            self.retained.insert(item);
        }

        while self.retained.len() > self.capacity {
            self.evict();
            observer.on_eviction(self.halvings, self.retained.len());
        }
    }

    /// Keep every retained element with independent probability 1/2, then halve `p`
    fn evict(&mut self) {
        let sampler = &mut self.sampler;
        self.retained.retain(|_| sampler.next_unit() < 0.5);
        self.keep_probability /= 2.0;
        self.halvings += 1;
    }

    /// Return cardinality estimate `round(|retained| / p)`
    #[inline]
    pub(crate) fn estimate(&self) -> usize {
        (self.retained.len() as f64 / self.keep_probability).round() as usize
    }

    /// Number of retained elements
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.retained.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn keep_probability(&self) -> f64 {
        self.keep_probability
    }

    /// Number of eviction rounds performed, `p = 2^-halvings`
    #[inline]
    pub(crate) fn halvings(&self) -> u32 {
        self.halvings
    }
}

impl<T: Hash + Eq, S: BuildHasher + Default> Debug for Sketch<T, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ capacity: {}, retained: {}, halvings: {}, estimate: {} }}",
            self.capacity(),
            self.len(),
            self.halvings(),
            self.estimate()
        )
    }
}
