//! ## Threshold calculation
//! Derives the sketch capacity needed to meet an `(epsilon, delta)` accuracy target:
//!
//! `capacity = ceil(12 / epsilon^2 * ln(8 * n / delta))`, capped at `n`.
//!
//! With a sketch of that capacity, the estimate `C` of `D` distinct elements satisfies
//! `D * (1 - epsilon) <= C <= D * (1 + epsilon)` with probability at least `1 - delta`.
//! Worst-case space scales with `1 / epsilon^2`.

use thiserror::Error;

/// Lowest value `epsilon` and `delta` are clamped to before use.
pub const MIN_ACCURACY: f64 = 0.0001;
/// Default relative error bound
pub const DEFAULT_EPSILON: f64 = 0.05;
/// Default failure probability
pub const DEFAULT_DELTA: f64 = 0.05;

/// Accuracy validation error returned by the strict constructor
#[derive(Debug, Error, PartialEq)]
pub enum AccuracyError {
    #[error("epsilon must be a finite value in (0, 1), got {0}")]
    InvalidEpsilon(f64),
    #[error("delta must be a finite value in (0, 1), got {0}")]
    InvalidDelta(f64),
}

/// Accuracy target: relative error bound `epsilon` and failure probability `delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    epsilon: f64,
    delta: f64,
}

impl Accuracy {
    /// Create accuracy target, clamping both parameters to at least [`MIN_ACCURACY`].
    #[inline]
    pub fn new(epsilon: f64, delta: f64) -> Self {
        // `f64::max` picks the non-NaN operand, so NaN is clamped as well
        Self {
            epsilon: epsilon.max(MIN_ACCURACY),
            delta: delta.max(MIN_ACCURACY),
        }
    }

    /// Create accuracy target, rejecting values outside of `(0, 1)` instead of clamping them.
    pub fn try_new(epsilon: f64, delta: f64) -> Result<Self, AccuracyError> {
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(AccuracyError::InvalidEpsilon(epsilon));
        }
        if !(delta > 0.0 && delta < 1.0) {
            return Err(AccuracyError::InvalidDelta(delta));
        }
        Ok(Self::new(epsilon, delta))
    }

    /// Relative error bound
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Failure probability
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Sketch capacity required for this accuracy over `element_count` elements
    #[inline]
    pub fn threshold(&self, element_count: usize) -> usize {
        calculate_threshold(element_count, self.epsilon, self.delta)
    }
}

impl Default for Accuracy {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON, DEFAULT_DELTA)
    }
}

/// Calculate the sketch capacity used by the distinct-count estimator for the given accuracy.
///
/// `epsilon` and `delta` are clamped to [`MIN_ACCURACY`], and the result never exceeds
/// `element_count`: a sketch never needs more slots than there are elements.
pub fn calculate_threshold(element_count: usize, epsilon: f64, delta: f64) -> usize {
    if element_count == 0 {
        return 0;
    }
    let epsilon = epsilon.max(MIN_ACCURACY);
    let delta = delta.max(MIN_ACCURACY);

    let threshold = (12.0 / epsilon.powi(2) * (8.0 * element_count as f64 / delta).ln()).ceil();
    // float to int casts saturate, so an oversized threshold collapses to `usize::MAX`
    element_count.min(threshold as usize)
}
