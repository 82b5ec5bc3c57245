//! Observer hook invoked by the estimator at well-defined points of a run.
//!
//! The default observer is `()`, whose empty methods compile away entirely.

use crate::estimator::Summary;
use crate::threshold::Accuracy;

/// Observer trait which may be implemented to inspect estimation runs.
pub trait Observer {
    /// Called after sketch capacity was derived from an accuracy target
    #[inline]
    fn on_threshold(&mut self, _accuracy: &Accuracy, _element_count: usize, _capacity: usize) {}

    /// Called after every eviction round with the round number and remaining sketch size
    #[inline]
    fn on_eviction(&mut self, _round: u32, _retained: usize) {}

    /// Called once after the whole stream was consumed
    #[inline]
    fn on_finish(&mut self, _summary: &Summary) {}
}

impl Observer for () {}

impl<O: Observer + ?Sized> Observer for &mut O {
    #[inline]
    fn on_threshold(&mut self, accuracy: &Accuracy, element_count: usize, capacity: usize) {
        (**self).on_threshold(accuracy, element_count, capacity)
    }

    #[inline]
    fn on_eviction(&mut self, round: u32, retained: usize) {
        (**self).on_eviction(round, retained)
    }

    #[inline]
    fn on_finish(&mut self, summary: &Summary) {
        (**self).on_finish(summary)
    }
}
