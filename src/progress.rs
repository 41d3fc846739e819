//! Progress-callback trait for per-slide assignment events.
//!
//! Inject an [`Arc<dyn AssignmentProgressCallback>`] via
//! [`crate::config::AssignmentConfigBuilder::progress_callback`] to observe
//! each matcher decision as it is made.
//!
//! # Example
//!
//! ```rust
//! use figslide::{AssignmentConfig, AssignmentProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     assigned: AtomicUsize,
//! }
//!
//! impl AssignmentProgressCallback for CountingCallback {
//!     fn on_figure_assigned(&self, sequence_number: u32, figure_index: usize, relevance: f64) {
//!         self.assigned.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("slide {sequence_number} ← figure {figure_index} ({relevance:.2})");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { assigned: AtomicUsize::new(0) });
//!
//! let config = AssignmentConfig::builder()
//!     .progress_callback(counter as Arc<dyn AssignmentProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::model::AssignmentStats;
use std::sync::Arc;

/// Called by the matcher as it walks the slides.
///
/// Implementations must be `Send + Sync` so one config can be shared by
/// decks processed on different threads. All methods default to no-ops.
pub trait AssignmentProgressCallback: Send + Sync {
    /// Called once before the first slide is considered.
    fn on_assignment_start(&self, total_slides: usize, total_figures: usize) {
        let _ = (total_slides, total_figures);
    }

    /// Called when a slide receives a figure.
    ///
    /// # Arguments
    /// * `sequence_number` — the slide's sequence number
    /// * `figure_index`    — zero-based index of the figure
    /// * `relevance`       — the winning score
    fn on_figure_assigned(&self, sequence_number: u32, figure_index: usize, relevance: f64) {
        let _ = (sequence_number, figure_index, relevance);
    }

    /// Called when a slide falls back to text-only.
    ///
    /// `best_relevance` is `None` when no unused figure was left to score.
    fn on_text_only(&self, sequence_number: u32, best_relevance: Option<f64>) {
        let _ = (sequence_number, best_relevance);
    }

    /// Called once after every slide has been classified.
    fn on_assignment_complete(&self, stats: &AssignmentStats) {
        let _ = stats;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl AssignmentProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::AssignmentConfig`].
pub type ProgressCallback = Arc<dyn AssignmentProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct TrackingCallback {
        assigned: AtomicUsize,
        text_only: Mutex<Vec<(u32, Option<f64>)>>,
        finished: Mutex<Option<AssignmentStats>>,
    }

    impl AssignmentProgressCallback for TrackingCallback {
        fn on_figure_assigned(&self, _seq: u32, _idx: usize, _relevance: f64) {
            self.assigned.fetch_add(1, Ordering::SeqCst);
        }

        fn on_text_only(&self, seq: u32, best: Option<f64>) {
            self.text_only.lock().unwrap().push((seq, best));
        }

        fn on_assignment_complete(&self, stats: &AssignmentStats) {
            *self.finished.lock().unwrap() = Some(*stats);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_assignment_start(3, 2);
        cb.on_figure_assigned(1, 0, 0.7);
        cb.on_text_only(2, Some(0.1));
        cb.on_assignment_complete(&AssignmentStats::default());
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        tracker.on_figure_assigned(1, 0, 0.8);
        tracker.on_text_only(2, None);
        tracker.on_assignment_complete(&AssignmentStats {
            total_slides: 2,
            figure_slides: 1,
            text_slides: 1,
            figures_available: 1,
            figures_unused: 0,
        });

        assert_eq!(tracker.assigned.load(Ordering::SeqCst), 1);
        assert_eq!(*tracker.text_only.lock().unwrap(), vec![(2, None)]);
        let stats = tracker.finished.lock().unwrap().expect("complete called");
        assert_eq!(stats.figure_slides, 1);
    }

    #[test]
    fn arc_dyn_callback_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn AssignmentProgressCallback>();
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_assignment_start(1, 1);
    }
}
