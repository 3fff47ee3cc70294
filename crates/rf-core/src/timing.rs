//! Lightweight elapsed-time reporting for training and evaluation calls.

use std::time::Instant;

/// A simple timer that measures elapsed time and reports it through `tracing`.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Elapsed seconds since start.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer, emit a debug event and return elapsed seconds.
    pub fn stop(self) -> f64 {
        let elapsed = self.elapsed_s();
        tracing::debug!(label = self.label, elapsed_s = elapsed, "timer stopped");
        elapsed
    }
}
