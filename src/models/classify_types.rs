use crate::models::wardrobe_types::{ClassificationResult, ImageRef};
use serde::Serialize;

/// Counters emitted after each image in a batch settles.
///
/// `completed` counts successes only; `settled()` is successes plus failures.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

impl ProgressSnapshot {
    pub fn settled(&self) -> usize {
        self.completed + self.failed
    }

    /// Fraction of the batch that has settled, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.settled() as f64 / self.total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.settled() == self.total
    }
}

/// Final result of one batch. `succeeded` and `failed` are in completion order.
#[derive(Debug, Serialize, Clone, Default)]
pub struct BatchOutcome {
    pub total: usize,
    pub succeeded: Vec<ClassificationResult>,
    pub failed: Vec<ImageRef>,
    pub succeeded_count: usize,
    pub failed_count: usize,
}

impl BatchOutcome {
    pub(crate) fn with_capacity(total: usize) -> Self {
        Self {
            total,
            succeeded: Vec::with_capacity(total),
            failed: Vec::new(),
            succeeded_count: 0,
            failed_count: 0,
        }
    }

    pub(crate) fn record_success(&mut self, result: ClassificationResult) {
        self.succeeded.push(result);
        self.succeeded_count = self.succeeded.len();
    }

    pub(crate) fn record_failure(&mut self, image: ImageRef) {
        self.failed.push(image);
        self.failed_count = self.failed.len();
    }

    pub(crate) fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total,
            completed: self.succeeded_count,
            failed: self.failed_count,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.succeeded_count + self.failed_count == self.total
    }

    pub fn summary(&self) -> String {
        format!(
            "{} succeeded, {} failed",
            self.succeeded_count, self.failed_count
        )
    }
}
