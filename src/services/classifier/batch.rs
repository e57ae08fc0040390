use crate::error::ClassifyError;
use crate::models::classify_types::{BatchOutcome, ProgressSnapshot};
use crate::models::wardrobe_types::ImageRef;
use crate::services::classifier::ImageClassifier;
use futures::stream::{self, StreamExt};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// Runs one classification per image concurrently and partitions the results.
///
/// Clones share the cancel flag, so a clone handed to a signal handler can
/// stop a running batch.
#[derive(Clone, Debug, Default)]
pub struct BatchClassifier {
    max_concurrency: Option<NonZeroUsize>,
    cancel_flag: Arc<AtomicBool>,
    cancel_notify: Arc<Notify>,
}

impl BatchClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` dispatches every image at once.
    pub fn with_max_concurrency(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    pub fn max_concurrency(&self) -> Option<NonZeroUsize> {
        self.max_concurrency
    }

    /// Stops the running batch: in-flight requests are dropped and every
    /// unsettled image is recorded as cancelled. Stays raised until
    /// `reset_cancel_flag`.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
        self.cancel_notify.notify_waiters();
    }

    pub fn reset_cancel_flag(&self) {
        self.cancel_flag.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called.
    async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent cancel is not missed.
            let notified = self.cancel_notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Classifies every image exactly once and waits for all of them to settle.
    ///
    /// `on_progress` runs once per settled image, always from this task, so it
    /// is never re-entered. A panic inside it propagates to the caller.
    ///
    /// The cancel flag is not cleared here; call `reset_cancel_flag` before
    /// reusing a cancelled classifier. Once cancelled, pending and in-flight
    /// images settle as failures with `ClassifyError::Cancelled`.
    pub async fn classify_batch<C, P>(
        &self,
        images: Vec<ImageRef>,
        classifier: &C,
        mut on_progress: P,
    ) -> BatchOutcome
    where
        C: ImageClassifier + ?Sized,
        P: FnMut(ProgressSnapshot),
    {
        let total = images.len();
        let mut outcome = BatchOutcome::with_capacity(total);
        if total == 0 {
            return outcome;
        }

        let limit = self.max_concurrency.map_or(total, NonZeroUsize::get);

        let mut settled = stream::iter(images)
            .map(move |image| async move {
                if self.is_cancelled() {
                    return (image, Err(ClassifyError::Cancelled));
                }
                debug!("Batch analyzing: {}", image.short());
                let result = tokio::select! {
                    biased;
                    _ = self.cancelled() => Err(ClassifyError::Cancelled),
                    result = classifier.classify(&image) => result,
                };
                (image, result)
            })
            .buffer_unordered(limit);

        // Single consumer: counters are only touched here.
        while let Some((image, result)) = settled.next().await {
            match result {
                Ok(mut classification) => {
                    if classification.source_ref != image {
                        warn!(
                            "Classifier answered for {} while analyzing {}",
                            classification.source_ref.short(),
                            image.short()
                        );
                        classification.source_ref = image;
                    }
                    let label = classification.label.clone();
                    outcome.record_success(classification);
                    info!(
                        "Batch item analyzed ({}/{}): {}",
                        outcome.succeeded_count, total, label
                    );
                }
                Err(e) => {
                    warn!("Batch analysis failed for {}: {}", image.short(), e);
                    outcome.record_failure(image);
                }
            }
            on_progress(outcome.snapshot());
        }

        outcome
    }
}
