//! Progress bar adapter using indicatif.

use indicatif::{ProgressBar, ProgressStyle};

use crate::models::classify_types::ProgressSnapshot;

/// Renders batch progress snapshots on stderr.
pub struct BatchProgressBar {
    bar: Option<ProgressBar>,
}

impl BatchProgressBar {
    /// A disabled bar swallows every update.
    pub fn new(total: usize, enabled: bool) -> Self {
        if !enabled || total == 0 {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message("analyzing...");

        Self { bar: Some(bar) }
    }

    pub fn update(&self, snapshot: ProgressSnapshot) {
        let Some(bar) = &self.bar else {
            return;
        };

        bar.set_position(snapshot.settled() as u64);
        let message = if snapshot.failed > 0 {
            format!("{} ok, {} failed", snapshot.completed, snapshot.failed)
        } else {
            format!("{} ok", snapshot.completed)
        };

        if snapshot.is_complete() {
            bar.finish_with_message(message);
        } else {
            bar.set_message(message);
        }
    }
}
