use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use backdrop_core::pipeline::{PipelineStage, ProgressReporter};

/// Drives one terminal progress bar through every pipeline stage.
pub struct BarProgressReporter {
    bar: ProgressBar,
    current_total: AtomicUsize,
}

impl BarProgressReporter {
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new(1);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:18} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self {
            bar,
            current_total: AtomicUsize::new(1),
        })
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Done");
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl ProgressReporter for BarProgressReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        // Stages without frame reads still show up as a single step.
        let total = total_items.unwrap_or(1).max(1);
        self.current_total.store(total, Ordering::Relaxed);
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        let total = self.current_total.load(Ordering::Relaxed);
        self.bar.set_position(total as u64);
    }
}
