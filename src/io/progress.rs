//! Terminal progress display for segmentation runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::segmentation::SegmentationProgress;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells ({{elapsed_precise}})"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking cells claimed by the flood fill
pub struct SegmentationProgressBar {
    bar: ProgressBar,
}

impl SegmentationProgressBar {
    /// Create a bar for a grid with `cells_total` cells
    pub fn new(cells_total: usize) -> Self {
        let bar = ProgressBar::new(cells_total as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message("Segmenting");
        Self { bar }
    }

    /// Reflect a progress snapshot
    pub fn update(&self, progress: &SegmentationProgress) {
        self.bar.set_length(progress.cells_total as u64);
        self.bar.set_position(progress.cells_assigned as u64);
        self.bar
            .set_message(format!("{} grains", progress.grains_found));
    }

    /// Current position in cells
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish and leave the final state on screen
    pub fn finish(&self) {
        self.bar.finish_with_message("Segmentation complete");
    }
}
