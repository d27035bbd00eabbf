//! Phase-by-phase progress display for corpus decoding and per-pixel fitting

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows one progress bar per pipeline phase
///
/// Advancing is safe from worker threads; starting and finishing phases is not
pub struct ProgressManager {
    multi_progress: MultiProgress,
    phase_bar: Option<ProgressBar>,
    completed_phases: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            phase_bar: None,
            completed_phases: 0,
        }
    }

    /// Begin a phase of `total` steps, finishing any phase still running
    pub fn start_phase(&mut self, label: &str, total: usize) {
        self.finish_phase();
        let bar = ProgressBar::new(total as u64);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_prefix(label.to_string());
        self.phase_bar = Some(self.multi_progress.add(bar));
    }

    /// Record `steps` completed steps in the current phase
    pub fn advance(&self, steps: usize) {
        if let Some(ref bar) = self.phase_bar {
            bar.inc(steps as u64);
        }
    }

    /// Position of the current phase, if one is running
    pub fn position(&self) -> Option<u64> {
        self.phase_bar.as_ref().map(ProgressBar::position)
    }

    /// Mark the current phase complete
    pub fn finish_phase(&mut self) {
        if let Some(bar) = self.phase_bar.take() {
            bar.finish();
            self.completed_phases += 1;
        }
    }

    /// Number of phases finished so far
    pub const fn completed_phases(&self) -> usize {
        self.completed_phases
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        self.finish_phase();
        let _ = self.multi_progress.clear();
    }
}
