//! Progress tracking and rendering for a merge run.
//!
//! The reporter moves through three phases: scanning (summary lines only),
//! transferring (live bars), and done (final summary). In copy mode the
//! display is two lines: an aggregate bar plus a bar for the file
//! currently streaming; in move mode only the aggregate line exists, since
//! moves complete in one step.
//!
//! Redraws are throttled to one per 50 ms; finishing a bar always renders
//! the final 100% state regardless of the throttle.

use crate::output::OutputFormatter;
use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Redraw rate cap: 20 Hz, i.e. at most one redraw per 50 ms.
const REDRAW_RATE_HZ: u8 = 20;

/// Maximum width of the current-file label.
const FILE_LABEL_WIDTH: usize = 15;

/// Tracks aggregate and per-file byte counters and renders the throttled
/// progress display. One instance per run; counters start at zero.
pub struct ProgressReporter {
    multi: MultiProgress,
    overall: ProgressBar,
    file: Option<ProgressBar>,
    processed_bytes: u64,
    current_file_size: u64,
}

impl ProgressReporter {
    /// Announces the start of the scanning phase.
    pub fn report_scan_begin() {
        OutputFormatter::info("Scanning source folders to calculate total size...");
    }

    /// Announces the end of the scanning phase with its totals.
    pub fn report_scan_complete(file_count: usize, total_bytes: u64) {
        OutputFormatter::plain(&format!(
            "Scan complete. Found {} files ({}).",
            file_count,
            HumanBytes(total_bytes)
        ));
    }

    /// Creates the transfer-phase display. `dual` selects the two-line
    /// copy-mode layout with a live current-file bar.
    pub fn new(total_bytes: u64, dual: bool) -> Self {
        let multi =
            MultiProgress::with_draw_target(ProgressDrawTarget::stderr_with_hz(REDRAW_RATE_HZ));

        let overall = multi.add(ProgressBar::new(total_bytes));
        overall.set_style(bar_style());
        overall.set_prefix(format!("{:>width$}", "Total", width = FILE_LABEL_WIDTH));

        let file = dual.then(|| {
            let bar = multi.add(ProgressBar::new(0));
            bar.set_style(bar_style());
            bar
        });

        Self {
            multi,
            overall,
            file,
            processed_bytes: 0,
            current_file_size: 0,
        }
    }

    /// Begins tracking a file that is about to stream.
    pub fn start_file(&mut self, file_name: &str, size: u64) {
        self.current_file_size = size;
        if let Some(bar) = &self.file {
            bar.reset();
            bar.set_length(size);
            bar.set_prefix(file_label(file_name));
        }
    }

    /// Records partial progress of the currently streaming file.
    pub fn update_file(&self, bytes_so_far: u64) {
        if let Some(bar) = &self.file {
            bar.set_position(bytes_so_far);
        }
        self.overall.set_position(self.processed_bytes + bytes_so_far);
    }

    /// Folds the current file's size into the aggregate counter.
    pub fn finish_file(&mut self) {
        self.processed_bytes += self.current_file_size;
        self.current_file_size = 0;
        if let Some(bar) = &self.file {
            bar.set_position(bar.length().unwrap_or(0));
        }
        self.overall.set_position(self.processed_bytes);
    }

    /// Records a file handled in a single step (a move, a skip, or a
    /// failure whose size must still count towards the total).
    pub fn file_processed(&mut self, size: u64) {
        self.processed_bytes += size;
        self.overall.set_position(self.processed_bytes);
    }

    /// Prints a line above the live bars without tearing them.
    pub fn println(&self, message: &str) {
        let _ = self.multi.println(message);
    }

    /// Pauses rendering for the duration of `f`, used for the blocking
    /// unknown-file prompt. Rendering resumes when `f` returns.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.multi.suspend(f)
    }

    /// Renders the final 100% state and releases the display.
    pub fn finish(&self) {
        if let Some(bar) = &self.file {
            bar.finish_and_clear();
        }
        self.overall.finish();
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:50.cyan/blue}] {percent:>3}% ({bytes} / {total_bytes})")
        .expect("Invalid progress bar template")
        .progress_chars("█▓░")
}

/// Pads or truncates a file name to the fixed label width.
fn file_label(file_name: &str) -> String {
    let label: String = if file_name.chars().count() > FILE_LABEL_WIDTH {
        let head: String = file_name.chars().take(FILE_LABEL_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        file_name.to_string()
    };
    format!("{:>width$}", label, width = FILE_LABEL_WIDTH)
}
