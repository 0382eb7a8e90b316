// file: src/pipeline/progress.rs
// description: progress bar and counters for sidecar preparation runs
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Outcome of one `make` run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub files_prepared: usize,
    pub files_failed: usize,
    pub sidecars_written: usize,
    pub sidecars_removed: usize,
    pub bytes_read: u64,
    pub duration: Duration,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.files_prepared as f64 / secs
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.files_prepared + self.files_failed;
        if total == 0 {
            return 0.0;
        }
        (self.files_prepared as f64 / total as f64) * 100.0
    }

    pub fn megabytes_read(&self) -> f64 {
        self.bytes_read as f64 / (1024.0 * 1024.0)
    }

    /// One-line report shared by the log summary and the CLI.
    pub fn summary(&self) -> String {
        format!(
            "{} files prepared, {} failed, {} sidecars written ({:.2} MB read in {:.2}s)",
            self.files_prepared,
            self.files_failed,
            self.sidecars_written,
            self.megabytes_read(),
            self.duration.as_secs_f64()
        )
    }
}

#[derive(Default)]
struct Counters {
    prepared: AtomicUsize,
    failed: AtomicUsize,
    sidecars_written: AtomicUsize,
    bytes_read: AtomicU64,
}

/// Shared across preparation tasks; counters are updated without locking.
pub struct ProgressTracker {
    bar: ProgressBar,
    counters: Counters,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        Self::with_color(total_files, true)
    }

    pub fn with_color(total_files: usize, colored: bool) -> Self {
        let bar = ProgressBar::new(total_files as u64);
        let template = if colored {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
        } else {
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
        };

        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars(if colored { "█▓▒░" } else { "=>-" }));
        }

        Self::from_bar(bar)
    }

    /// Counts without drawing anything.
    pub fn hidden(total_files: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_files as u64);
        Self::from_bar(bar)
    }

    fn from_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            counters: Counters::default(),
            start_time: Instant::now(),
        }
    }

    pub fn set_current(&self, relative_path: &str) {
        self.bar.set_message(relative_path.to_string());
    }

    pub fn record_prepared(&self, bytes: u64, sidecars: usize) {
        self.counters.prepared.fetch_add(1, Ordering::SeqCst);
        self.counters
            .sidecars_written
            .fetch_add(sidecars, Ordering::SeqCst);
        self.counters.bytes_read.fetch_add(bytes, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn record_failed(&self) {
        self.counters.failed.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            files_prepared: self.counters.prepared.load(Ordering::SeqCst),
            files_failed: self.counters.failed.load(Ordering::SeqCst),
            sidecars_written: self.counters.sidecars_written.load(Ordering::SeqCst),
            sidecars_removed: 0,
            bytes_read: self.counters.bytes_read.load(Ordering::SeqCst),
            duration: self.start_time.elapsed(),
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}
