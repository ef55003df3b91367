use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};

const UPLOAD_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with the report on stdout.
/// Upload progress is drawn as an indicatif byte bar; a finished bar is
/// replaced by a fresh one when the next attempt starts.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: u64) -> ProgressBar {
        let mut slot = self
            .progress_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(pb) if !pb.is_finished() && pb.length() == Some(total) => pb.clone(),
            _ => {
                let style = ProgressStyle::with_template(UPLOAD_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-");
                let pb = ProgressBar::new(total).with_style(style);
                *slot = Some(pb.clone());
                pb
            }
        }
    }

    fn finish_progress_bar(&self) {
        let slot = self
            .progress_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = slot.as_ref() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: u64, total: u64, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        log::debug!("Scan failed: {}", message);
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("✅ {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_lifecycle() {
        let reporter = StderrProgressReporter::new();
        reporter.report("📤 Uploading report.pdf for analysis...");
        reporter.report_progress(512, 1024, Some("Uploading report.pdf"));
        reporter.report_progress(1024, 1024, None);
        reporter.report_completion("Scan complete");
    }

    #[test]
    fn test_new_bar_after_finish() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(10, 100, None);
        reporter.report_error("Server error (HTTP 500).");

        let pb = reporter.get_or_create_progress_bar(100);
        assert!(!pb.is_finished());
        assert_eq!(pb.position(), 0);
    }

    #[test]
    fn test_zero_length_upload() {
        let reporter = StderrProgressReporter::new();
        reporter.report_progress(0, 0, Some("empty.json"));
        reporter.report_completion("done");
    }
}
