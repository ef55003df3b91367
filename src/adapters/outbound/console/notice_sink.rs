use crate::ports::outbound::NoticeSink;
use crate::scan_submission::domain::{Notice, NoticeSeverity};
use owo_colors::OwoColorize;

/// ConsoleNoticeSink adapter printing notices to stderr
///
/// A terminal line cannot be taken back, so retraction is only logged.
pub struct ConsoleNoticeSink {
    quiet: bool,
}

impl ConsoleNoticeSink {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppresses everything but errors
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    fn render(notice: &Notice) -> String {
        match notice.severity {
            NoticeSeverity::Success => format!("✅ {}", notice.message.green()),
            NoticeSeverity::Error => format!("❌ {}", notice.message.red().bold()),
            NoticeSeverity::Warning => format!("⚠️  {}", notice.message.yellow()),
            NoticeSeverity::Info => format!("ℹ️  {}", notice.message.cyan()),
        }
    }
}

impl Default for ConsoleNoticeSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeSink for ConsoleNoticeSink {
    fn display(&self, notice: &Notice) {
        if self.quiet && notice.severity != NoticeSeverity::Error {
            log::debug!("notice suppressed: {}", notice.message);
            return;
        }
        eprintln!("{}", Self::render(notice));
    }

    fn retract(&self, notice: &Notice) {
        log::trace!("notice {} retracted", notice.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_contains_message() {
        let notice = Notice::new(
            "Server error. Retrying in 1s...",
            NoticeSeverity::Warning,
            Duration::from_secs(3),
        );
        let rendered = ConsoleNoticeSink::render(&notice);
        assert!(rendered.starts_with("⚠️"));
        assert!(rendered.contains("Server error. Retrying in 1s..."));
    }

    #[test]
    fn test_display_and_retract() {
        let sink = ConsoleNoticeSink::quiet();
        let notice = Notice::new("ok", NoticeSeverity::Success, Duration::ZERO);
        sink.display(&notice);
        sink.retract(&notice);
    }
}
