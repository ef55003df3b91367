use crate::shared::error::ErrorKind;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// One network submission of a candidate file.
///
/// Lives only for the duration of a single orchestration call.
#[derive(Debug, Clone)]
pub struct ScanAttempt {
    pub scan_id: Uuid,
    pub file_name: String,
    /// Zero for the original submission, incremented per retry
    pub attempt: u32,
    pub started_at: DateTime<Utc>,
}

impl ScanAttempt {
    pub fn first(scan_id: Uuid, file_name: &str) -> Self {
        Self {
            scan_id,
            file_name: file_name.to_string(),
            attempt: 0,
            started_at: Utc::now(),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            scan_id: self.scan_id,
            file_name: self.file_name.clone(),
            attempt: self.attempt + 1,
            started_at: Utc::now(),
        }
    }
}

/// Lifecycle of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    InFlight { attempt: u32 },
    RetryScheduled { attempt: u32, delay: Duration },
    Succeeded,
    Failed(ErrorKind),
    Cancelled,
}

impl ScanState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScanState::Succeeded | ScanState::Failed(_) | ScanState::Cancelled
        )
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            ScanState::InFlight { .. } | ScanState::RetryScheduled { .. }
        )
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanState::Idle => write!(f, "idle"),
            ScanState::InFlight { attempt } => write!(f, "in flight (attempt {})", attempt + 1),
            ScanState::RetryScheduled { attempt, delay } => write!(
                f,
                "retry {} scheduled in {}ms",
                attempt,
                delay.as_millis()
            ),
            ScanState::Succeeded => write!(f, "succeeded"),
            ScanState::Failed(kind) => write!(f, "failed ({})", kind),
            ScanState::Cancelled => write!(f, "cancelled"),
        }
    }
}
