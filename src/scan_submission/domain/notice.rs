use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NoticeSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeSeverity::Success => write!(f, "success"),
            NoticeSeverity::Error => write!(f, "error"),
            NoticeSeverity::Warning => write!(f, "warning"),
            NoticeSeverity::Info => write!(f, "info"),
        }
    }
}

/// Transient, non-blocking status message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub id: Uuid,
    pub message: String,
    pub severity: NoticeSeverity,
    /// `None` means the notice stays until dismissed
    pub ttl: Option<Duration>,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    /// A zero `ttl` produces a persistent notice.
    pub fn new(message: impl Into<String>, severity: NoticeSeverity, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            ttl: (!ttl.is_zero()).then_some(ttl),
            created_at: Utc::now(),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.ttl.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_ttl_is_persistent() {
        let notice = Notice::new("hello", NoticeSeverity::Info, Duration::ZERO);
        assert!(notice.is_persistent());
    }

    #[test]
    fn test_ttl_is_kept() {
        let notice = Notice::new("hello", NoticeSeverity::Warning, Duration::from_secs(3));
        assert_eq!(notice.ttl, Some(Duration::from_secs(3)));
        assert!(!notice.is_persistent());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Notice::new("a", NoticeSeverity::Info, Duration::ZERO);
        let b = Notice::new("a", NoticeSeverity::Info, Duration::ZERO);
        assert_ne!(a.id, b.id);
    }
}
