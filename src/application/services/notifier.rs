use crate::ports::outbound::NoticeSink;
use crate::scan_submission::domain::{Notice, NoticeSeverity};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use uuid::Uuid;

/// Lifetime of a notice shown without an explicit ttl
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

struct NotifierInner {
    sink: Box<dyn NoticeSink>,
    current: Mutex<Option<Notice>>,
}

impl NotifierInner {
    fn lock(&self) -> MutexGuard<'_, Option<Notice>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expire(&self, id: Uuid) {
        let mut current = self.lock();
        if current.as_ref().is_some_and(|notice| notice.id == id) {
            if let Some(notice) = current.take() {
                self.sink.retract(&notice);
            }
        }
    }
}

/// EphemeralNotifier holds the single active notice.
///
/// A new notice replaces the active one. Timed notices are retracted by a
/// background timer on the current tokio runtime; a timer belonging to a
/// replaced notice does nothing when it fires.
#[derive(Clone)]
pub struct EphemeralNotifier {
    inner: Arc<NotifierInner>,
    default_ttl: Duration,
}

impl EphemeralNotifier {
    pub fn new(sink: impl NoticeSink + 'static) -> Self {
        Self::with_default_ttl(sink, DEFAULT_NOTICE_TTL)
    }

    /// A zero `default_ttl` makes every default notice persistent.
    pub fn with_default_ttl(sink: impl NoticeSink + 'static, default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                sink: Box::new(sink),
                current: Mutex::new(None),
            }),
            default_ttl,
        }
    }

    /// Shows a notice with the default ttl
    pub fn notify(&self, message: impl Into<String>, severity: NoticeSeverity) -> Uuid {
        self.show(message, severity, self.default_ttl)
    }

    /// Shows a notice for `ttl`; `Duration::ZERO` keeps it until dismissed.
    pub fn show(&self, message: impl Into<String>, severity: NoticeSeverity, ttl: Duration) -> Uuid {
        let notice = Notice::new(message, severity, ttl);
        let id = notice.id;

        {
            let mut current = self.inner.lock();
            if let Some(previous) = current.take() {
                self.inner.sink.retract(&previous);
            }
            self.inner.sink.display(&notice);
            *current = Some(notice);
        }

        if !ttl.is_zero() {
            self.schedule_expiry(id, ttl);
        }
        id
    }

    fn schedule_expiry(&self, id: Uuid, ttl: Duration) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            log::debug!("No async runtime; notice {} stays until dismissed", id);
            return;
        };

        let inner: Weak<NotifierInner> = Arc::downgrade(&self.inner);
        handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = inner.upgrade() {
                inner.expire(id);
            }
        });
    }

    /// Retracts the active notice immediately
    pub fn dismiss(&self) {
        let mut current = self.inner.lock();
        if let Some(notice) = current.take() {
            self.inner.sink.retract(&notice);
        }
    }

    pub fn current(&self) -> Option<Notice> {
        self.inner.lock().clone()
    }
}
