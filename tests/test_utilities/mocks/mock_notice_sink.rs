use docscan::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock NoticeSink recording displayed notices
#[derive(Default, Clone)]
pub struct MockNoticeSink {
    shown: Arc<Mutex<Vec<Notice>>>,
}

#[allow(dead_code)]
impl MockNoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.shown.lock().unwrap().clone()
    }

    pub fn messages(&self, severity: NoticeSeverity) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .filter(|notice| notice.severity == severity)
            .map(|notice| notice.message.clone())
            .collect()
    }
}

impl NoticeSink for MockNoticeSink {
    fn display(&self, notice: &Notice) {
        self.shown.lock().unwrap().push(notice.clone());
    }

    fn retract(&self, _notice: &Notice) {}
}
