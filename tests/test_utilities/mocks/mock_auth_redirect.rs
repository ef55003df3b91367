use docscan::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock AuthRedirect recording every redirect reason
#[derive(Default, Clone)]
pub struct MockAuthRedirect {
    reasons: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockAuthRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirect_count(&self) -> usize {
        self.reasons.lock().unwrap().len()
    }

    pub fn reasons(&self) -> Vec<String> {
        self.reasons.lock().unwrap().clone()
    }
}

impl AuthRedirect for MockAuthRedirect {
    fn redirect_to_login(&self, reason: &str) {
        self.reasons.lock().unwrap().push(reason.to_string());
    }
}
