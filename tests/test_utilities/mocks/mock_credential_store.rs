use docscan::prelude::*;
use std::sync::{Arc, Mutex};

/// In-memory CredentialStore; clones share the stored session
#[derive(Default, Clone)]
pub struct MockCredentialStore {
    record: Arc<Mutex<Option<SessionRecord>>>,
}

#[allow(dead_code)]
impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.record.lock().unwrap() = Credential::new(token).map(|token| SessionRecord {
            token,
            identity: None,
        });
        store
    }

    pub fn stored_token(&self) -> Option<String> {
        self.record
            .lock()
            .unwrap()
            .as_ref()
            .map(|record| record.token.as_str().to_string())
    }
}

impl CredentialStore for MockCredentialStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        Ok(self.record.lock().unwrap().clone())
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        *self.record.lock().unwrap() = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}
