use crate::ports::outbound::{AuthRedirect, CredentialStore};
use crate::scan_submission::domain::{Credential, Identity, SessionRecord};
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// SessionGuard owns the process-wide session.
///
/// It is initialized from the credential store at startup, mutated on
/// login, and torn down on logout or authentication failure. No other
/// component reads the store directly.
///
/// # Concurrency
/// Clearing after a `401` is a compare-and-clear against the credential the
/// failing request carried, so when several in-flight requests fail with
/// the same credential only the first one clears the session and fires the
/// redirect.
pub struct SessionGuard {
    store: Box<dyn CredentialStore>,
    redirect: Box<dyn AuthRedirect>,
    session: Mutex<Option<SessionRecord>>,
}

impl SessionGuard {
    /// Loads the persisted session.
    ///
    /// An unreadable store is treated as "logged out" after a warning so a
    /// corrupt session file never blocks the client.
    pub fn initialize(
        store: impl CredentialStore + 'static,
        redirect: impl AuthRedirect + 'static,
    ) -> Self {
        let session = match store.load() {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Ignoring unreadable session store: {:#}", e);
                None
            }
        };

        Self {
            store: Box::new(store),
            redirect: Box::new(redirect),
            session: Mutex::new(session),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<SessionRecord>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_credential(&self) -> Option<Credential> {
        self.lock().as_ref().map(|record| record.token.clone())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.lock().as_ref().and_then(|record| record.identity.clone())
    }

    /// Credential for a request that cannot proceed anonymously.
    ///
    /// # Errors
    /// `ScanError::AuthenticationRequired` when no session exists.
    pub fn require_credential(&self) -> std::result::Result<Credential, ScanError> {
        self.current_credential()
            .ok_or(ScanError::AuthenticationRequired)
    }

    /// Value for the `Authorization` header, when a session exists
    pub fn authorization_header(&self) -> Option<String> {
        self.current_credential().map(|credential| credential.bearer())
    }

    /// Replaces the token, keeping no identity. `None` clears the session.
    pub fn set_credential(&self, credential: Option<Credential>) -> Result<()> {
        match credential {
            Some(token) => self.establish(token, None),
            None => self.logout(),
        }
    }

    /// Stores a fresh session after a successful login
    pub fn establish(&self, token: Credential, identity: Option<Identity>) -> Result<()> {
        let record = SessionRecord { token, identity };
        let mut session = self.lock();
        self.store.save(&record)?;
        *session = Some(record);
        Ok(())
    }

    /// Explicit logout: clears memory and the persisted session
    pub fn logout(&self) -> Result<()> {
        let mut session = self.lock();
        self.store.clear()?;
        *session = None;
        Ok(())
    }

    /// Reacts to an authentication failure of a request sent with `used`.
    ///
    /// Returns `true` if this call cleared the session and fired the
    /// redirect, `false` if the session was already cleared or replaced.
    pub fn handle_unauthorized(&self, used: &Credential) -> bool {
        {
            let mut session = self.lock();
            let matches = session
                .as_ref()
                .is_some_and(|record| &record.token == used);
            if !matches {
                return false;
            }

            *session = None;
            if let Err(e) = self.store.clear() {
                log::error!("Failed to clear session store: {:#}", e);
            }
        }

        self.redirect
            .redirect_to_login("Session expired. Please login again.");
        true
    }
}
