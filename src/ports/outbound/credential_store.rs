use crate::scan_submission::domain::SessionRecord;
use crate::shared::Result;

/// CredentialStore port for persisting the session across restarts
///
/// Only the session guard talks to this port.
pub trait CredentialStore: Send + Sync {
    /// Loads the stored session, if any
    ///
    /// # Errors
    /// Returns an error if the store exists but cannot be read or parsed
    fn load(&self) -> Result<Option<SessionRecord>>;

    /// Replaces the stored session
    fn save(&self, record: &SessionRecord) -> Result<()>;

    /// Removes the stored session. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}
