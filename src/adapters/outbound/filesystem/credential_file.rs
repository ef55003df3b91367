use crate::ports::outbound::CredentialStore;
use crate::scan_submission::domain::{Credential, Identity, SessionRecord};
use crate::shared::security::ensure_not_symlink;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "docscan";
const SESSION_FILE: &str = "session.json";

/// On-disk shape; tolerates a blank or missing token
#[derive(Deserialize)]
struct StoredSession {
    #[serde(default)]
    token: String,
    #[serde(default)]
    identity: Option<Identity>,
}

/// CredentialFileStore adapter persisting the session as JSON
///
/// The file holds the bearer token, so on Unix it is created with mode
/// `0600`. A file whose token is blank counts as no session.
pub struct CredentialFileStore {
    path: PathBuf,
}

impl CredentialFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<config dir>/docscan/session.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_private(&self, contents: &[u8]) -> Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Failed to open session file {}", self.path.display()))?;
        file.write_all(contents)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;

        // `mode` only applies on creation; tighten an existing file too.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to restrict {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl CredentialStore for CredentialFileStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        ensure_not_symlink(&self.path, "read")?;
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read session file {}", self.path.display())
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredSession = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed session file {}", self.path.display()))?;

        Ok(Credential::new(stored.token).map(|token| SessionRecord {
            token,
            identity: stored.identity,
        }))
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        ensure_not_symlink(&self.path, "write")?;

        let json = serde_json::to_vec_pretty(record).context("Failed to serialize session")?;
        self.write_private(&json)?;
        log::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        ensure_not_symlink(&self.path, "delete")?;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("Session file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session file {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record() -> SessionRecord {
        SessionRecord {
            token: Credential::new("jwt-123").unwrap(),
            identity: Some(Identity::from_login("analyst@example.com")),
        }
    }

    #[test]
    fn test_missing_file_is_no_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialFileStore::new(temp_dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_survives_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("session.json");

        CredentialFileStore::new(path.clone()).save(&record()).unwrap();
        let loaded = CredentialFileStore::new(path).load().unwrap();

        assert_eq!(loaded, Some(record()));
    }

    #[test]
    fn test_clear_removes_file_and_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = CredentialFileStore::new(path.clone());

        store.save(&record()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!path.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_blank_token_is_no_session() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, r#"{"token": "  ", "identity": null}"#).unwrap();

        assert!(CredentialFileStore::new(path).load().unwrap().is_none());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = CredentialFileStore::new(path).load().unwrap_err();
        assert!(err.to_string().contains("Malformed session file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        CredentialFileStore::new(path.clone()).save(&record()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        if let Some(path) = CredentialFileStore::default_path() {
            assert!(path.ends_with("docscan/session.json"));
        }
    }
}
