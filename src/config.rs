//! Configuration file support for docscan.
//!
//! Provides YAML-based configuration through `docscan.config.yml` files,
//! including data structures, file loading, validation and the merge with
//! command-line overrides into [`Settings`].

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::filesystem::CredentialFileStore;
use crate::scan_submission::policies::{
    FilePolicy, RetryPolicy, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_BASE_DELAY, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_MAX_RETRIES,
};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "docscan.config.yml";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOGIN_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_AI_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_NOTICE_TTL_MS: u64 = 3_000;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_base_url: Option<String>,
    pub allowed_extensions: Option<Vec<String>>,
    pub max_file_size_bytes: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub login_timeout_ms: Option<u64>,
    pub ai_timeout_ms: Option<u64>,
    pub max_retries: Option<u32>,
    pub base_retry_delay_ms: Option<u64>,
    /// `0` keeps notices until dismissed
    pub notice_ttl_ms: Option<u64>,
    pub session_file: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file (or one holding only comments) parses as YAML null
    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str::<Option<ConfigFile>>(&content)
            .with_context(|| {
                format!(
                    "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                    path.display()
                )
            })?
            .unwrap_or_default()
    };

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref extensions) = config.allowed_extensions {
        if extensions.is_empty() {
            bail!(
                "Invalid config: allowed_extensions must not be empty.\n\n\
                 💡 Hint: List at least one extension (e.g., \".pdf\")."
            );
        }
        for (i, ext) in extensions.iter().enumerate() {
            if ext.trim().trim_start_matches('.').is_empty() {
                bail!(
                    "Invalid config: allowed_extensions[{}] must not be empty.\n\n\
                     💡 Hint: Each entry must name an extension (e.g., \".docx\").",
                    i
                );
            }
        }
    }

    if config.max_file_size_bytes == Some(0) {
        bail!("Invalid config: max_file_size_bytes must be greater than 0.");
    }

    for (name, value) in [
        ("request_timeout_ms", config.request_timeout_ms),
        ("login_timeout_ms", config.login_timeout_ms),
        ("ai_timeout_ms", config.ai_timeout_ms),
    ] {
        if value == Some(0) {
            bail!("Invalid config: {} must be greater than 0.", name);
        }
    }

    if let Some(ref url) = config.api_base_url {
        validate_base_url(url)?;
    }
    Ok(())
}

fn validate_base_url(url: &str) -> Result<()> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!(
            "Invalid API base URL: '{}'\n\n\
             💡 Hint: The URL must start with http:// or https://",
            url
        );
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line (or via the environment) that win over
/// the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub session_file: Option<PathBuf>,
}

/// Effective settings after merging defaults, config file and overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub file_policy: FilePolicy,
    pub retry_policy: RetryPolicy,
    pub request_timeout: Duration,
    pub login_timeout: Duration,
    pub ai_timeout: Duration,
    pub notice_ttl: Duration,
    pub session_file: PathBuf,
}

impl Settings {
    pub fn resolve(config: ConfigFile, overrides: Overrides) -> Result<Self> {
        let api_base_url = match overrides.api_base_url {
            Some(url) => {
                validate_base_url(&url)?;
                url
            }
            None => config
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        };

        let session_file = match overrides.session_file.or(config.session_file) {
            Some(path) => path,
            None => CredentialFileStore::default_path().context(
                "Could not determine the configuration directory for the session file\n\n\
                 💡 Hint: Pass --session-file or set session_file in the config file.",
            )?,
        };

        let file_policy = match config.allowed_extensions {
            Some(extensions) => FilePolicy::new(
                extensions,
                config.max_file_size_bytes.unwrap_or(DEFAULT_MAX_FILE_SIZE),
            ),
            None => FilePolicy::new(
                DEFAULT_ALLOWED_EXTENSIONS,
                config.max_file_size_bytes.unwrap_or(DEFAULT_MAX_FILE_SIZE),
            ),
        };

        let retry_policy = RetryPolicy::new(
            config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            config
                .base_retry_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_BASE_DELAY),
        );

        Ok(Self {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            file_policy,
            retry_policy,
            request_timeout: Duration::from_millis(
                config.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
            ),
            login_timeout: Duration::from_millis(
                config.login_timeout_ms.unwrap_or(DEFAULT_LOGIN_TIMEOUT_MS),
            ),
            ai_timeout: Duration::from_millis(
                config.ai_timeout_ms.unwrap_or(DEFAULT_AI_TIMEOUT_MS),
            ),
            notice_ttl: Duration::from_millis(config.notice_ttl_ms.unwrap_or(DEFAULT_NOTICE_TTL_MS)),
            session_file,
        })
    }
}
