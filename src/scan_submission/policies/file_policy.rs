use crate::scan_submission::domain::{effective_extension, CandidateFile};
use crate::shared::error::ScanError;

/// Extensions accepted when no configuration overrides them
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 4] = [".pdf", ".docx", ".doc", ".json"];

/// Upload size limit when no configuration overrides it (50 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Formats a byte count with 1024-based units, e.g. `50 MB` or `1.50 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["bytes", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 || value.fract() == 0.0 {
        format!("{} {}", value as u64, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

/// FilePolicy decides whether a file may be submitted for scanning.
///
/// Pure decision over the file name and size: no filesystem or network
/// access. Rejections name the rule that failed so the caller can say
/// which one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePolicy {
    allowed_extensions: Vec<String>,
    max_bytes: u64,
}

impl FilePolicy {
    /// Extensions are normalized to lowercase with a leading dot, so
    /// `PDF`, `.pdf` and ` .Pdf ` are equivalent.
    pub fn new<I, S>(allowed_extensions: I, max_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_extensions = allowed_extensions
            .into_iter()
            .filter_map(|ext| Self::normalize_extension(ext.as_ref()))
            .collect();
        Self {
            allowed_extensions,
            max_bytes,
        }
    }

    fn normalize_extension(ext: &str) -> Option<String> {
        let trimmed = ext.trim().trim_start_matches('.').to_lowercase();
        if trimmed.is_empty() {
            None
        } else {
            Some(format!(".{}", trimmed))
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Comma separated allow-list for user-facing messages
    pub fn allowed_display(&self) -> String {
        self.allowed_extensions.join(", ")
    }

    /// Checks type first, then size.
    ///
    /// # Errors
    /// - `ScanError::UnsupportedFileType` if the extension is not allowed,
    ///   regardless of size
    /// - `ScanError::FileTooLarge` if `size` is strictly greater than the limit
    pub fn validate(&self, file_name: &str, size: u64) -> Result<(), ScanError> {
        let extension = effective_extension(file_name);
        let allowed = extension
            .as_ref()
            .is_some_and(|ext| self.allowed_extensions.iter().any(|a| a == ext));

        if !allowed {
            return Err(ScanError::UnsupportedFileType {
                file_name: file_name.to_string(),
                extension: extension.unwrap_or_else(|| "(none)".to_string()),
                allowed: self.allowed_display(),
            });
        }

        if size > self.max_bytes {
            return Err(ScanError::FileTooLarge {
                message: format!(
                    "File size ({}) exceeds the {} limit.",
                    format_size(size),
                    format_size(self.max_bytes)
                ),
            });
        }

        Ok(())
    }

    pub fn validate_file(&self, file: &CandidateFile) -> Result<(), ScanError> {
        self.validate(file.name(), file.size())
    }
}

impl Default for FilePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_FILE_SIZE)
    }
}
