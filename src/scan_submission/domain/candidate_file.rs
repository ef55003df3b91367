use crate::shared::Result;
use serde::Serialize;
use std::sync::Arc;

/// Maximum length for file names sent to the service (security limit)
const MAX_FILE_NAME_LENGTH: usize = 255;

/// Returns the effective extension of a file name: the text after the final
/// `.`, lowercased and prefixed with `.`.
///
/// Names without a `.` or ending in one have no extension.
pub fn effective_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

/// A file selected by the operator for scanning.
///
/// Immutable once created. The content is reference counted so a retry can
/// re-stream the same bytes without copying the whole buffer.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    name: String,
    extension: Option<String>,
    content: Arc<[u8]>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            anyhow::bail!("File name cannot be empty");
        }

        // Security: Length limit; the name is echoed into a multipart header
        if name.len() > MAX_FILE_NAME_LENGTH {
            anyhow::bail!(
                "File name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_FILE_NAME_LENGTH
            );
        }

        if name.contains(['"', '\r', '\n']) {
            anyhow::bail!("File name contains characters that cannot be sent in a multipart header");
        }

        let extension = effective_extension(&name);
        Ok(Self {
            name,
            extension,
            content: content.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared extension including the leading dot, lowercased.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn content(&self) -> &Arc<[u8]> {
        &self.content
    }

    pub fn metadata(&self) -> FileMetadata {
        FileMetadata::new(&self.name, self.size(), self.extension.as_deref())
    }
}

/// File details echoed into a scan result.
///
/// Always derived from the local [`CandidateFile`], never from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub name: String,
    pub size_bytes: u64,
    /// Extension without the dot, uppercased (`PDF`), or `UNKNOWN`
    pub file_type: String,
}

impl FileMetadata {
    pub fn new(name: &str, size_bytes: u64, extension: Option<&str>) -> Self {
        let file_type = extension
            .map(|ext| ext.trim_start_matches('.').to_uppercase())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        Self {
            name: name.to_string(),
            size_bytes,
            file_type,
        }
    }

    /// Size in KiB with two decimals, e.g. `2048.00`
    pub fn size_kb(&self) -> String {
        format!("{:.2}", self.size_bytes as f64 / 1024.0)
    }
}
