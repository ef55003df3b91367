use crate::scan_submission::domain::CandidateFile;
use crate::scan_submission::policies::FilePolicy;
use crate::shared::security::ensure_regular_file;
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for loading documents to scan
///
/// The file type and size are checked against the [`FilePolicy`] from
/// metadata alone, so a rejected file is never read into memory.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads `path` into a [`CandidateFile`] named after its final component.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The path is missing, a symlink, or not a regular file
    /// - The policy rejects the file type or size (as a `ScanError`)
    /// - The content cannot be read
    pub fn read_candidate(&self, path: &Path, policy: &FilePolicy) -> Result<CandidateFile> {
        let size = ensure_regular_file(path, "document")?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("{} has no usable file name", path.display()))?;

        policy.validate(name, size)?;

        let content = fs::read(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        log::debug!("Read {} ({} bytes)", path.display(), content.len());

        CandidateFile::new(name, content)
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}
