use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Rejects a path that is a symbolic link.
///
/// Missing paths pass: callers use this before creating or overwriting a
/// file (session file, output file) where absence is the normal case.
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
pub fn ensure_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            anyhow::bail!(
                "Failed to read metadata for {} operation on {}: {}",
                operation,
                path.display(),
                e
            )
        }
    };

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// Returns the file length so callers can apply their own size policy
/// without a second metadata lookup.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn ensure_regular_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata ({}): {}",
            file_description,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_not_symlink_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");
        fs::write(&file_path, "{}").unwrap();

        assert!(ensure_not_symlink(&file_path, "write").is_ok());
    }

    #[test]
    fn test_ensure_not_symlink_missing_path_passes() {
        let path = PathBuf::from("/nonexistent/session.json");
        assert!(ensure_not_symlink(&path, "write").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_not_symlink_rejects_link() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = ensure_not_symlink(&link, "write").unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
    }

    #[test]
    fn test_ensure_regular_file_returns_length() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("report.pdf");
        fs::write(&file_path, b"%PDF-1.7").unwrap();

        assert_eq!(ensure_regular_file(&file_path, "document").unwrap(), 8);
    }

    #[test]
    fn test_ensure_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = ensure_regular_file(temp_dir.path(), "document");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_ensure_regular_file_missing() {
        let result = ensure_regular_file(Path::new("/nonexistent/report.pdf"), "document");
        assert!(result.is_err());
    }
}
