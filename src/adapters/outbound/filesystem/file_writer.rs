use crate::ports::outbound::OutputPresenter;
use crate::shared::security::ensure_not_symlink;
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing a rendered report or a download to a file
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                anyhow::bail!(
                    "Cannot write {}: parent directory does not exist: {}",
                    self.output_path.display(),
                    parent.display()
                );
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.present_bytes(content.as_bytes())
    }

    fn present_bytes(&self, content: &[u8]) -> Result<()> {
        self.validate_parent_directory()?;
        ensure_not_symlink(&self.output_path, "write")?;

        fs::write(&self.output_path, content)
            .with_context(|| format!("Failed to write {}", self.output_path.display()))?;

        eprintln!("✅ Output written: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing a rendered report to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| {
                if content.ends_with('\n') {
                    Ok(())
                } else {
                    stdout.write_all(b"\n")
                }
            })
            .context("Failed to write to stdout")?;
        Ok(())
    }

    fn present_bytes(&self, content: &[u8]) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content)
            .and_then(|_| stdout.flush())
            .context("Failed to write to stdout")?;
        Ok(())
    }
}
