use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Presenter type enumeration for factory pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

/// Factory for creating output presenters
///
/// A rendered report goes either to stdout or to the file given with
/// `--output`.
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }

    /// `--output` given means file, otherwise stdout
    pub fn for_output(output: Option<PathBuf>) -> Box<dyn OutputPresenter> {
        Self::create(output.map_or(PresenterType::Stdout, PresenterType::File))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_presenter_writes_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        let presenter = PresenterFactory::for_output(Some(path.clone()));
        presenter.present("{\"status\":\"Benign\"}").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\"status\":\"Benign\"}");
    }

    #[test]
    fn test_stdout_presenter_accepts_content() {
        let presenter = PresenterFactory::for_output(None);
        presenter.present("ok").unwrap();
    }

    #[test]
    fn test_presenter_type_equality() {
        let file1 = PresenterType::File(PathBuf::from("/tmp/output1.json"));
        let file2 = PresenterType::File(PathBuf::from("/tmp/output1.json"));
        assert_eq!(file1, file2);
        assert_ne!(file1, PresenterType::Stdout);
    }
}
