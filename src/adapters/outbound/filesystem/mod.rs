/// Filesystem adapters for file I/O operations
mod credential_file;
mod file_reader;
mod file_writer;

pub use credential_file::CredentialFileStore;
pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
