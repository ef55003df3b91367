use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where a rendered scan result or dashboard is written.
pub trait OutputPresenter {
    /// Writes the rendered content to the destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    /// - The destination is a symbolic link
    fn present(&self, content: &str) -> Result<()>;

    /// Writes binary content (e.g. a downloaded image) to the destination
    fn present_bytes(&self, content: &[u8]) -> Result<()>;
}
