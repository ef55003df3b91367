/// Shared utilities used across all layers
pub mod error;
pub mod security;

/// Result alias used by application services and adapters.
///
/// Domain-level failures are expressed as [`error::ScanError`] and converted
/// into `anyhow::Error` at layer boundaries so callers can still downcast.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
