/// Policies encoding the scan-submission business rules
mod failure_classifier;
mod file_policy;
mod retry_policy;

pub use failure_classifier::{Classification, FailureClassifier, FailureOutcome};
pub use file_policy::{format_size, FilePolicy, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_FILE_SIZE};
pub use retry_policy::{
    format_delay, RetryDecision, RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES,
};
