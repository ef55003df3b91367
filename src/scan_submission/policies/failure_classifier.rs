use super::file_policy::format_size;
use crate::shared::error::{ErrorKind, ScanError};
use serde_json::Value;

const GENERIC_BAD_REQUEST: &str = "Invalid file format or content";
const GENERIC_UNPROCESSABLE: &str = "Invalid request format";
const GENERIC_FAILURE: &str = "Failed to scan file. Please try again.";

/// What the transport reported for a failed request
#[derive(Debug, Clone, PartialEq)]
pub enum FailureOutcome {
    /// The service answered with a non-success status
    Http { status: u16, body: Value },
    /// The client gave up waiting at its deadline
    Timeout,
    /// No HTTP response at all (refused, reset, DNS, TLS)
    Connectivity { message: String },
    /// Anything else the transport could not categorize
    Other { message: String },
}

impl FailureOutcome {
    pub fn http(status: u16, body: Value) -> Self {
        FailureOutcome::Http { status, body }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FailureOutcome::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result of classifying a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: ErrorKind,
    pub retryable: bool,
    pub message: String,
}

impl Classification {
    fn terminal(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            retryable: false,
            message,
        }
    }

    /// True when the session must be cleared and the user sent to login
    pub fn requires_reauthentication(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    pub fn into_error(self) -> ScanError {
        ScanError::classified(self.kind, self.message)
    }
}

/// FailureClassifier maps a transport outcome onto the error taxonomy.
///
/// Rules are evaluated in a fixed order and the first match wins:
/// 401, 413, client timeout, 400, 422, >= 500, connectivity loss, other.
/// Only server errors are retryable; the retry cap is applied by the caller.
#[derive(Debug, Clone)]
pub struct FailureClassifier {
    max_file_size_bytes: u64,
}

impl FailureClassifier {
    pub fn new(max_file_size_bytes: u64) -> Self {
        Self {
            max_file_size_bytes,
        }
    }

    pub fn classify(&self, outcome: &FailureOutcome) -> Classification {
        match outcome {
            FailureOutcome::Http { status: 401, .. } => Classification::terminal(
                ErrorKind::Unauthorized,
                "Session expired. Please login again.".to_string(),
            ),
            FailureOutcome::Http { status: 413, .. } => Classification::terminal(
                ErrorKind::FileTooLarge,
                format!(
                    "File is too large. Maximum size is {}.",
                    format_size(self.max_file_size_bytes)
                ),
            ),
            FailureOutcome::Timeout => Classification::terminal(
                ErrorKind::Timeout,
                "Request timed out. Please try again.".to_string(),
            ),
            FailureOutcome::Http { status: 400, body } => {
                let detail = detail_text(body).unwrap_or_else(|| GENERIC_BAD_REQUEST.to_string());
                Classification::terminal(
                    ErrorKind::BadRequest,
                    format!("Validation Error: {}", detail),
                )
            }
            FailureOutcome::Http { status: 422, body } => {
                let detail = detail_text(body).unwrap_or_else(|| GENERIC_UNPROCESSABLE.to_string());
                Classification::terminal(
                    ErrorKind::UnprocessableInput,
                    format!("Request Error: {}", detail),
                )
            }
            FailureOutcome::Http { status, body } if *status >= 500 => {
                let message = match detail_text(body) {
                    Some(detail) => format!("Server error (HTTP {}): {}", status, detail),
                    None => format!("Server error (HTTP {}).", status),
                };
                Classification {
                    kind: ErrorKind::ServerError,
                    retryable: true,
                    message,
                }
            }
            FailureOutcome::Connectivity { message } => Classification::terminal(
                ErrorKind::NetworkError,
                format!(
                    "Network error: no response from the classification service ({}). Check your connection and the API URL.",
                    message
                ),
            ),
            FailureOutcome::Http { status, body } => {
                let detail = detail_text(body)
                    .or_else(|| message_text(body))
                    .unwrap_or_else(|| format!("HTTP {}", status));
                Classification::terminal(ErrorKind::Unknown, format!("Error: {}", detail))
            }
            FailureOutcome::Other { message } => {
                let detail = if message.trim().is_empty() {
                    GENERIC_FAILURE
                } else {
                    message.as_str()
                };
                Classification::terminal(ErrorKind::Unknown, format!("Error: {}", detail))
            }
        }
    }
}

/// Extracts a human-readable `detail` from a FastAPI-style error body.
///
/// A string detail is used as-is. A list of validation entries is reduced
/// to their `msg` fields joined with `, `.
fn detail_text(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .filter(|msg| !msg.is_empty())
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join(", "))
            }
        }
        _ => None,
    }
}

fn message_text(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
