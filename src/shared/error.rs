use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish a malicious verdict from
/// an operational failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the scan finished and the verdict is not malicious
    Success = 0,
    /// The service classified the submitted file as malicious
    MaliciousDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (validation, authentication, network, server, I/O)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::MaliciousDetected => write!(f, "Malicious Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Fixed set of failure categories a scan submission can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    UnsupportedFileType,
    FileTooLarge,
    AuthenticationRequired,
    Unauthorized,
    Timeout,
    BadRequest,
    UnprocessableInput,
    ServerError,
    NetworkError,
    Unknown,
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnsupportedFileType => "UnsupportedFileType",
            ErrorKind::FileTooLarge => "FileTooLarge",
            ErrorKind::AuthenticationRequired => "AuthenticationRequired",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::UnprocessableInput => "UnprocessableInput",
            ErrorKind::ServerError => "ServerError",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::Unknown => "Unknown",
            ErrorKind::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the scan-submission workflow.
///
/// Every variant renders exactly one human-readable message. Variants that
/// originate from the remote service carry the message chosen by the
/// failure classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("Unsupported file type '{extension}' ({file_name}). Allowed types: {allowed}")]
    UnsupportedFileType {
        file_name: String,
        extension: String,
        allowed: String,
    },

    #[error("{message}")]
    FileTooLarge { message: String },

    #[error("Authentication required. Please login.\n\n💡 Hint: Run `docscan login` to start a session")]
    AuthenticationRequired,

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Timeout { message: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    UnprocessableInput { message: String },

    #[error("{message}")]
    ServerError { message: String },

    #[error("{message}")]
    NetworkError { message: String },

    #[error("{message}")]
    Unknown { message: String },

    #[error("Scan cancelled before completion")]
    Cancelled,
}

impl ScanError {
    /// Builds the error for a classified service failure.
    ///
    /// Kinds without a message payload ignore `message`.
    pub fn classified(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::UnsupportedFileType => ScanError::UnsupportedFileType {
                file_name: String::new(),
                extension: String::new(),
                allowed: message,
            },
            ErrorKind::FileTooLarge => ScanError::FileTooLarge { message },
            ErrorKind::AuthenticationRequired => ScanError::AuthenticationRequired,
            ErrorKind::Unauthorized => ScanError::Unauthorized { message },
            ErrorKind::Timeout => ScanError::Timeout { message },
            ErrorKind::BadRequest => ScanError::BadRequest { message },
            ErrorKind::UnprocessableInput => ScanError::UnprocessableInput { message },
            ErrorKind::ServerError => ScanError::ServerError { message },
            ErrorKind::NetworkError => ScanError::NetworkError { message },
            ErrorKind::Unknown => ScanError::Unknown { message },
            ErrorKind::Cancelled => ScanError::Cancelled,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::UnsupportedFileType { .. } => ErrorKind::UnsupportedFileType,
            ScanError::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            ScanError::AuthenticationRequired => ErrorKind::AuthenticationRequired,
            ScanError::Unauthorized { .. } => ErrorKind::Unauthorized,
            ScanError::Timeout { .. } => ErrorKind::Timeout,
            ScanError::BadRequest { .. } => ErrorKind::BadRequest,
            ScanError::UnprocessableInput { .. } => ErrorKind::UnprocessableInput,
            ScanError::ServerError { .. } => ErrorKind::ServerError,
            ScanError::NetworkError { .. } => ErrorKind::NetworkError,
            ScanError::Unknown { .. } => ErrorKind::Unknown,
            ScanError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Finds a `ScanError` anywhere in an `anyhow` error chain.
    pub fn find_in(err: &anyhow::Error) -> Option<&ScanError> {
        err.chain().find_map(|cause| cause.downcast_ref::<ScanError>())
    }
}
