use crate::scan_submission::domain::{CandidateFile, Credential, RawServiceResponse};
use crate::scan_submission::policies::FailureOutcome;
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of a single request against the classification service.
///
/// Failures stay structured so the failure classifier can inspect them.
pub type GatewayResult<T> = std::result::Result<T, FailureOutcome>;

/// Bytes of the upload body handed to the transport so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub sent: u64,
    pub total: u64,
}

impl UploadProgress {
    pub fn new(sent: u64, total: u64) -> Self {
        Self { sent, total }
    }

    /// Rounded percentage in `0..=100`; an empty upload is complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let sent = self.sent.min(self.total) as f64;
        ((sent * 100.0) / self.total as f64).round() as u8
    }
}

/// Progress callback invoked from the upload body stream
pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// ScanGateway port for submitting a file to the classification service
///
/// # Async Support
/// Implementations must be `Send + Sync`; one gateway serves every attempt
/// of a scan, including retries.
#[async_trait]
pub trait ScanGateway: Send + Sync {
    /// Uploads `file` as the single multipart field `file`, authorized with
    /// `credential`, reporting upload progress through `on_progress`.
    ///
    /// # Errors
    /// Returns the raw transport outcome (HTTP status and body, timeout,
    /// connectivity loss) for classification by the caller.
    async fn submit(
        &self,
        file: &CandidateFile,
        credential: &Credential,
        on_progress: ProgressCallback,
    ) -> GatewayResult<RawServiceResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounding() {
        assert_eq!(UploadProgress::new(0, 200).percent(), 0);
        assert_eq!(UploadProgress::new(1, 3).percent(), 33);
        assert_eq!(UploadProgress::new(2, 3).percent(), 67);
        assert_eq!(UploadProgress::new(200, 200).percent(), 100);
    }

    #[test]
    fn test_percent_is_clamped() {
        assert_eq!(UploadProgress::new(300, 200).percent(), 100);
        assert_eq!(UploadProgress::new(0, 0).percent(), 100);
    }
}
