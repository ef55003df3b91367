use super::GatewayResult;
use crate::scan_submission::domain::{AnalysisReport, Credential};
use async_trait::async_trait;

/// AnalysisRepository port for model evaluation figures
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    async fn fetch_analysis(&self, credential: Option<&Credential>) -> GatewayResult<AnalysisReport>;

    /// Downloads the evaluation image at `path`, a service-relative path
    /// or an absolute URL as reported in the analysis payload.
    async fn fetch_evaluation_image(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> GatewayResult<Vec<u8>>;
}
