use super::http::{
    authorize, build_client, decorate, endpoint, read_json, read_response, transport_failure,
};
use crate::ports::outbound::{AnalysisRepository, GatewayResult};
use crate::scan_submission::domain::{AnalysisReport, Credential};
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use std::time::Duration;

/// AnalysisClient adapter for `/analysis` and the evaluation image
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.to_string(),
        })
    }

    /// Absolute URLs are used as-is, anything else is relative to the service
    fn image_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            endpoint(&self.base_url, path)
        }
    }
}

#[async_trait]
impl AnalysisRepository for AnalysisClient {
    async fn fetch_analysis(&self, credential: Option<&Credential>) -> GatewayResult<AnalysisReport> {
        let url = endpoint(&self.base_url, "/analysis");
        log::debug!("GET {}", url);
        let response = decorate(self.client.get(&url), credential)
            .send()
            .await
            .map_err(transport_failure)?;

        read_json(response).await
    }

    async fn fetch_evaluation_image(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> GatewayResult<Vec<u8>> {
        let url = self.image_url(path);
        log::debug!("GET {}", url);
        let request = self
            .client
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("image/*"));
        let response = authorize(request, credential)
            .send()
            .await
            .map_err(transport_failure)?;

        read_response(response, |body| Ok(body.to_vec())).await
    }
}
