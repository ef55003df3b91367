use super::http::{build_client, decorate, endpoint, read_response, transport_failure};
use crate::ports::outbound::{GatewayResult, ProgressCallback, ScanGateway, UploadProgress};
use crate::scan_submission::domain::{CandidateFile, Credential, RawServiceResponse};
use crate::scan_submission::policies::FailureOutcome;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use std::sync::Arc;
use std::time::Duration;

/// Upload body chunk; progress is reported once per chunk
const CHUNK_SIZE: usize = 64 * 1024;

/// Content type sent for the uploaded document
fn mime_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some(".pdf") => "application/pdf",
        Some(".docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some(".doc") => "application/msword",
        Some(".json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// PredictClient adapter for the `/predict` classification endpoint
///
/// This adapter implements the ScanGateway port. The document is sent as a
/// single multipart part named `file`; the part body is streamed in chunks
/// so upload progress can be reported as bytes are handed to the transport.
///
/// # Async Support
/// Uses the async reqwest client. The request deadline is the client
/// timeout, so exceeding it surfaces as `FailureOutcome::Timeout`.
pub struct PredictClient {
    client: reqwest::Client,
    url: String,
}

impl PredictClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: endpoint(base_url, "/predict"),
        })
    }

    fn file_part(file: &CandidateFile, on_progress: ProgressCallback) -> GatewayResult<Part> {
        let content = Arc::clone(file.content());
        let total = file.size();
        on_progress(UploadProgress::new(0, total));

        let chunks = (0..content.len())
            .step_by(CHUNK_SIZE)
            .map(move |start| {
                let end = (start + CHUNK_SIZE).min(content.len());
                let chunk = content[start..end].to_vec();
                on_progress(UploadProgress::new(end as u64, total));
                Ok::<_, std::io::Error>(chunk)
            });
        let body = Body::wrap_stream(futures::stream::iter(chunks));

        Part::stream_with_length(body, total)
            .file_name(file.name().to_string())
            .mime_str(mime_for(file.extension()))
            .map_err(|e| FailureOutcome::Other {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl ScanGateway for PredictClient {
    async fn submit(
        &self,
        file: &CandidateFile,
        credential: &Credential,
        on_progress: ProgressCallback,
    ) -> GatewayResult<RawServiceResponse> {
        let form = Form::new().part("file", Self::file_part(file, on_progress)?);

        log::debug!("POST {} ({}, {} bytes)", self.url, file.name(), file.size());
        let response = decorate(self.client.post(&self.url), Some(credential))
            .multipart(form)
            .send()
            .await
            .map_err(transport_failure)?;

        read_response(response, RawServiceResponse::from_slice).await
    }
}
