use super::http::{build_client, decorate, endpoint, read_json, transport_failure};
use crate::ports::outbound::{AssistantGateway, GatewayResult};
use crate::scan_submission::domain::{AssistantPrompt, AssistantReply, Credential};
use crate::shared::Result;
use async_trait::async_trait;
use std::time::Duration;

/// AssistantClient adapter for `/ai/complete`
///
/// The prompt is posted as a JSON body. Completions can take a while, so
/// this client usually gets a longer deadline than the other endpoints.
pub struct AssistantClient {
    client: reqwest::Client,
    url: String,
}

impl AssistantClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: endpoint(base_url, "/ai/complete"),
        })
    }
}

#[async_trait]
impl AssistantGateway for AssistantClient {
    async fn complete(
        &self,
        prompt: &AssistantPrompt,
        credential: Option<&Credential>,
    ) -> GatewayResult<AssistantReply> {
        log::debug!("POST {} ({} max tokens)", self.url, prompt.max_tokens);
        let response = decorate(self.client.post(&self.url), credential)
            .json(prompt)
            .send()
            .await
            .map_err(transport_failure)?;

        read_json(response).await
    }
}
