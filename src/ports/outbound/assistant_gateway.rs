use super::GatewayResult;
use crate::scan_submission::domain::{AssistantPrompt, AssistantReply, Credential};
use async_trait::async_trait;

/// AssistantGateway port for the service's text completion endpoint
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    async fn complete(
        &self,
        prompt: &AssistantPrompt,
        credential: Option<&Credential>,
    ) -> GatewayResult<AssistantReply>;
}
