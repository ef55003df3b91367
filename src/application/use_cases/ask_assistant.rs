use crate::application::services::{EphemeralNotifier, SessionGuard};
use crate::ports::outbound::AssistantGateway;
use crate::scan_submission::domain::{AssistantPrompt, AssistantReply, NoticeSeverity};
use crate::scan_submission::policies::{FailureClassifier, FailureOutcome, DEFAULT_MAX_FILE_SIZE};
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::sync::Arc;

pub const ASSISTANT_TIMEOUT_MESSAGE: &str = "AI request timed out";

/// AskAssistantUseCase sends a free-form prompt to the service's assistant
///
/// Requests carry the current session when there is one. A 401 clears it
/// like any other authenticated call.
pub struct AskAssistantUseCase<G> {
    gateway: G,
    session: Arc<SessionGuard>,
    notifier: EphemeralNotifier,
    classifier: FailureClassifier,
}

impl<G: AssistantGateway> AskAssistantUseCase<G> {
    pub fn new(gateway: G, session: Arc<SessionGuard>, notifier: EphemeralNotifier) -> Self {
        Self {
            gateway,
            session,
            notifier,
            classifier: FailureClassifier::new(DEFAULT_MAX_FILE_SIZE),
        }
    }

    /// # Errors
    /// Blank prompts, a zero token budget and a negative or non-finite
    /// temperature are rejected before any request is made.
    pub async fn execute(&self, prompt: &AssistantPrompt) -> Result<AssistantReply> {
        if let Some(message) = Self::invalid_input(prompt) {
            return Err(ScanError::BadRequest {
                message: message.to_string(),
            }
            .into());
        }

        let credential = self.session.current_credential();
        match self.gateway.complete(prompt, credential.as_ref()).await {
            Ok(reply) => Ok(reply),
            Err(failure) => {
                let error = match failure {
                    FailureOutcome::Timeout => ScanError::Timeout {
                        message: ASSISTANT_TIMEOUT_MESSAGE.to_string(),
                    },
                    other => {
                        let classification = self.classifier.classify(&other);
                        if classification.requires_reauthentication() {
                            if let Some(credential) = credential.as_ref() {
                                self.session.handle_unauthorized(credential);
                            }
                        }
                        classification.into_error()
                    }
                };
                self.notifier.notify(error.to_string(), NoticeSeverity::Error);
                Err(error.into())
            }
        }
    }

    fn invalid_input(prompt: &AssistantPrompt) -> Option<&'static str> {
        if prompt.prompt.trim().is_empty() {
            Some("Prompt must not be empty.")
        } else if prompt.max_tokens == 0 {
            Some("max_tokens must be at least 1.")
        } else if !prompt.temperature.is_finite() || prompt.temperature < 0.0 {
            Some("temperature must be a non-negative number.")
        } else {
            None
        }
    }
}
