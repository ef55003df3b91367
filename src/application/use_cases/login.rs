use crate::application::services::{EphemeralNotifier, SessionGuard};
use crate::ports::outbound::AuthGateway;
use crate::scan_submission::domain::{Credential, Identity, NoticeSeverity};
use crate::scan_submission::policies::{FailureClassifier, FailureOutcome, DEFAULT_MAX_FILE_SIZE};
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::sync::Arc;

const INVALID_LOGIN: &str = "Invalid username or password.";

/// LoginUseCase exchanges user credentials for a session
///
/// On success the token and identity are handed to the [`SessionGuard`],
/// which persists them.
pub struct LoginUseCase<A> {
    gateway: A,
    session: Arc<SessionGuard>,
    notifier: EphemeralNotifier,
    classifier: FailureClassifier,
}

impl<A: AuthGateway> LoginUseCase<A> {
    pub fn new(gateway: A, session: Arc<SessionGuard>, notifier: EphemeralNotifier) -> Self {
        Self {
            gateway,
            session,
            notifier,
            classifier: FailureClassifier::new(DEFAULT_MAX_FILE_SIZE),
        }
    }

    /// Logs in and stores the new session
    ///
    /// # Errors
    /// Returns a [`ScanError`] (inside `anyhow`) when the input is blank or
    /// the service rejects the login, and an I/O error if the session
    /// cannot be persisted.
    pub async fn execute(&self, username: &str, password: &str) -> Result<Identity> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ScanError::BadRequest {
                message: "Username and password are required.".to_string(),
            }
            .into());
        }

        let response = match self.gateway.login(username.trim(), password).await {
            Ok(response) => response,
            Err(failure) => {
                let error = self.login_error(&failure);
                self.notifier.notify(error.to_string(), NoticeSeverity::Error);
                return Err(error.into());
            }
        };

        let token = Credential::new(response.access_token).ok_or_else(|| ScanError::Unknown {
            message: "Error: login response did not include an access token".to_string(),
        })?;
        if let Some(token_type) = response.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                log::warn!("Unexpected token type '{}', using it as bearer", token_type);
            }
        }

        let identity = response
            .user
            .unwrap_or_else(|| Identity::from_login(username.trim()));
        self.session.establish(token, Some(identity.clone()))?;

        self.notifier.notify(
            format!("Welcome back, {}!", identity.username),
            NoticeSeverity::Success,
        );
        Ok(identity)
    }

    /// A rejected login is not an expired session, so 401/403 get their own
    /// wording. Everything else goes through the shared classifier.
    fn login_error(&self, failure: &FailureOutcome) -> ScanError {
        if let FailureOutcome::Http { status, body } = failure {
            if matches!(status, 401 | 403) {
                let message = body
                    .get("detail")
                    .or_else(|| body.get("message"))
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(INVALID_LOGIN);
                return ScanError::Unauthorized {
                    message: message.to_string(),
                };
            }
        }
        self.classifier.classify(failure).into_error()
    }
}
