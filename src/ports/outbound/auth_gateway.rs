use super::GatewayResult;
use crate::scan_submission::domain::Identity;
use async_trait::async_trait;
use serde::Deserialize;

/// Body returned by `/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<Identity>,
}

/// AuthGateway port for exchanging user credentials for a bearer token
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> GatewayResult<LoginResponse>;
}
