use super::http::{build_client, decorate, endpoint, read_json, transport_failure};
use crate::ports::outbound::{AuthGateway, GatewayResult, LoginResponse};
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::multipart::Form;
use std::time::Duration;

/// AuthClient adapter for `/auth/login`
///
/// Credentials are posted as a multipart form with the text fields
/// `username` and `password`.
pub struct AuthClient {
    client: reqwest::Client,
    url: String,
}

impl AuthClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: endpoint(base_url, "/auth/login"),
        })
    }
}

#[async_trait]
impl AuthGateway for AuthClient {
    async fn login(&self, username: &str, password: &str) -> GatewayResult<LoginResponse> {
        let form = Form::new()
            .text("username", username.to_string())
            .text("password", password.to_string());

        log::debug!("POST {} as {}", self.url, username);
        let response = decorate(self.client.post(&self.url), None)
            .multipart(form)
            .send()
            .await
            .map_err(transport_failure)?;

        read_json(response).await
    }
}
