use super::http::{build_client, decorate, endpoint, read_json, read_response, transport_failure};
use crate::ports::outbound::{DashboardRepository, GatewayResult};
use crate::scan_submission::domain::{Credential, DashboardStats, RecentActivity};
use crate::shared::Result;
use async_trait::async_trait;
use std::time::Duration;

/// DashboardClient adapter for `/dashboard` and `/dashboard/recent`
pub struct DashboardClient {
    client: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.to_string(),
        })
    }

    async fn get(&self, path: &str, credential: Option<&Credential>) -> GatewayResult<reqwest::Response> {
        let url = endpoint(&self.base_url, path);
        log::debug!("GET {}", url);
        decorate(self.client.get(&url), credential)
            .send()
            .await
            .map_err(transport_failure)
    }
}

#[async_trait]
impl DashboardRepository for DashboardClient {
    async fn fetch_stats(&self, credential: Option<&Credential>) -> GatewayResult<DashboardStats> {
        let response = self.get("/dashboard", credential).await?;
        read_json(response).await
    }

    async fn fetch_recent(
        &self,
        credential: Option<&Credential>,
    ) -> GatewayResult<Vec<RecentActivity>> {
        let response = self.get("/dashboard/recent", credential).await?;
        // `null` or an empty body means no activity yet
        read_response(response, |body| {
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Vec::new());
            }
            serde_json::from_slice::<Option<Vec<RecentActivity>>>(body)
                .map(Option::unwrap_or_default)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_server::{Canned, TestServer};
    use super::*;
    use crate::scan_submission::policies::FailureOutcome;

    #[tokio::test]
    async fn test_fetch_stats_with_bearer() {
        let server = TestServer::start(vec![Canned::json(
            200,
            r#"{"total_scans":12,"malicious_count":5,"benign_count":7}"#,
        )])
        .await;
        let client = DashboardClient::new(&server.base_url, Duration::from_secs(5)).unwrap();
        let credential = Credential::new("tok").unwrap();

        let stats = client.fetch_stats(Some(&credential)).await.unwrap();

        assert_eq!(stats.total_scans, 12);
        assert_eq!(stats.todays_scans, 0);
        let request = &server.requests()[0];
        assert!(request.request_line().starts_with("GET /dashboard "));
        assert_eq!(request.header("authorization").as_deref(), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_fetch_recent_null_is_empty() {
        let server = TestServer::start(vec![Canned::json(200, "null")]).await;
        let client = DashboardClient::new(&server.base_url, Duration::from_secs(5)).unwrap();

        let recent = client.fetch_recent(None).await.unwrap();

        assert!(recent.is_empty());
        let request = &server.requests()[0];
        assert!(request.request_line().starts_with("GET /dashboard/recent "));
        assert!(request.header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_fetch_recent_entries() {
        let server = TestServer::start(vec![Canned::json(
            200,
            r#"[{"filename":"a.pdf","status":"Malicious","confidence":"88%","date":"2025-01-02T03:04:05Z"}]"#,
        )])
        .await;
        let client = DashboardClient::new(&server.base_url, Duration::from_secs(5)).unwrap();

        let recent = client.fetch_recent(None).await.unwrap();

        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].filename, "a.pdf");
        assert!(recent[0].date.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let url = TestServer::refused_url().await;
        let client = DashboardClient::new(&url, Duration::from_secs(5)).unwrap();

        let failure = client.fetch_stats(None).await.unwrap_err();
        assert!(matches!(failure, FailureOutcome::Connectivity { .. }));
    }
}
