use super::GatewayResult;
use crate::scan_submission::domain::{Credential, DashboardStats, RecentActivity};
use async_trait::async_trait;

/// DashboardRepository port for fetching aggregate scan statistics
///
/// The credential is optional: the service decides whether anonymous
/// access is allowed.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn fetch_stats(&self, credential: Option<&Credential>) -> GatewayResult<DashboardStats>;

    async fn fetch_recent(
        &self,
        credential: Option<&Credential>,
    ) -> GatewayResult<Vec<RecentActivity>>;
}
