use crate::application::services::{EphemeralNotifier, SessionGuard};
use crate::ports::outbound::{DashboardRepository, GatewayResult};
use crate::scan_submission::domain::{
    Credential, DashboardSnapshot, DataSource, NoticeSeverity,
};
use crate::scan_submission::policies::{FailureClassifier, FailureOutcome, DEFAULT_MAX_FILE_SIZE};
use crate::shared::error::{ErrorKind, ScanError};
use crate::shared::Result;
use chrono::Utc;
use std::sync::Arc;

pub const DEMO_DATA_NOTICE: &str = "Using demo data - backend not available";
pub const DASHBOARD_FAILURE_NOTICE: &str = "Failed to load dashboard data";

/// LoadDashboardUseCase fetches the aggregate counters and recent activity
///
/// When the service cannot be reached at all, a fixed demo snapshot is
/// returned instead and a warning notice says so. Any other failure is
/// surfaced.
pub struct LoadDashboardUseCase<D> {
    repository: D,
    session: Arc<SessionGuard>,
    notifier: EphemeralNotifier,
    classifier: FailureClassifier,
}

impl<D: DashboardRepository> LoadDashboardUseCase<D> {
    pub fn new(repository: D, session: Arc<SessionGuard>, notifier: EphemeralNotifier) -> Self {
        Self {
            repository,
            session,
            notifier,
            classifier: FailureClassifier::new(DEFAULT_MAX_FILE_SIZE),
        }
    }

    pub async fn execute(&self) -> Result<DashboardSnapshot> {
        let credential = self.session.current_credential();

        match self.fetch_live(credential.as_ref()).await {
            Ok(snapshot) => Ok(snapshot),
            Err(failure) => self.recover(failure, credential.as_ref()),
        }
    }

    async fn fetch_live(&self, credential: Option<&Credential>) -> GatewayResult<DashboardSnapshot> {
        let stats = self.repository.fetch_stats(credential).await?;
        let recent = self.repository.fetch_recent(credential).await?;
        Ok(DashboardSnapshot {
            stats,
            recent,
            source: DataSource::Live,
        })
    }

    fn recover(
        &self,
        failure: FailureOutcome,
        credential: Option<&Credential>,
    ) -> Result<DashboardSnapshot> {
        let classification = self.classifier.classify(&failure);

        if classification.kind == ErrorKind::NetworkError {
            log::warn!("Dashboard unavailable, showing demo data: {}", classification.message);
            self.notifier
                .notify(DEMO_DATA_NOTICE, NoticeSeverity::Warning);
            return Ok(DashboardSnapshot::demo(Utc::now()));
        }

        if classification.requires_reauthentication() {
            if let Some(credential) = credential {
                self.session.handle_unauthorized(credential);
            }
        }

        self.notifier
            .notify(DASHBOARD_FAILURE_NOTICE, NoticeSeverity::Error);
        let error: ScanError = classification.into_error();
        Err(anyhow::Error::from(error).context(DASHBOARD_FAILURE_NOTICE))
    }
}
