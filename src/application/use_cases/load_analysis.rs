use super::load_dashboard::DEMO_DATA_NOTICE;
use crate::application::services::{EphemeralNotifier, SessionGuard};
use crate::ports::outbound::{AnalysisRepository, OutputPresenter};
use crate::scan_submission::domain::{
    AnalysisReport, AnalysisSnapshot, Credential, DataSource, NoticeSeverity,
};
use crate::scan_submission::policies::{FailureClassifier, FailureOutcome, DEFAULT_MAX_FILE_SIZE};
use crate::shared::error::{ErrorKind, ScanError};
use crate::shared::Result;
use std::sync::Arc;

pub const ANALYSIS_FAILURE_NOTICE: &str = "Failed to load analysis data";
pub const NO_IMAGE_NOTICE: &str = "No evaluation image available";
pub const IMAGE_FAILURE_NOTICE: &str = "Failed to download image";
pub const IMAGE_SAVED_NOTICE: &str = "Image downloaded successfully";

/// LoadAnalysisUseCase fetches the ensemble's evaluation figures
///
/// Falls back to the published evaluation run when the service cannot be
/// reached, like the dashboard does. The evaluation image, when the report
/// names one, is downloaded with the current session.
pub struct LoadAnalysisUseCase<R> {
    repository: R,
    session: Arc<SessionGuard>,
    notifier: EphemeralNotifier,
    classifier: FailureClassifier,
}

impl<R: AnalysisRepository> LoadAnalysisUseCase<R> {
    pub fn new(repository: R, session: Arc<SessionGuard>, notifier: EphemeralNotifier) -> Self {
        Self {
            repository,
            session,
            notifier,
            classifier: FailureClassifier::new(DEFAULT_MAX_FILE_SIZE),
        }
    }

    pub async fn execute(&self) -> Result<AnalysisSnapshot> {
        let credential = self.session.current_credential();

        match self.repository.fetch_analysis(credential.as_ref()).await {
            Ok(report) => Ok(AnalysisSnapshot {
                report,
                source: DataSource::Live,
            }),
            Err(failure) => {
                let error = match self.fail(&failure, credential.as_ref()) {
                    Some(error) => error,
                    None => {
                        self.notifier.notify(DEMO_DATA_NOTICE, NoticeSeverity::Warning);
                        return Ok(AnalysisSnapshot::demo());
                    }
                };
                self.notifier
                    .notify(ANALYSIS_FAILURE_NOTICE, NoticeSeverity::Error);
                Err(anyhow::Error::from(error).context(ANALYSIS_FAILURE_NOTICE))
            }
        }
    }

    /// Downloads the evaluation image into `presenter`.
    ///
    /// Returns `false` (with a warning notice) when the report has no image.
    pub async fn save_evaluation_image(
        &self,
        report: &AnalysisReport,
        presenter: &dyn OutputPresenter,
    ) -> Result<bool> {
        let Some(path) = report.image_path() else {
            self.notifier.notify(NO_IMAGE_NOTICE, NoticeSeverity::Warning);
            return Ok(false);
        };

        let credential = self.session.current_credential();
        let image = match self
            .repository
            .fetch_evaluation_image(path, credential.as_ref())
            .await
        {
            Ok(image) => image,
            Err(failure) => {
                let error = self
                    .fail(&failure, credential.as_ref())
                    .unwrap_or_else(|| self.classifier.classify(&failure).into_error());
                self.notifier
                    .notify(IMAGE_FAILURE_NOTICE, NoticeSeverity::Error);
                return Err(anyhow::Error::from(error).context(IMAGE_FAILURE_NOTICE));
            }
        };

        if let Err(e) = presenter.present_bytes(&image) {
            self.notifier
                .notify(IMAGE_FAILURE_NOTICE, NoticeSeverity::Error);
            return Err(e);
        }
        self.notifier
            .notify(IMAGE_SAVED_NOTICE, NoticeSeverity::Success);
        Ok(true)
    }

    /// Classifies a failure. `None` means the service is unreachable and
    /// demo data may stand in.
    fn fail(&self, failure: &FailureOutcome, credential: Option<&Credential>) -> Option<ScanError> {
        let classification = self.classifier.classify(failure);

        if classification.kind == ErrorKind::NetworkError {
            log::warn!("Analysis unavailable: {}", classification.message);
            return None;
        }

        if classification.requires_reauthentication() {
            if let Some(credential) = credential {
                self.session.handle_unauthorized(credential);
            }
        }
        Some(classification.into_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{AuthRedirect, CredentialStore, GatewayResult, NoticeSink};
    use crate::scan_submission::domain::{Notice, SessionRecord};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockAnalysisRepository {
        report: GatewayResult<AnalysisReport>,
        image: GatewayResult<Vec<u8>>,
        image_requests: Mutex<Vec<(String, bool)>>,
    }

    impl MockAnalysisRepository {
        fn new(report: GatewayResult<AnalysisReport>, image: GatewayResult<Vec<u8>>) -> Self {
            Self {
                report,
                image,
                image_requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AnalysisRepository for MockAnalysisRepository {
        async fn fetch_analysis(
            &self,
            _credential: Option<&Credential>,
        ) -> GatewayResult<AnalysisReport> {
            self.report.clone()
        }

        async fn fetch_evaluation_image(
            &self,
            path: &str,
            credential: Option<&Credential>,
        ) -> GatewayResult<Vec<u8>> {
            self.image_requests
                .lock()
                .unwrap()
                .push((path.to_string(), credential.is_some()));
            self.image.clone()
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStore(Arc<Mutex<Option<SessionRecord>>>);

    impl CredentialStore for MemoryStore {
        fn load(&self) -> Result<Option<SessionRecord>> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn save(&self, record: &SessionRecord) -> Result<()> {
            *self.0.lock().unwrap() = Some(record.clone());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.0.lock().unwrap() = None;
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct CountingRedirect(Arc<AtomicUsize>);

    impl AuthRedirect for CountingRedirect {
        fn redirect_to_login(&self, _reason: &str) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<(NoticeSeverity, String)>>>);

    impl NoticeSink for RecordingSink {
        fn display(&self, notice: &Notice) {
            self.0
                .lock()
                .unwrap()
                .push((notice.severity, notice.message.clone()));
        }

        fn retract(&self, _notice: &Notice) {}
    }

    #[derive(Default)]
    struct MemoryPresenter(Mutex<Option<Vec<u8>>>);

    impl OutputPresenter for MemoryPresenter {
        fn present(&self, content: &str) -> Result<()> {
            self.present_bytes(content.as_bytes())
        }

        fn present_bytes(&self, content: &[u8]) -> Result<()> {
            *self.0.lock().unwrap() = Some(content.to_vec());
            Ok(())
        }
    }

    struct Harness {
        use_case: LoadAnalysisUseCase<MockAnalysisRepository>,
        store: MemoryStore,
        redirect: CountingRedirect,
        sink: RecordingSink,
    }

    fn harness(repository: MockAnalysisRepository) -> Harness {
        let store = MemoryStore::default();
        let redirect = CountingRedirect::default();
        let sink = RecordingSink::default();
        let session = Arc::new(SessionGuard::initialize(store.clone(), redirect.clone()));
        session.set_credential(Credential::new("tok")).unwrap();
        Harness {
            use_case: LoadAnalysisUseCase::new(
                repository,
                session,
                EphemeralNotifier::new(sink.clone()),
            ),
            store,
            redirect,
            sink,
        }
    }

    fn live_report() -> AnalysisReport {
        AnalysisReport {
            confusion_matrix: [[40, 2], [1, 57]],
            evaluation_image_url: Some("/static/model_evaluation.png".to_string()),
            ..Default::default()
        }
    }

    fn notices(h: &Harness) -> Vec<(NoticeSeverity, String)> {
        h.sink.0.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_live_analysis() {
        let h = harness(MockAnalysisRepository::new(Ok(live_report()), Ok(Vec::new())));

        let snapshot = h.use_case.execute().await.unwrap();

        assert_eq!(snapshot.source, DataSource::Live);
        assert_eq!(snapshot.report, live_report());
        assert!(notices(&h).is_empty());
    }

    #[tokio::test]
    async fn test_network_error_falls_back_to_evaluation_run() {
        let h = harness(MockAnalysisRepository::new(
            Err(FailureOutcome::Connectivity {
                message: "connection refused".to_string(),
            }),
            Ok(Vec::new()),
        ));

        let snapshot = h.use_case.execute().await.unwrap();

        assert_eq!(snapshot.source, DataSource::Demo);
        assert_eq!(snapshot.report.confusion_matrix, [[883, 11], [5, 1106]]);
        assert_eq!(snapshot.report.roc.auc, 0.9995);
        assert!(snapshot.report.image_path().is_none());
        assert_eq!(
            notices(&h),
            vec![(NoticeSeverity::Warning, DEMO_DATA_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_timeout_is_not_masked_by_demo_data() {
        let h = harness(MockAnalysisRepository::new(
            Err(FailureOutcome::Timeout),
            Ok(Vec::new()),
        ));

        let err = h.use_case.execute().await.unwrap_err();

        assert_eq!(ScanError::find_in(&err).unwrap().kind(), ErrorKind::Timeout);
        assert_eq!(
            notices(&h),
            vec![(NoticeSeverity::Error, ANALYSIS_FAILURE_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let h = harness(MockAnalysisRepository::new(
            Err(FailureOutcome::http(401, Value::Null)),
            Ok(Vec::new()),
        ));

        let err = h.use_case.execute().await.unwrap_err();

        assert_eq!(
            ScanError::find_in(&err).unwrap().kind(),
            ErrorKind::Unauthorized
        );
        assert!(h.store.load().unwrap().is_none());
        assert_eq!(h.redirect.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_save_image_with_session() {
        let h = harness(MockAnalysisRepository::new(
            Ok(live_report()),
            Ok(b"PNGDATA".to_vec()),
        ));
        let presenter = MemoryPresenter::default();

        let saved = h
            .use_case
            .save_evaluation_image(&live_report(), &presenter)
            .await
            .unwrap();

        assert!(saved);
        assert_eq!(presenter.0.lock().unwrap().as_deref(), Some(&b"PNGDATA"[..]));
        assert_eq!(
            *h.use_case.repository.image_requests.lock().unwrap(),
            vec![("/static/model_evaluation.png".to_string(), true)]
        );
        assert_eq!(
            notices(&h),
            vec![(NoticeSeverity::Success, IMAGE_SAVED_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_no_image_warns_without_request() {
        let h = harness(MockAnalysisRepository::new(Ok(live_report()), Ok(Vec::new())));
        let presenter = MemoryPresenter::default();

        let saved = h
            .use_case
            .save_evaluation_image(&AnalysisReport::demo(), &presenter)
            .await
            .unwrap();

        assert!(!saved);
        assert!(presenter.0.lock().unwrap().is_none());
        assert!(h.use_case.repository.image_requests.lock().unwrap().is_empty());
        assert_eq!(
            notices(&h),
            vec![(NoticeSeverity::Warning, NO_IMAGE_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_image_download_failure() {
        let h = harness(MockAnalysisRepository::new(
            Ok(live_report()),
            Err(FailureOutcome::http(404, Value::Null)),
        ));
        let presenter = MemoryPresenter::default();

        let err = h
            .use_case
            .save_evaluation_image(&live_report(), &presenter)
            .await
            .unwrap_err();

        assert!(err.to_string().contains(IMAGE_FAILURE_NOTICE));
        assert!(presenter.0.lock().unwrap().is_none());
        assert_eq!(
            notices(&h),
            vec![(NoticeSeverity::Error, IMAGE_FAILURE_NOTICE.to_string())]
        );
    }
}
