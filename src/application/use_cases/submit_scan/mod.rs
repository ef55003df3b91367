use crate::application::services::{EphemeralNotifier, SessionGuard};
use crate::ports::outbound::{ProgressCallback, ProgressReporter, ScanGateway, UploadProgress};
use crate::scan_submission::domain::{
    CandidateFile, CanonicalResult, Credential, NoticeSeverity, ScanAttempt, ScanState,
};
use crate::scan_submission::policies::{
    format_delay, FailureClassifier, FilePolicy, RetryDecision, RetryPolicy,
};
use crate::scan_submission::services::ResultNormalizer;
use crate::shared::error::ScanError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

type ScanResult<T> = std::result::Result<T, ScanError>;

/// How a single non-terminal attempt ended
enum AttemptOutcome {
    Completed(CanonicalResult),
    RetryScheduled { next_attempt: u32, delay: Duration },
}

/// SubmitScanUseCase - Core use case for scanning a document
///
/// Validates the candidate file, uploads it through the [`ScanGateway`],
/// classifies failures and retries transient ones with exponential backoff.
///
/// # Type Parameters
/// * `G` - ScanGateway implementation
/// * `PR` - ProgressReporter implementation
///
/// # Concurrency
/// One submission is active at a time. Calling `submit` again supersedes the
/// active one: its in-flight attempt or pending retry is abandoned and the
/// superseded call returns [`ScanError::Cancelled`].
pub struct SubmitScanUseCase<G, PR> {
    gateway: G,
    progress_reporter: Arc<PR>,
    session: Arc<SessionGuard>,
    notifier: EphemeralNotifier,
    file_policy: FilePolicy,
    classifier: FailureClassifier,
    retry_policy: RetryPolicy,
    state: Mutex<ScanState>,
    generation: watch::Sender<u64>,
}

impl<G, PR> SubmitScanUseCase<G, PR>
where
    G: ScanGateway,
    PR: ProgressReporter + 'static,
{
    /// Creates a new SubmitScanUseCase with injected dependencies
    pub fn new(
        gateway: G,
        progress_reporter: PR,
        session: Arc<SessionGuard>,
        notifier: EphemeralNotifier,
        file_policy: FilePolicy,
        retry_policy: RetryPolicy,
    ) -> Self {
        let classifier = FailureClassifier::new(file_policy.max_bytes());
        let (generation, _) = watch::channel(0);
        Self {
            gateway,
            progress_reporter: Arc::new(progress_reporter),
            session,
            notifier,
            file_policy,
            classifier,
            retry_policy,
            state: Mutex::new(ScanState::Idle),
            generation,
        }
    }

    /// Current lifecycle state of the latest submission
    pub fn state(&self) -> ScanState {
        self.lock_state().clone()
    }

    /// Cancels the active submission, if any.
    ///
    /// A cancelled retry performs no further request and emits no notice.
    pub fn cancel(&self) {
        let mut state = self.lock_state();
        if state.is_pending() {
            self.generation.send_modify(|generation| *generation += 1);
            *state = ScanState::Cancelled;
            log::debug!("Scan cancelled");
        }
    }

    /// Executes the scan use case
    ///
    /// # Errors
    /// Returns the classified [`ScanError`]. Validation and missing-session
    /// failures are returned before any request is made.
    pub async fn submit(&self, file: &CandidateFile) -> ScanResult<CanonicalResult> {
        // Step 1: Local validation, no network
        if let Err(e) = self.file_policy.validate_file(file) {
            self.notifier.notify(e.to_string(), NoticeSeverity::Error);
            return Err(e);
        }

        // Step 2: A session is required
        let credential = match self.session.require_credential() {
            Ok(credential) => credential,
            Err(e) => {
                self.notifier.notify(e.to_string(), NoticeSeverity::Error);
                return Err(e);
            }
        };

        // Step 3: Supersede whatever was running
        let generation = self.begin();
        let mut attempt = ScanAttempt::first(Uuid::new_v4(), file.name());

        self.progress_reporter
            .report(&format!("📤 Uploading {} for analysis...", file.name()));

        loop {
            let (next_attempt, delay) =
                match self.run_attempt(file, &credential, &attempt, generation).await? {
                    AttemptOutcome::Completed(result) => return Ok(result),
                    AttemptOutcome::RetryScheduled {
                        next_attempt,
                        delay,
                    } => (next_attempt, delay),
                };

            self.set_state(
                generation,
                ScanState::RetryScheduled {
                    attempt: next_attempt,
                    delay,
                },
            );
            self.notifier.notify(
                format!("Server error. Retrying in {}...", format_delay(delay)),
                NoticeSeverity::Warning,
            );
            log::info!(
                "Scan {} attempt {} scheduled in {:?}",
                attempt.scan_id,
                next_attempt,
                delay
            );

            tokio::select! {
                biased;
                _ = self.superseded(generation) => return Err(ScanError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
            attempt = attempt.next();
        }
    }

    /// Runs one attempt; terminal failures come back as `Err`.
    async fn run_attempt(
        &self,
        file: &CandidateFile,
        credential: &Credential,
        attempt: &ScanAttempt,
        generation: u64,
    ) -> ScanResult<AttemptOutcome> {
        self.set_state(
            generation,
            ScanState::InFlight {
                attempt: attempt.attempt,
            },
        );
        log::debug!(
            "Scan {} attempt {} for {} ({} bytes)",
            attempt.scan_id,
            attempt.attempt,
            attempt.file_name,
            file.size()
        );

        let on_progress = self.progress_callback(file.name());
        let outcome = tokio::select! {
            biased;
            _ = self.superseded(generation) => return Err(ScanError::Cancelled),
            outcome = self.gateway.submit(file, credential, on_progress) => outcome,
        };

        let failure = match outcome {
            Ok(raw) => {
                let result = ResultNormalizer::normalize(&raw, file.metadata());
                self.set_state(generation, ScanState::Succeeded);
                self.progress_reporter.report_completion(&format!(
                    "Scan complete: {} ({})",
                    result.status, result.confidence
                ));
                self.notifier.notify(
                    format!("{} scanned successfully", file.name()),
                    NoticeSeverity::Success,
                );
                return Ok(AttemptOutcome::Completed(result));
            }
            Err(failure) => failure,
        };

        let classification = self.classifier.classify(&failure);
        log::debug!(
            "Scan {} attempt {} failed: {:?} -> {}",
            attempt.scan_id,
            attempt.attempt,
            failure,
            classification.kind
        );

        if classification.requires_reauthentication() {
            self.session.handle_unauthorized(credential);
        }

        match self.retry_policy.decide(&classification, attempt.attempt) {
            RetryDecision::Abort => {
                self.set_state(generation, ScanState::Failed(classification.kind));
                self.progress_reporter.report_error(&classification.message);
                self.notifier
                    .notify(classification.message.clone(), NoticeSeverity::Error);
                Err(classification.into_error())
            }
            RetryDecision::Retry {
                next_attempt,
                delay,
            } => Ok(AttemptOutcome::RetryScheduled {
                next_attempt,
                delay,
            }),
        }
    }

    fn begin(&self) -> u64 {
        let mut state = self.lock_state();
        let mut generation = 0;
        self.generation.send_modify(|current| {
            *current += 1;
            generation = *current;
        });
        *state = ScanState::InFlight { attempt: 0 };
        generation
    }

    /// Resolves once `generation` is no longer the active submission
    async fn superseded(&self, generation: u64) {
        let mut receiver = self.generation.subscribe();
        // The sender lives as long as `self`, so this only ends on a change.
        let _ = receiver.wait_for(|current| *current != generation).await;
    }

    fn set_state(&self, generation: u64, next: ScanState) {
        let mut state = self.lock_state();
        if *self.generation.borrow() == generation {
            *state = next;
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ScanState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Progress callback that never reports a smaller value within one attempt
    fn progress_callback(&self, file_name: &str) -> ProgressCallback {
        let reporter = Arc::clone(&self.progress_reporter);
        let high_water = AtomicU64::new(0);
        let message = format!("Uploading {}", file_name);
        Arc::new(move |progress: UploadProgress| {
            let sent = progress.sent.min(progress.total);
            let previous = high_water.fetch_max(sent, Ordering::Relaxed);
            if sent >= previous {
                reporter.report_progress(sent, progress.total, Some(&message));
            }
        })
    }
}
