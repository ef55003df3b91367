//! docscan - document malware scanning client
//!
//! This library submits documents to a remote malware classification
//! service, normalizes the verdict and manages the login session,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scan_submission`): File, failure and retry policies,
//!   result normalization and value objects (including model analysis and
//!   assistant prompts)
//! - **Application Layer** (`application`): Use cases, the session guard and
//!   the notice service
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP clients, filesystem and console
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use docscan::prelude::*;
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn scan() -> Result<()> {
//! // Create adapters
//! let policy = FilePolicy::default();
//! let file = FileSystemReader::new().read_candidate(Path::new("report.pdf"), &policy)?;
//! let gateway = PredictClient::new("http://localhost:8000", Duration::from_secs(30))?;
//! let session = Arc::new(SessionGuard::initialize(
//!     CredentialFileStore::new(PathBuf::from("session.json")),
//!     ConsoleAuthRedirect::new(),
//! ));
//!
//! // Create use case
//! let use_case = SubmitScanUseCase::new(
//!     gateway,
//!     StderrProgressReporter::new(),
//!     session,
//!     EphemeralNotifier::new(ConsoleNoticeSink::new()),
//!     policy,
//!     RetryPolicy::default(),
//! );
//!
//! // Execute and format
//! let result = use_case.submit(&file).await?;
//! println!("{}", TextFormatter::new().format_result(&result)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod scan_submission;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{
        ConsoleAuthRedirect, ConsoleNoticeSink, StderrProgressReporter,
    };
    pub use crate::adapters::outbound::filesystem::{
        CredentialFileStore, FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{
        AnalysisClient, AssistantClient, AuthClient, DashboardClient, PredictClient,
    };
    pub use crate::application::dto::OutputFormat;
    pub use crate::application::services::{EphemeralNotifier, SessionGuard};
    pub use crate::application::use_cases::{
        AskAssistantUseCase, LoadAnalysisUseCase, LoadDashboardUseCase, LoginUseCase,
        SubmitScanUseCase,
    };
    pub use crate::ports::outbound::{
        AnalysisRepository, AssistantGateway, AuthGateway, AuthRedirect, CredentialStore,
        DashboardRepository, GatewayResult, LoginResponse, NoticeSink, OutputPresenter,
        ProgressCallback, ProgressReporter, ResultFormatter, ScanGateway, UploadProgress,
    };
    pub use crate::scan_submission::domain::{
        AnalysisReport, AnalysisSnapshot, AssistantPrompt, AssistantReply, CandidateFile,
        CanonicalResult, Credential, DashboardSnapshot, DashboardStats, DataSource,
        EnsembleModel, Identity, Notice, NoticeSeverity, RawServiceResponse, RecentActivity,
        ScanState, ScanStatus, SessionRecord, ThreatLevel,
    };
    pub use crate::scan_submission::policies::{
        FailureClassifier, FailureOutcome, FilePolicy, RetryPolicy,
    };
    pub use crate::scan_submission::services::ResultNormalizer;
    pub use crate::shared::error::{ErrorKind, ExitCode, ScanError};
    pub use crate::shared::Result;
}
