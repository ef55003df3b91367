/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (HTTP service, session file, console).
pub mod analysis_repository;
pub mod assistant_gateway;
pub mod auth_gateway;
pub mod auth_redirect;
pub mod credential_store;
pub mod dashboard_repository;
pub mod formatter;
pub mod notice_sink;
pub mod output_presenter;
pub mod progress_reporter;
pub mod scan_gateway;

pub use analysis_repository::AnalysisRepository;
pub use assistant_gateway::AssistantGateway;
pub use auth_gateway::{AuthGateway, LoginResponse};
pub use auth_redirect::AuthRedirect;
pub use credential_store::CredentialStore;
pub use dashboard_repository::DashboardRepository;
pub use formatter::ResultFormatter;
pub use notice_sink::NoticeSink;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use scan_gateway::{GatewayResult, ProgressCallback, ScanGateway, UploadProgress};
