/// Mock implementations for testing
mod mock_auth_redirect;
mod mock_credential_store;
mod mock_notice_sink;
mod mock_progress_reporter;
mod mock_scan_gateway;

pub use mock_auth_redirect::MockAuthRedirect;
pub use mock_credential_store::MockCredentialStore;
pub use mock_notice_sink::MockNoticeSink;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_scan_gateway::MockScanGateway;
