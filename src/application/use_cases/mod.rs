/// Use cases module containing application business logic orchestration
mod ask_assistant;
mod load_analysis;
mod load_dashboard;
mod login;
mod submit_scan;

pub use ask_assistant::{AskAssistantUseCase, ASSISTANT_TIMEOUT_MESSAGE};
pub use load_analysis::{
    LoadAnalysisUseCase, ANALYSIS_FAILURE_NOTICE, IMAGE_FAILURE_NOTICE, IMAGE_SAVED_NOTICE,
    NO_IMAGE_NOTICE,
};
pub use load_dashboard::{LoadDashboardUseCase, DASHBOARD_FAILURE_NOTICE, DEMO_DATA_NOTICE};
pub use login::LoginUseCase;
pub use submit_scan::SubmitScanUseCase;
