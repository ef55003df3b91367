/// Network adapters for the classification service HTTP API
mod analysis_client;
mod assistant_client;
mod auth_client;
mod dashboard_client;
mod http;
mod predict_client;

#[cfg(test)]
mod test_server;

pub use analysis_client::AnalysisClient;
pub use assistant_client::AssistantClient;
pub use auth_client::AuthClient;
pub use dashboard_client::DashboardClient;
pub use predict_client::PredictClient;
