/// Domain models for scan submission
mod analysis;
mod assistant;
mod candidate_file;
mod canonical_result;
mod credential;
mod dashboard;
mod notice;
mod raw_response;
mod scan_attempt;

pub use analysis::{
    AnalysisReport, AnalysisSnapshot, FeatureImportance, RocCurve, TOP_FEATURE_COUNT,
};
pub use assistant::{
    AssistantPrompt, AssistantReply, DEFAULT_MAX_TOKENS, DEFAULT_PROMPT, DEFAULT_TEMPERATURE,
};
pub use candidate_file::{effective_extension, CandidateFile, FileMetadata};
pub use canonical_result::{
    parse_percentage, CanonicalResult, EnsembleModel, ScanStatus, ThreatLevel, ThreatSeverity,
    CONFIDENCE_NOT_AVAILABLE, DEFAULT_OVERALL_CONFIDENCE,
};
pub use credential::{Credential, Identity, SessionRecord};
pub use dashboard::{DashboardSnapshot, DashboardStats, DataSource, RecentActivity};
pub use notice::{Notice, NoticeSeverity};
pub use raw_response::RawServiceResponse;
pub use scan_attempt::{ScanAttempt, ScanState};
