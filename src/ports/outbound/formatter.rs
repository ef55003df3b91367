use crate::scan_submission::domain::{
    AnalysisSnapshot, AssistantReply, CanonicalResult, DashboardSnapshot,
};
use crate::shared::Result;

/// ResultFormatter port for rendering results
///
/// This port abstracts the output format (colored text, JSON) used to
/// present a scan verdict, a dashboard or analysis snapshot, or an
/// assistant reply.
pub trait ResultFormatter {
    /// Renders a normalized scan result
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format_result(&self, result: &CanonicalResult) -> Result<String>;

    /// Renders dashboard counters and recent activity
    fn format_dashboard(&self, snapshot: &DashboardSnapshot) -> Result<String>;

    /// Renders model evaluation figures
    fn format_analysis(&self, snapshot: &AnalysisSnapshot) -> Result<String>;

    fn format_reply(&self, reply: &AssistantReply) -> Result<String>;
}
