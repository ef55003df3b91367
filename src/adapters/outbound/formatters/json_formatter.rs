use crate::ports::outbound::ResultFormatter;
use crate::scan_submission::domain::{
    AnalysisSnapshot, AssistantReply, CanonicalResult, DashboardSnapshot,
};
use crate::shared::Result;
use anyhow::Context;

/// JsonFormatter adapter emitting pretty-printed JSON
///
/// Field names follow the domain types, so scripts see the normalized
/// result (defaults filled in), never the raw service payload.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format_result(&self, result: &CanonicalResult) -> Result<String> {
        serde_json::to_string_pretty(result).context("Failed to serialize scan result")
    }

    fn format_dashboard(&self, snapshot: &DashboardSnapshot) -> Result<String> {
        serde_json::to_string_pretty(snapshot).context("Failed to serialize dashboard")
    }

    fn format_analysis(&self, snapshot: &AnalysisSnapshot) -> Result<String> {
        serde_json::to_string_pretty(snapshot).context("Failed to serialize analysis")
    }

    fn format_reply(&self, reply: &AssistantReply) -> Result<String> {
        serde_json::to_string_pretty(reply).context("Failed to serialize assistant reply")
    }
}
