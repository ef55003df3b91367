use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ResultFormatter;

/// Factory for creating result formatters
///
/// Selects the formatter adapter for an output format so the CLI never
/// names adapter types directly.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use docscan::application::dto::OutputFormat;
    /// use docscan::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ResultFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_submission::domain::DashboardSnapshot;
    use chrono::Utc;

    #[test]
    fn test_json_formatter_emits_json() {
        let formatter = FormatterFactory::create(OutputFormat::Json);
        let output = formatter
            .format_dashboard(&DashboardSnapshot::demo(Utc::now()))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["source"], "demo");
    }

    #[test]
    fn test_text_formatter_emits_report() {
        let formatter = FormatterFactory::create(OutputFormat::Text);
        let output = formatter
            .format_dashboard(&DashboardSnapshot::demo(Utc::now()))
            .unwrap();
        assert!(output.contains("2005"));
        assert!(serde_json::from_str::<serde_json::Value>(&output).is_err());
    }
}
