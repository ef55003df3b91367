use super::FileMetadata;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Overall confidence used when the service omits one
pub const DEFAULT_OVERALL_CONFIDENCE: &str = "0%";

/// Placeholder for a per-model confidence the service did not report
pub const CONFIDENCE_NOT_AVAILABLE: &str = "N/A";

/// Parses a percentage string such as `"92.3%"` into a number.
///
/// A single trailing `%` is stripped. Anything unparsable, or a non-finite
/// value, is treated as zero.
pub fn parse_percentage(value: &str) -> f64 {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    match number.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => 0.0,
    }
}

/// Verdict reported by the classification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanStatus {
    Malicious,
    Benign,
    Unknown,
}

impl ScanStatus {
    /// Exact, case-insensitive match on the trimmed label. Anything else,
    /// including negations like `"Not Malicious"`, is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("malicious") {
            ScanStatus::Malicious
        } else if label.eq_ignore_ascii_case("benign") {
            ScanStatus::Benign
        } else {
            ScanStatus::Unknown
        }
    }

    pub fn is_malicious(self) -> bool {
        matches!(self, ScanStatus::Malicious)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStatus::Malicious => write!(f, "Malicious"),
            ScanStatus::Benign => write!(f, "Benign"),
            ScanStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Severity bucket derived from a threat level label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ThreatSeverity {
    Unknown,
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

/// Threat level as reported, plus its severity bucket.
///
/// The label is kept verbatim so a normalized result shows exactly what the
/// service sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatLevel {
    label: String,
    severity: ThreatSeverity,
}

impl ThreatLevel {
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let lower = label.to_lowercase();
        let severity = if lower.contains("critical") {
            ThreatSeverity::Critical
        } else if lower.contains("high") {
            ThreatSeverity::High
        } else if lower.contains("medium") {
            ThreatSeverity::Medium
        } else if lower.contains("low") {
            ThreatSeverity::Low
        } else if lower.contains("unknown") || lower.trim().is_empty() {
            ThreatSeverity::Unknown
        } else {
            ThreatSeverity::Minimal
        };
        Self { label, severity }
    }

    pub fn unknown() -> Self {
        Self {
            label: "Unknown".to_string(),
            severity: ThreatSeverity::Unknown,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn severity(&self) -> ThreatSeverity {
        self.severity
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Serialize for ThreatLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

/// Models of the service's ensemble, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EnsembleModel {
    #[serde(rename = "Random Forest")]
    RandomForest,
    #[serde(rename = "XGBoost")]
    XgBoost,
    #[serde(rename = "Neural Network")]
    NeuralNetwork,
}

impl EnsembleModel {
    pub const ALL: [EnsembleModel; 3] = [
        EnsembleModel::RandomForest,
        EnsembleModel::XgBoost,
        EnsembleModel::NeuralNetwork,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            EnsembleModel::RandomForest => "Random Forest",
            EnsembleModel::XgBoost => "XGBoost",
            EnsembleModel::NeuralNetwork => "Neural Network",
        }
    }
}

impl fmt::Display for EnsembleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Normalized scan verdict handed to the presentation layer.
///
/// Every field is populated; absent service values have already been
/// replaced by defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalResult {
    pub status: ScanStatus,
    /// Verdict label exactly as the service sent it
    pub status_label: String,
    pub confidence: String,
    pub threat_level: ThreatLevel,
    pub model_confidences: BTreeMap<EnsembleModel, String>,
    pub details: String,
    pub file: FileMetadata,
}

impl CanonicalResult {
    /// Overall confidence as a number in `0..=100`
    pub fn confidence_value(&self) -> f64 {
        parse_percentage(&self.confidence).clamp(0.0, 100.0)
    }

    pub fn model_confidence(&self, model: EnsembleModel) -> &str {
        self.model_confidences
            .get(&model)
            .map(String::as_str)
            .unwrap_or(CONFIDENCE_NOT_AVAILABLE)
    }

    pub fn is_malicious(&self) -> bool {
        self.status.is_malicious()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percentage_variants() {
        assert_eq!(parse_percentage("92.3%"), 92.3);
        assert_eq!(parse_percentage(" 95 % "), 95.0);
        assert_eq!(parse_percentage("90"), 90.0);
    }

    #[test]
    fn test_parse_percentage_unparsable_is_zero() {
        assert_eq!(parse_percentage("N/A"), 0.0);
        assert_eq!(parse_percentage(""), 0.0);
        assert_eq!(parse_percentage("%"), 0.0);
        assert_eq!(parse_percentage("NaN%"), 0.0);
        assert_eq!(parse_percentage("inf"), 0.0);
    }

    #[test]
    fn test_status_from_label() {
        assert_eq!(ScanStatus::from_label("Malicious"), ScanStatus::Malicious);
        assert_eq!(ScanStatus::from_label("MALICIOUS"), ScanStatus::Malicious);
        assert_eq!(ScanStatus::from_label("benign"), ScanStatus::Benign);
        assert_eq!(ScanStatus::from_label(" Benign\n"), ScanStatus::Benign);
        assert_eq!(ScanStatus::from_label("pending"), ScanStatus::Unknown);
    }

    #[test]
    fn test_negated_labels_are_not_malicious() {
        for label in ["Not Malicious", "Non-Malicious", "non malicious", "MALICIOUS?"] {
            let status = ScanStatus::from_label(label);
            assert_eq!(status, ScanStatus::Unknown, "label {:?}", label);
            assert!(!status.is_malicious());
        }
    }

    #[test]
    fn test_threat_level_keeps_label() {
        let level = ThreatLevel::from_label("HIGH");
        assert_eq!(level.label(), "HIGH");
        assert_eq!(level.severity(), ThreatSeverity::High);
    }

    #[test]
    fn test_threat_level_buckets() {
        assert_eq!(
            ThreatLevel::from_label("Critical").severity(),
            ThreatSeverity::Critical
        );
        assert_eq!(
            ThreatLevel::from_label("medium").severity(),
            ThreatSeverity::Medium
        );
        assert_eq!(ThreatLevel::from_label("LOW").severity(), ThreatSeverity::Low);
        assert_eq!(
            ThreatLevel::from_label("NONE").severity(),
            ThreatSeverity::Minimal
        );
        assert_eq!(
            ThreatLevel::from_label("UNKNOWN").severity(),
            ThreatSeverity::Unknown
        );
    }

    #[test]
    fn test_threat_level_serializes_as_label() {
        let json = serde_json::to_string(&ThreatLevel::from_label("HIGH")).unwrap();
        assert_eq!(json, "\"HIGH\"");
    }

    #[test]
    fn test_model_confidence_fallback() {
        let result = CanonicalResult {
            status: ScanStatus::Unknown,
            status_label: "Unknown".to_string(),
            confidence: "abc".to_string(),
            threat_level: ThreatLevel::unknown(),
            model_confidences: BTreeMap::new(),
            details: String::new(),
            file: FileMetadata::new("a.pdf", 1, Some(".pdf")),
        };
        assert_eq!(result.model_confidence(EnsembleModel::XgBoost), "N/A");
        assert_eq!(result.confidence_value(), 0.0);
    }

    #[test]
    fn test_ensemble_order_matches_presentation() {
        let mut models = vec![
            EnsembleModel::NeuralNetwork,
            EnsembleModel::RandomForest,
            EnsembleModel::XgBoost,
        ];
        models.sort();
        assert_eq!(models, EnsembleModel::ALL.to_vec());
    }
}
