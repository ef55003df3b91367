use crate::scan_submission::domain::{
    CanonicalResult, EnsembleModel, FileMetadata, RawServiceResponse, ScanStatus, ThreatLevel,
    CONFIDENCE_NOT_AVAILABLE, DEFAULT_OVERALL_CONFIDENCE,
};
use std::collections::BTreeMap;

/// Label shown when the service reports no verdict
const UNKNOWN_STATUS_LABEL: &str = "Unknown";

/// ResultNormalizer turns a raw `/predict` payload into a [`CanonicalResult`].
///
/// This is a total function: every missing field gets a default, so the
/// presentation layer never has to branch on absence. File metadata is
/// taken from the local file only; the service is asked to classify the
/// upload, not to describe it.
pub struct ResultNormalizer;

impl ResultNormalizer {
    pub fn normalize(raw: &RawServiceResponse, file: FileMetadata) -> CanonicalResult {
        let status_label = raw
            .status
            .as_deref()
            .or(raw.prediction.as_deref())
            .unwrap_or(UNKNOWN_STATUS_LABEL)
            .to_string();
        let status = ScanStatus::from_label(&status_label);

        let threat_level = raw
            .threat_level
            .as_deref()
            .map(ThreatLevel::from_label)
            .unwrap_or_else(ThreatLevel::unknown);

        let model_confidences: BTreeMap<EnsembleModel, String> = EnsembleModel::ALL
            .iter()
            .map(|model| {
                let value = Self::model_field(raw, *model)
                    .unwrap_or(CONFIDENCE_NOT_AVAILABLE)
                    .to_string();
                (*model, value)
            })
            .collect();

        CanonicalResult {
            status,
            status_label,
            confidence: raw
                .confidence
                .clone()
                .unwrap_or_else(|| DEFAULT_OVERALL_CONFIDENCE.to_string()),
            threat_level,
            model_confidences,
            details: raw.details.clone().unwrap_or_default(),
            file,
        }
    }

    fn model_field(raw: &RawServiceResponse, model: EnsembleModel) -> Option<&str> {
        match model {
            EnsembleModel::RandomForest => raw.rf_confidence.as_deref(),
            EnsembleModel::XgBoost => raw.xgb_confidence.as_deref(),
            EnsembleModel::NeuralNetwork => raw.nn_confidence.as_deref(),
        }
    }
}
