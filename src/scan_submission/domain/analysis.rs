use super::DataSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of features shown in an importance ranking
pub const TOP_FEATURE_COUNT: usize = 10;

/// One feature and its share of the ensemble's decision (`0.0..=1.0`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub importance: f64,
}

/// Receiver operating characteristic of the ensemble
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    #[serde(default)]
    pub fpr: Vec<f64>,
    #[serde(default)]
    pub tpr: Vec<f64>,
    #[serde(default)]
    pub auc: f64,
}

impl RocCurve {
    /// `(fpr, tpr)` pairs; unmatched trailing values are dropped
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.fpr.iter().copied().zip(self.tpr.iter().copied())
    }
}

/// Model evaluation figures from `/analysis`
///
/// The confusion matrix is `[[TN, FP], [FN, TP]]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub confusion_matrix: [[u64; 2]; 2],
    #[serde(default)]
    pub model_accuracies: BTreeMap<String, f64>,
    #[serde(default)]
    pub top_features: Vec<FeatureImportance>,
    #[serde(default)]
    pub roc: RocCurve,
    #[serde(default)]
    pub evaluation_image_url: Option<String>,
}

impl AnalysisReport {
    pub fn true_negatives(&self) -> u64 {
        self.confusion_matrix[0][0]
    }

    pub fn false_positives(&self) -> u64 {
        self.confusion_matrix[0][1]
    }

    pub fn false_negatives(&self) -> u64 {
        self.confusion_matrix[1][0]
    }

    pub fn true_positives(&self) -> u64 {
        self.confusion_matrix[1][1]
    }

    /// Share of correct predictions in the confusion matrix, in percent
    pub fn matrix_accuracy(&self) -> f64 {
        let total: u64 = self.confusion_matrix.iter().flatten().sum();
        if total == 0 {
            return 0.0;
        }
        (self.true_negatives() + self.true_positives()) as f64 * 100.0 / total as f64
    }

    pub fn top_features(&self) -> &[FeatureImportance] {
        let end = self.top_features.len().min(TOP_FEATURE_COUNT);
        &self.top_features[..end]
    }

    /// Image path, ignoring a blank value
    pub fn image_path(&self) -> Option<&str> {
        self.evaluation_image_url
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }

    /// Figures from the ensemble's published evaluation run
    pub fn demo() -> Self {
        let features = [
            ("StartXref", 0.138),
            ("MetadataSize", 0.120),
            ("Javascript", 0.110),
            ("PdfSize", 0.088),
            ("JS", 0.075),
            ("Stream", 0.065),
            ("XrefLength", 0.063),
            ("Xref", 0.038),
            ("Images", 0.032),
            ("Trailer", 0.028),
        ];
        let accuracies = [
            ("RandomForest", 0.9930),
            ("XGBoost", 0.9915),
            ("NeuralNetwork", 0.9850),
            ("Ensemble", 0.9920),
        ];

        Self {
            confusion_matrix: [[883, 11], [5, 1106]],
            model_accuracies: accuracies
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            top_features: features
                .iter()
                .map(|(name, importance)| FeatureImportance {
                    name: name.to_string(),
                    importance: *importance,
                })
                .collect(),
            roc: RocCurve {
                fpr: vec![0.0, 0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0],
                tpr: vec![0.0, 0.95, 0.97, 0.98, 0.99, 0.995, 0.998, 1.0],
                auc: 0.9995,
            },
            evaluation_image_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSnapshot {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub source: DataSource,
}

impl AnalysisSnapshot {
    pub fn demo() -> Self {
        Self {
            report: AnalysisReport::demo(),
            source: DataSource::Demo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_matrix_matches_dashboard_counters() {
        let report = AnalysisReport::demo();
        assert_eq!(report.true_negatives(), 883);
        assert_eq!(report.false_positives(), 11);
        assert_eq!(report.false_negatives(), 5);
        assert_eq!(report.true_positives(), 1106);
        assert_eq!(report.roc.auc, 0.9995);
        assert_eq!(report.model_accuracies.len(), 4);
        assert_eq!(report.top_features().len(), 10);
        assert_eq!(report.top_features()[0].name, "StartXref");
    }

    #[test]
    fn test_matrix_accuracy() {
        let report = AnalysisReport {
            confusion_matrix: [[45, 5], [0, 50]],
            ..Default::default()
        };
        assert_eq!(report.matrix_accuracy(), 95.0);
        assert_eq!(AnalysisReport::default().matrix_accuracy(), 0.0);
    }

    #[test]
    fn test_top_features_capped() {
        let report = AnalysisReport {
            top_features: (0..15)
                .map(|i| FeatureImportance {
                    name: format!("f{}", i),
                    importance: 0.01,
                })
                .collect(),
            ..Default::default()
        };
        assert_eq!(report.top_features().len(), TOP_FEATURE_COUNT);
        assert_eq!(report.top_features()[9].name, "f9");
    }

    #[test]
    fn test_partial_payload_uses_defaults() {
        let report: AnalysisReport = serde_json::from_str(
            r#"{"confusion_matrix": [[1, 2], [3, 4]], "roc": {"auc": 0.91}}"#,
        )
        .unwrap();
        assert_eq!(report.false_negatives(), 3);
        assert_eq!(report.roc.auc, 0.91);
        assert!(report.roc.fpr.is_empty());
        assert!(report.top_features.is_empty());
        assert!(report.image_path().is_none());
    }

    #[test]
    fn test_blank_image_path_is_absent() {
        let report = AnalysisReport {
            evaluation_image_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(report.image_path().is_none());

        let report = AnalysisReport {
            evaluation_image_url: Some("/static/model_evaluation.png".to_string()),
            ..Default::default()
        };
        assert_eq!(report.image_path(), Some("/static/model_evaluation.png"));
    }

    #[test]
    fn test_roc_points_pair_up() {
        let roc = RocCurve {
            fpr: vec![0.0, 0.5, 1.0],
            tpr: vec![0.0, 0.9],
            auc: 0.9,
        };
        assert_eq!(roc.points().collect::<Vec<_>>(), vec![(0.0, 0.0), (0.5, 0.9)]);
    }

    #[test]
    fn test_snapshot_serializes_flat() {
        let json = serde_json::to_value(AnalysisSnapshot::demo()).unwrap();
        assert_eq!(json["source"], "demo");
        assert_eq!(json["confusion_matrix"][1][1], 1106);
        assert_eq!(json["model_accuracies"]["XGBoost"], 0.9915);
    }
}
