use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Aggregate scan counters from `/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_scans: u64,
    #[serde(default)]
    pub malicious_count: u64,
    #[serde(default)]
    pub benign_count: u64,
    #[serde(default)]
    pub todays_scans: u64,
    #[serde(default)]
    pub false_positives: u64,
    #[serde(default)]
    pub false_negatives: u64,
}

impl DashboardStats {
    /// Share of malicious verdicts, in percent
    pub fn malicious_rate(&self) -> f64 {
        if self.total_scans == 0 {
            return 0.0;
        }
        self.malicious_count as f64 * 100.0 / self.total_scans as f64
    }

    /// Counters derived from the ensemble's evaluation confusion matrix
    /// (TN=883, FP=11, FN=5, TP=1106).
    pub fn demo() -> Self {
        Self {
            total_scans: 2005,
            malicious_count: 1111,
            benign_count: 894,
            todays_scans: 23,
            false_positives: 11,
            false_negatives: 5,
        }
    }
}

/// One entry from `/dashboard/recent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub confidence: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date: Option<DateTime<Utc>>,
}

/// Accepts RFC 3339 or a zone-less ISO timestamp (taken as UTC).
/// Anything else becomes `None` rather than failing the whole list.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

impl RecentActivity {
    pub fn demo(now: DateTime<Utc>) -> Vec<Self> {
        vec![
            Self {
                filename: "sample.pdf".to_string(),
                status: "Benign".to_string(),
                confidence: "94.5%".to_string(),
                date: Some(now),
            },
            Self {
                filename: "document.docx".to_string(),
                status: "Malicious".to_string(),
                confidence: "87.2%".to_string(),
                date: Some(now - Duration::minutes(15)),
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Demo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent: Vec<RecentActivity>,
    pub source: DataSource,
}

impl DashboardSnapshot {
    pub fn demo(now: DateTime<Utc>) -> Self {
        Self {
            stats: DashboardStats::demo(),
            recent: RecentActivity::demo(now),
            source: DataSource::Demo,
        }
    }
}
