use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Untyped `/predict` payload.
///
/// Every field is optional. Values may arrive as strings or numbers;
/// numeric confidences become percentage strings (`92.3` -> `"92.3%"`),
/// other numbers keep their JSON text form. Empty strings, `null`, and
/// structured values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawServiceResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    /// Older service builds report the verdict under `prediction`
    #[serde(default, deserialize_with = "lenient_string")]
    pub prediction: Option<String>,
    #[serde(default, deserialize_with = "lenient_percentage")]
    pub confidence: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub threat_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_percentage")]
    pub rf_confidence: Option<String>,
    #[serde(default, deserialize_with = "lenient_percentage")]
    pub xgb_confidence: Option<String>,
    #[serde(default, deserialize_with = "lenient_percentage")]
    pub nn_confidence: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub details: Option<String>,
}

impl RawServiceResponse {
    /// Parses a response body. An empty body is an empty response.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_percentage<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(format!("{}%", n)),
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}
