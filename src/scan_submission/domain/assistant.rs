use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_PROMPT: &str = "Summarize the last scan results.";

/// Body of `POST /ai/complete`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantPrompt {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl AssistantPrompt {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Reply from the assistant endpoint.
///
/// `completion` carries the text. Providers that answer in another shape
/// only fill `raw`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    pub completion: Option<String>,
    #[serde(default)]
    pub raw: Option<Value>,
}

impl AssistantReply {
    /// Completion text, or the raw payload as JSON when there is none
    pub fn text(&self) -> String {
        match self.completion.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self
                .raw
                .as_ref()
                .filter(|raw| !raw.is_null())
                .map(Value::to_string)
                .unwrap_or_default(),
        }
    }
}
