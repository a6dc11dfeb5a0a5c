use serde::{Deserialize, Serialize};
use serde_json::Number;
use crate::types::ModelId;

/// Gateway endpoint every supplied client talks to
pub const BLACKBOX_API_BASE: &str = "https://api.blackbox.ai";

/// Normalized configuration for one chat-model client.
///
/// Produced fresh by the supplier on every call; unset generation parameters
/// stay `None` so the request omits them and the gateway applies its own default.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    pub model: ModelId,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub temperature: f64,
    #[serde(default)]
    pub max_tokens: Option<Number>,
    #[serde(default)]
    pub top_p: Option<f64>,
    #[serde(default)]
    pub frequency_penalty: Option<f64>,
    #[serde(default)]
    pub presence_penalty: Option<f64>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    BLACKBOX_API_BASE.to_string()
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("top_p", &self.top_p)
            .field("frequency_penalty", &self.frequency_penalty)
            .field("presence_penalty", &self.presence_penalty)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
