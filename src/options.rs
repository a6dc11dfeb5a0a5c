use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use crate::error::{ModelError, ModelResult};
use crate::utils::as_number;

/// Temperature used when the caller leaves it unset
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Per-invocation generation options. Every field is independently optional;
/// `None` means "let the client decide".
///
/// Values are kept exactly as the host sent them, range included. `maxTokens`
/// stays a JSON number so negative or fractional input reaches the gateway
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
}

impl GenerationOptions {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: impl Into<Number>) -> Self {
        self.max_tokens = Some(max_tokens.into());
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    /// Set values paired with their option name, in schema order
    fn values(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("temperature", self.temperature),
            ("maxTokens", self.max_tokens.as_ref().and_then(Number::as_f64)),
            ("topP", self.top_p),
            ("frequencyPenalty", self.frequency_penalty),
            ("presencePenalty", self.presence_penalty),
        ]
    }

    /// Options whose value lies outside the bounds the UI advertises.
    ///
    /// Informational only: the gateway is the authority on what it accepts.
    pub fn out_of_bounds(&self) -> Vec<(&'static str, f64)> {
        self.values()
            .into_iter()
            .filter_map(|(name, value)| {
                let value = value?;
                let descriptor = OPTION_DESCRIPTORS.iter().find(|d| d.name == name)?;
                (!descriptor.contains(value)).then_some((name, value))
            })
            .collect()
    }

    /// Read the host's `options` node parameter.
    ///
    /// Missing keys and explicit `null`s are left unset. Only non-numeric
    /// values are refused; range is never checked here.
    pub fn from_parameter(value: &Value) -> ModelResult<Self> {
        let bag = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(bag) => bag,
            other => return Err(invalid("options", format!("expected an object, got {}", other))),
        };
        let number = |name: &str| -> ModelResult<Option<Number>> {
            match bag.get(name) {
                None | Some(Value::Null) => Ok(None),
                Some(v) => as_number(v)
                    .map(Some)
                    .ok_or_else(|| invalid(name, format!("expected a number, got {}", v))),
            }
        };
        let float = |name: &str| -> ModelResult<Option<f64>> {
            Ok(number(name)?.and_then(|n| n.as_f64()))
        };
        Ok(Self {
            temperature: float("temperature")?,
            max_tokens: number("maxTokens")?,
            top_p: float("topP")?,
            frequency_penalty: float("frequencyPenalty")?,
            presence_penalty: float("presencePenalty")?,
        })
    }
}

fn invalid(name: &str, reason: String) -> ModelError {
    ModelError::InvalidParameter {
        name: name.to_string(),
        reason,
    }
}

/// UI description of one numeric option in the options collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDescriptor {
    pub display_name: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub default: f64,
    pub type_options: NumberBounds,
    pub description: &'static str,
}

/// Presentation bounds for a number input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_step_size: Option<f64>,
}

impl OptionDescriptor {
    pub fn contains(&self, value: f64) -> bool {
        let bounds = &self.type_options;
        bounds.min_value.map_or(true, |min| value >= min)
            && bounds.max_value.map_or(true, |max| value <= max)
    }
}

pub static OPTION_DESCRIPTORS: &[OptionDescriptor] = &[
    OptionDescriptor {
        display_name: "Temperature",
        name: "temperature",
        kind: "number",
        default: 0.7,
        type_options: NumberBounds {
            min_value: Some(0.0),
            max_value: Some(2.0),
            number_step_size: Some(0.1),
        },
        description: "Controls randomness. Lower values make responses more focused and deterministic.",
    },
    OptionDescriptor {
        display_name: "Max Tokens",
        name: "maxTokens",
        kind: "number",
        default: 1024.0,
        type_options: NumberBounds {
            min_value: Some(1.0),
            max_value: None,
            number_step_size: None,
        },
        description: "Maximum number of tokens to generate",
    },
    OptionDescriptor {
        display_name: "Top P",
        name: "topP",
        kind: "number",
        default: 1.0,
        type_options: NumberBounds {
            min_value: Some(0.0),
            max_value: Some(1.0),
            number_step_size: Some(0.1),
        },
        description: "Nucleus sampling parameter. Only consider tokens with top_p probability mass.",
    },
    OptionDescriptor {
        display_name: "Frequency Penalty",
        name: "frequencyPenalty",
        kind: "number",
        default: 0.0,
        type_options: NumberBounds {
            min_value: Some(-2.0),
            max_value: Some(2.0),
            number_step_size: Some(0.1),
        },
        description: "Penalize new tokens based on their frequency in the text so far",
    },
    OptionDescriptor {
        display_name: "Presence Penalty",
        name: "presencePenalty",
        kind: "number",
        default: 0.0,
        type_options: NumberBounds {
            min_value: Some(-2.0),
            max_value: Some(2.0),
            number_step_size: Some(0.1),
        },
        description: "Penalize new tokens based on whether they appear in the text so far",
    },
];
