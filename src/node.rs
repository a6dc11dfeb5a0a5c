//! The `Blackbox Chat Model` node: a supplier that hands the host a chat-model
//! client configured for the Blackbox gateway.
//!
//! The host owns credential storage, parameter UI and scheduling. It reaches
//! this node through [`SupplyContext`] and gets back a [`SupplyData`] holding a
//! fresh [`ModelClient`]. Supplying never touches the network.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::catalogue::{ModelOption, DEFAULT_MODEL, MODEL_CATALOGUE};
use crate::client::ModelClient;
use crate::config::{ClientConfig, BLACKBOX_API_BASE};
use crate::credentials::{BlackboxApiCredential, CREDENTIAL_NAME};
use crate::error::{ModelError, ModelResult};
use crate::options::{GenerationOptions, OptionDescriptor, DEFAULT_TEMPERATURE, OPTION_DESCRIPTORS};
use crate::types::ModelId;

pub const NODE_NAME: &str = "blackboxChatModel";

/// Output connection type consumed by AI agent / chain nodes
pub const AI_LANGUAGE_MODEL: &str = "ai_languageModel";

/// What the host exposes to a node while it supplies data
#[async_trait]
pub trait SupplyContext: Send + Sync {
    /// Decrypted credential data, e.g. `{"apiKey": "..."}`
    async fn get_credentials(&self, name: &str) -> ModelResult<Value>;

    /// Raw parameter value for `item_index`, `None` when the user never set it
    fn get_node_parameter(&self, name: &str, item_index: usize) -> Option<Value>;
}

/// What a supplier node hands back to the host
#[derive(Debug, Clone)]
pub struct SupplyData {
    pub response: ModelClient,
}

/// Map the user's selections to a client configuration.
///
/// Key and model are copied verbatim, temperature falls back to `0.7`, every
/// other option passes through untouched, and the base URL is always the
/// gateway's. Nothing is validated: unknown models, empty keys and
/// out-of-range numbers are left for the gateway to reject.
pub fn supply_config(
    credential: &BlackboxApiCredential,
    model: &str,
    options: &GenerationOptions,
) -> ClientConfig {
    ClientConfig {
        api_key: credential.api_key.clone(),
        model: ModelId::from(model),
        base_url: BLACKBOX_API_BASE.to_string(),
        temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        max_tokens: options.max_tokens.clone(),
        top_p: options.top_p,
        frequency_penalty: options.frequency_penalty,
        presence_penalty: options.presence_penalty,
        timeout_secs: None,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlackboxChatModel;

impl BlackboxChatModel {
    pub fn description(&self) -> NodeDescription {
        node_description()
    }

    /// Build one chat-model client from the host's current parameters
    pub async fn supply(&self, ctx: &dyn SupplyContext) -> ModelResult<SupplyData> {
        let credential: BlackboxApiCredential = serde_json::from_value(ctx.get_credentials(CREDENTIAL_NAME).await?)?;

        let model = match ctx.get_node_parameter("model", 0) {
            None | Some(Value::Null) => DEFAULT_MODEL.to_string(),
            Some(Value::String(model)) => model,
            Some(other) => {
                return Err(ModelError::InvalidParameter {
                    name: "model".to_string(),
                    reason: format!("expected a string, got {}", other),
                })
            }
        };
        let options = match ctx.get_node_parameter("options", 0) {
            Some(value) => GenerationOptions::from_parameter(&value)?,
            None => GenerationOptions::default(),
        };

        for (name, value) in options.out_of_bounds() {
            warn!(option = name, value, "Option outside the documented range, forwarding as-is");
        }
        if !crate::catalogue::is_known(&model) {
            debug!(%model, "Model not in catalogue, forwarding as-is");
        }

        let config = supply_config(&credential, &model, &options);
        debug!(?config, "Supplying chat model");
        Ok(SupplyData {
            response: ModelClient::new(&config)?,
        })
    }
}

/// Node registration metadata, serialized camelCase for the host UI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub group: Vec<&'static str>,
    pub version: u32,
    pub description: &'static str,
    pub defaults: NodeDefaults,
    pub codex: Codex,
    pub inputs: Vec<&'static str>,
    pub outputs: Vec<&'static str>,
    pub output_names: Vec<&'static str>,
    pub credentials: Vec<CredentialRef>,
    pub properties: Vec<NodeProperty>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeDefaults {
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Codex {
    pub categories: Vec<&'static str>,
    pub subcategories: BTreeMap<&'static str, Vec<&'static str>>,
    pub resources: CodexResources,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexResources {
    pub primary_documentation: Vec<DocumentationLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentationLink {
    pub url: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialRef {
    pub name: &'static str,
    pub required: bool,
}

/// A parameter shown on the node
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum NodeProperty {
    /// Single choice from a fixed list
    Options {
        display_name: &'static str,
        name: &'static str,
        default: &'static str,
        description: &'static str,
        options: &'static [ModelOption],
    },
    /// Bag of optional fields the user adds one by one
    Collection {
        display_name: &'static str,
        name: &'static str,
        placeholder: &'static str,
        default: Value,
        options: &'static [OptionDescriptor],
    },
}

impl NodeProperty {
    pub fn name(&self) -> &'static str {
        match self {
            NodeProperty::Options { name, .. } | NodeProperty::Collection { name, .. } => *name,
        }
    }
}

fn node_description() -> NodeDescription {
    NodeDescription {
        display_name: "Blackbox Chat Model",
        name: NODE_NAME,
        icon: "file:blackbox.svg",
        group: vec!["transform"],
        version: 1,
        description: "Use Blackbox AI models for chat completions",
        defaults: NodeDefaults {
            name: "Blackbox Chat Model",
        },
        codex: Codex {
            categories: vec!["AI"],
            subcategories: BTreeMap::from([("AI", vec!["Language Models", "Root Nodes"])]),
            resources: CodexResources {
                primary_documentation: vec![DocumentationLink {
                    url: "https://docs.blackbox.ai/",
                }],
            },
        },
        inputs: vec![],
        outputs: vec![AI_LANGUAGE_MODEL],
        output_names: vec!["Model"],
        credentials: vec![CredentialRef {
            name: CREDENTIAL_NAME,
            required: true,
        }],
        properties: vec![
            NodeProperty::Options {
                display_name: "Model",
                name: "model",
                default: DEFAULT_MODEL,
                description: "The model to use for generating responses",
                options: MODEL_CATALOGUE,
            },
            NodeProperty::Collection {
                display_name: "Options",
                name: "options",
                placeholder: "Add Option",
                default: json!({}),
                options: OPTION_DESCRIPTORS,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMessage;
    use pretty_assertions::assert_eq;

    struct FakeHost {
        credentials: Value,
        parameters: BTreeMap<&'static str, Value>,
    }

    #[async_trait]
    impl SupplyContext for FakeHost {
        async fn get_credentials(&self, name: &str) -> ModelResult<Value> {
            if name == CREDENTIAL_NAME {
                Ok(self.credentials.clone())
            } else {
                Err(ModelError::MissingCredential(name.to_string()))
            }
        }

        fn get_node_parameter(&self, name: &str, _item_index: usize) -> Option<Value> {
            self.parameters.get(name).cloned()
        }
    }

    fn expected(model: &str) -> ClientConfig {
        ClientConfig {
            api_key: "k1".to_string(),
            model: ModelId::from(model),
            base_url: "https://api.blackbox.ai".to_string(),
            temperature: 0.7,
            max_tokens: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn empty_options_default_temperature_only() {
        let cfg = supply_config(
            &BlackboxApiCredential::new("k1"),
            "blackboxai/openai/gpt-4o",
            &GenerationOptions::default(),
        );
        assert_eq!(cfg, expected("blackboxai/openai/gpt-4o"));
    }

    #[test]
    fn supplied_options_pass_through() {
        let options = GenerationOptions::default().with_temperature(0.2).with_max_tokens(500);
        let cfg = supply_config(&BlackboxApiCredential::new("k1"), "blackboxai/deepseek/deepseek-r1", &options);
        let mut want = expected("blackboxai/deepseek/deepseek-r1");
        want.temperature = 0.2;
        want.max_tokens = Some(500.into());
        assert_eq!(cfg, want);
    }

    #[test]
    fn out_of_range_and_unknown_values_are_not_touched() {
        let options = GenerationOptions::default()
            .with_temperature(7.5)
            .with_top_p(-1.0)
            .with_frequency_penalty(9.0)
            .with_presence_penalty(-9.0);
        let cfg = supply_config(&BlackboxApiCredential::new(""), "someone/else", &options);
        assert_eq!(cfg.temperature, 7.5);
        assert_eq!(cfg.top_p, Some(-1.0));
        assert_eq!(cfg.frequency_penalty, Some(9.0));
        assert_eq!(cfg.presence_penalty, Some(-9.0));
        assert_eq!(cfg.model.as_str(), "someone/else");
        assert_eq!(cfg.api_key, "");
        assert_eq!(cfg.base_url, BLACKBOX_API_BASE);
    }

    #[test]
    fn supply_reads_host_parameters() {
        let host = FakeHost {
            credentials: json!({ "apiKey": "k1" }),
            parameters: BTreeMap::from([
                ("model", json!("blackboxai/deepseek/deepseek-r1")),
                ("options", json!({ "temperature": 0.2, "maxTokens": 500 })),
            ]),
        };
        let data = tokio_test::block_on(BlackboxChatModel.supply(&host)).unwrap();
        let mut want = expected("blackboxai/deepseek/deepseek-r1");
        want.temperature = 0.2;
        want.max_tokens = Some(500.into());
        assert_eq!(data.response.config(), &want);
    }

    #[test]
    fn supply_forwards_out_of_range_host_options() {
        let host = FakeHost {
            credentials: json!({ "apiKey": "k1" }),
            parameters: BTreeMap::from([
                ("model", json!("blackboxai/openai/gpt-4o")),
                (
                    "options",
                    json!({
                        "temperature": 1e39,
                        "maxTokens": -5,
                        "topP": 0.123456789,
                        "frequencyPenalty": 9.5,
                        "presencePenalty": -9.5
                    }),
                ),
            ]),
        };
        let data = tokio_test::block_on(BlackboxChatModel.supply(&host)).unwrap();
        let body = serde_json::to_value(data.response.request(vec![ChatMessage::user("hi")])).unwrap();
        assert_eq!(body["temperature"], json!(1e39));
        assert_eq!(body["max_tokens"], json!(-5));
        assert_eq!(body["top_p"], json!(0.123456789));
        assert_eq!(body["frequency_penalty"], json!(9.5));
        assert_eq!(body["presence_penalty"], json!(-9.5));

        let host = FakeHost {
            credentials: json!({ "apiKey": "k1" }),
            parameters: BTreeMap::from([("options", json!({ "maxTokens": 12.5 }))]),
        };
        let data = tokio_test::block_on(BlackboxChatModel.supply(&host)).unwrap();
        let body = serde_json::to_value(data.response.request(vec![ChatMessage::user("hi")])).unwrap();
        assert_eq!(body["max_tokens"], json!(12.5));
        assert_eq!(body["temperature"], json!(0.7));
    }

    #[test]
    fn supply_falls_back_to_default_model_and_options() {
        let host = FakeHost {
            credentials: json!({ "apiKey": "k1" }),
            parameters: BTreeMap::new(),
        };
        let data = tokio_test::block_on(BlackboxChatModel.supply(&host)).unwrap();
        assert_eq!(data.response.config(), &expected(DEFAULT_MODEL));
    }

    #[test]
    fn repeated_supply_is_deterministic() {
        let host = FakeHost {
            credentials: json!({ "apiKey": "k1" }),
            parameters: BTreeMap::new(),
        };
        let a = tokio_test::block_on(BlackboxChatModel.supply(&host)).unwrap();
        let b = tokio_test::block_on(BlackboxChatModel.supply(&host)).unwrap();
        assert_eq!(a.response.config(), b.response.config());
    }

    #[test]
    fn supply_rejects_non_string_model() {
        let host = FakeHost {
            credentials: json!({ "apiKey": "k1" }),
            parameters: BTreeMap::from([("model", json!(42))]),
        };
        let err = tokio_test::block_on(BlackboxChatModel.supply(&host)).unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameter { ref name, .. } if name == "model"));
    }

    #[test]
    fn description_matches_registration() {
        let json = serde_json::to_value(BlackboxChatModel.description()).unwrap();
        assert_eq!(json["name"], NODE_NAME);
        assert_eq!(json["outputs"], json!(["ai_languageModel"]));
        assert_eq!(json["credentials"][0], json!({ "name": "blackboxApi", "required": true }));
        assert_eq!(json["properties"][0]["type"], "options");
        assert_eq!(json["properties"][0]["default"], DEFAULT_MODEL);
        assert_eq!(
            json["properties"][0]["options"].as_array().unwrap().len(),
            MODEL_CATALOGUE.len()
        );
        assert_eq!(json["properties"][1]["type"], "collection");
        assert_eq!(json["properties"][1]["displayName"], "Options");
        assert_eq!(json["properties"][1]["options"][0]["typeOptions"]["maxValue"], 2.0);
        assert_eq!(json["codex"]["subcategories"]["AI"], json!(["Language Models", "Root Nodes"]));
    }

    #[test]
    fn property_names() {
        let names: Vec<_> = node_description().properties.iter().map(NodeProperty::name).collect();
        assert_eq!(names, vec!["model", "options"]);
    }
}
