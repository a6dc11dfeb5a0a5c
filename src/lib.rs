//! Blackbox AI gateway as a pluggable chat-model provider.
//!
//! Two pieces: a credential type that turns an API key into a bearer header
//! (plus a one-token completion request to check the key), and a supplier
//! node that maps the user's model and generation options to a ready-to-use
//! OpenAI-compatible [`ModelClient`] pointed at `https://api.blackbox.ai`.

pub mod catalogue;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod node;
pub mod options;
pub mod providers;
pub mod streaming;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use catalogue::{ModelOption, DEFAULT_MODEL, MODEL_CATALOGUE};
pub use client::ModelClient;
pub use config::{ClientConfig, BLACKBOX_API_BASE};
pub use credentials::{BlackboxApiCredential, CredentialTestResult};
pub use error::{ModelError, ModelResult};
pub use models::{ChatMessage, ChatRequest, ChatResponse, StreamingChatResponse};
pub use node::{supply_config, BlackboxChatModel, SupplyContext, SupplyData};
pub use options::GenerationOptions;
pub use providers::{BlackboxProvider, Provider};
pub use streaming::StreamingResponse;
pub use types::{ModelId, ProviderId};

/// Initialize the logging system
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
