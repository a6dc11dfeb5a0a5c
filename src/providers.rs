use crate::credentials::BlackboxApiCredential;
use crate::error::{ModelError, ModelResult};
use crate::models::{ChatRequest, ChatResponse};
use crate::streaming::{self, StreamingResponse};
use crate::types::ProviderId;
use crate::utils::endpoint;
use async_trait::async_trait;
use reqwest::Client;
use reqwest_eventsource::RequestBuilderExt;
use tracing::debug;
use url::Url;

/// Transport seam between [`crate::ModelClient`] and an OpenAI-compatible endpoint
#[async_trait]
pub trait Provider: Send + Sync {
    fn id(&self) -> ProviderId;
    async fn chat(&self, req: &ChatRequest) -> ModelResult<ChatResponse>;
    async fn chat_stream(&self, req: &ChatRequest) -> ModelResult<StreamingResponse>;
}

/// Chat completions against the Blackbox gateway, authenticated with the bearer rule
pub struct BlackboxProvider {
    credential: BlackboxApiCredential,
    api_base: String,
    client: Client,
}

impl BlackboxProvider {
    pub fn new(credential: BlackboxApiCredential, api_base: impl Into<String>, client: Client) -> Self {
        Self {
            credential,
            api_base: api_base.into(),
            client,
        }
    }

    fn completions_url(&self) -> ModelResult<Url> {
        endpoint(&self.api_base, "chat/completions")
    }
}

#[async_trait]
impl Provider for BlackboxProvider {
    fn id(&self) -> ProviderId {
        ProviderId::new(ProviderId::BLACKBOX)
    }

    async fn chat(&self, req: &ChatRequest) -> ModelResult<ChatResponse> {
        let url = self.completions_url()?;
        debug!(%url, model = %req.model, "Sending chat completion");
        let resp = self
            .credential
            .authenticate()
            .apply(self.client.post(url))
            .json(req)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ModelError::from_status(status, resp.text().await.unwrap_or_default()));
        }
        let chat_resp: ChatResponse = resp.json().await?;
        Ok(chat_resp)
    }

    async fn chat_stream(&self, req: &ChatRequest) -> ModelResult<StreamingResponse> {
        let url = self.completions_url()?;
        let req = req.clone().with_stream(true);
        debug!(%url, model = %req.model, "Opening chat completion stream");
        let source = self
            .credential
            .authenticate()
            .apply(self.client.post(url))
            .json(&req)
            .eventsource()
            .map_err(|e| ModelError::Stream(e.to_string()))?;
        streaming::open(source).await
    }
}
