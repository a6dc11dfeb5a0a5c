use crate::config::ClientConfig;
use crate::credentials::BlackboxApiCredential;
use crate::error::ModelResult;
use crate::models::{ChatMessage, ChatRequest, ChatResponse};
use crate::providers::{BlackboxProvider, Provider};
use crate::streaming::StreamingResponse;
use crate::types::{ModelId, RequestId};
use futures::StreamExt;
use metrics::{counter, decrement_gauge, histogram, increment_gauge};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, Instrument};

const INFLIGHT_GAUGE: &str = "llm_inflight_requests";

/// Holds one `llm_inflight_requests` slot for a provider until dropped
struct InflightGuard {
    provider: String,
}

impl InflightGuard {
    fn acquire(provider: &str) -> Self {
        increment_gauge!(INFLIGHT_GAUGE, 1.0, "provider" => provider.to_string());
        Self {
            provider: provider.to_string(),
        }
    }
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        decrement_gauge!(INFLIGHT_GAUGE, 1.0, "provider" => self.provider.clone());
    }
}

/// Chat-model client bound to one model and one set of generation parameters.
///
/// Every request it sends carries the configured parameters; unset ones are
/// left out of the body so the gateway falls back to its own defaults.
#[derive(Clone)]
pub struct ModelClient {
    config: ClientConfig,
    provider: Arc<dyn Provider>,
}

impl std::fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient")
            .field("config", &self.config)
            .field("provider", &self.provider.id())
            .finish()
    }
}

impl ModelClient {
    pub fn new(config: &ClientConfig) -> ModelResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let provider = BlackboxProvider::new(
            BlackboxApiCredential::new(config.api_key.clone()),
            config.base_url.clone(),
            builder.build()?,
        );
        debug!(model = %config.model, base_url = %config.base_url, "Initialized chat model client");
        Ok(Self::with_provider(config.clone(), Arc::new(provider)))
    }

    /// Use a custom transport instead of the gateway
    pub fn with_provider(config: ClientConfig, provider: Arc<dyn Provider>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn model(&self) -> &ModelId {
        &self.config.model
    }

    /// Build a request for `messages` carrying this client's parameters
    pub fn request(&self, messages: Vec<ChatMessage>) -> ChatRequest {
        let cfg = &self.config;
        let mut req = ChatRequest::new(cfg.model.as_str(), messages).with_temperature(cfg.temperature);
        req.max_tokens = cfg.max_tokens.clone();
        req.top_p = cfg.top_p;
        req.frequency_penalty = cfg.frequency_penalty;
        req.presence_penalty = cfg.presence_penalty;
        req
    }

    pub async fn chat(&self, messages: Vec<ChatMessage>) -> ModelResult<ChatResponse> {
        self.send(&self.request(messages)).await
    }

    pub async fn chat_stream(&self, messages: Vec<ChatMessage>) -> ModelResult<StreamingResponse> {
        self.send_stream(&self.request(messages)).await
    }

    pub async fn send(&self, req: &ChatRequest) -> ModelResult<ChatResponse> {
        let provider = self.provider.id().to_string();
        let model = req.model.clone();
        let span = tracing::debug_span!("chat", request_id = %RequestId::new(), model = %model);
        let inflight = InflightGuard::acquire(&provider);
        let start = Instant::now();
        let resp = self.provider.chat(req).instrument(span).await;
        histogram!("llm_request_latency_seconds", start.elapsed().as_secs_f64(), "provider" => provider.clone());
        drop(inflight);
        match &resp {
            Ok(r) => {
                counter!("llm_requests_total", 1, "provider" => provider.clone(), "result" => "success", "is_error" => "false");
                if let Some(usage) = &r.usage {
                    counter!("llm_prompt_tokens_total", usage.prompt_tokens as u64, "provider" => provider.clone(), "model" => model.clone());
                    counter!("llm_completion_tokens_total", usage.completion_tokens as u64, "provider" => provider.clone(), "model" => model.clone());
                }
            }
            Err(e) => {
                debug!(error = %e, "Chat completion failed");
                counter!("llm_requests_total", 1, "provider" => provider.clone(), "result" => "error", "is_error" => "true");
            }
        }
        resp
    }

    pub async fn send_stream(&self, req: &ChatRequest) -> ModelResult<StreamingResponse> {
        let provider = self.provider.id().to_string();
        let model = req.model.clone();
        let span = tracing::debug_span!("chat_stream", request_id = %RequestId::new(), model = %model);
        let inflight = InflightGuard::acquire(&provider);
        let start = Instant::now();
        let opened = self.provider.chat_stream(req).instrument(span).await;
        drop(inflight);
        match opened {
            Ok(stream) => {
                let provider_cl = provider.clone();
                let model_cl = model.clone();
                let mut first = true;
                let mut last = start;
                let wrapped = stream.inspect(move |res| {
                    if res.is_ok() {
                        let now = Instant::now();
                        if first {
                            histogram!("llm_first_token_latency_seconds", now.duration_since(start).as_secs_f64(), "provider" => provider_cl.clone(), "model" => model_cl.clone());
                            first = false;
                        } else {
                            histogram!("llm_stream_intertoken_gap_seconds", now.duration_since(last).as_secs_f64(), "provider" => provider_cl.clone(), "model" => model_cl.clone());
                        }
                        last = now;
                    }
                });
                histogram!("llm_request_latency_seconds", start.elapsed().as_secs_f64(), "provider" => provider.clone());
                counter!("llm_requests_total", 1, "provider" => provider.clone(), "result" => "success", "is_error" => "false");
                Ok(Box::pin(wrapped))
            }
            Err(e) => {
                histogram!("llm_request_latency_seconds", start.elapsed().as_secs_f64(), "provider" => provider.clone());
                counter!("llm_requests_total", 1, "provider" => provider.clone(), "result" => "error", "is_error" => "true");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BLACKBOX_API_BASE;
    use crate::error::ModelError;
    use crate::models::StreamingChatResponse;
    use crate::types::ProviderId;
    use async_trait::async_trait;
    use metrics::{Counter, Gauge, GaugeFn, Histogram, Key, KeyName, Recorder, SharedString, Unit};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn config() -> ClientConfig {
        ClientConfig {
            api_key: "k1".to_string(),
            model: ModelId::from("blackboxai/openai/gpt-4o"),
            base_url: BLACKBOX_API_BASE.to_string(),
            temperature: 0.7,
            max_tokens: Some(500.into()),
            top_p: None,
            frequency_penalty: Some(0.5),
            presence_penalty: None,
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn request_carries_config() {
        let client = ModelClient::new(&config()).unwrap();
        let req = client.request(vec![ChatMessage::user("hi")]);
        let mut expected = ChatRequest::new("blackboxai/openai/gpt-4o", vec![ChatMessage::user("hi")])
            .with_temperature(0.7)
            .with_max_tokens(500);
        expected.frequency_penalty = Some(0.5);
        assert_eq!(req, expected);
    }

    #[test]
    fn debug_does_not_leak_key() {
        let client = ModelClient::new(&config()).unwrap();
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("blackbox"));
        assert!(!rendered.contains("\"k1\""));
    }

    #[derive(Default)]
    struct GaugeCell {
        value: Mutex<f64>,
        peak: Mutex<f64>,
    }

    impl GaugeFn for GaugeCell {
        fn increment(&self, value: f64) {
            let mut current = self.value.lock().unwrap();
            *current += value;
            let mut peak = self.peak.lock().unwrap();
            *peak = peak.max(*current);
        }

        fn decrement(&self, value: f64) {
            *self.value.lock().unwrap() -= value;
        }

        fn set(&self, value: f64) {
            *self.value.lock().unwrap() = value;
        }
    }

    #[derive(Default)]
    struct GaugeRecorder {
        gauges: Arc<Mutex<HashMap<Key, Arc<GaugeCell>>>>,
    }

    impl Recorder for GaugeRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, _: &Key) -> Counter {
            Counter::noop()
        }

        fn register_gauge(&self, key: &Key) -> Gauge {
            let cell = self.gauges.lock().unwrap().entry(key.clone()).or_default().clone();
            Gauge::from_arc(cell)
        }

        fn register_histogram(&self, _: &Key) -> Histogram {
            Histogram::noop()
        }
    }

    struct ScriptedProvider {
        fail: bool,
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn id(&self) -> ProviderId {
            ProviderId::new("scripted")
        }

        async fn chat(&self, _: &ChatRequest) -> ModelResult<ChatResponse> {
            if self.fail {
                return Err(ModelError::MissingCredential("blackboxApi".to_string()));
            }
            Ok(serde_json::from_value(serde_json::json!({ "choices": [] }))?)
        }

        async fn chat_stream(&self, _: &ChatRequest) -> ModelResult<StreamingResponse> {
            if self.fail {
                return Err(ModelError::MissingCredential("blackboxApi".to_string()));
            }
            Ok(Box::pin(futures::stream::empty::<ModelResult<StreamingChatResponse>>()))
        }
    }

    #[test]
    fn inflight_gauge_rises_and_settles_on_every_path() {
        let recorder = GaugeRecorder::default();
        let gauges = recorder.gauges.clone();
        metrics::set_boxed_recorder(Box::new(recorder)).unwrap();

        let ok = ModelClient::with_provider(config(), Arc::new(ScriptedProvider { fail: false }));
        let failing = ModelClient::with_provider(config(), Arc::new(ScriptedProvider { fail: true }));
        tokio_test::block_on(async {
            ok.chat(vec![ChatMessage::user("hi")]).await.unwrap();
            failing.chat(vec![ChatMessage::user("hi")]).await.unwrap_err();
            ok.chat_stream(vec![ChatMessage::user("hi")]).await.unwrap();
            assert!(failing.chat_stream(vec![ChatMessage::user("hi")]).await.is_err());
        });

        let gauges = gauges.lock().unwrap();
        let inflight: Vec<_> = gauges
            .iter()
            .filter(|(key, _)| key.name() == INFLIGHT_GAUGE)
            .map(|(_, cell)| cell.clone())
            .collect();
        assert_eq!(inflight.len(), 1);
        assert_eq!(*inflight[0].peak.lock().unwrap(), 1.0);
        assert_eq!(*inflight[0].value.lock().unwrap(), 0.0);
    }
}
