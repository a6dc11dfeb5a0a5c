//! Credential type for the Blackbox AI gateway.
//!
//! A single secret, the API key, injected as a bearer token on every request
//! made under the credential. The host validates a key before saving it by
//! running the check described by [`CredentialTestRequest`].

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::config::BLACKBOX_API_BASE;
use crate::error::{ModelError, ModelResult};
use crate::utils::endpoint;

/// Name the node uses to ask the host for this credential
pub const CREDENTIAL_NAME: &str = "blackboxApi";

/// Model used by the liveness check
pub const TEST_MODEL: &str = "blackboxai/openai/gpt-4o-mini";

/// Stored credential as handed over by the host: `{"apiKey": "..."}`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackboxApiCredential {
    #[serde(default)]
    pub api_key: String,
}

impl std::fmt::Debug for BlackboxApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlackboxApiCredential")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl BlackboxApiCredential {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Header injection rule for requests made under this credential
    pub fn authenticate(&self) -> AuthenticateRule {
        AuthenticateRule {
            headers: vec![(AUTHORIZATION, format!("Bearer {}", self.api_key))],
        }
    }

    /// Run the check against the gateway
    pub async fn test(&self, client: &Client) -> ModelResult<CredentialTestResult> {
        self.test_against(client, BLACKBOX_API_BASE).await
    }

    /// Run the check against an arbitrary OpenAI-compatible base URL.
    ///
    /// Any 2xx counts as success. Non-2xx statuses produce a failed result;
    /// only transport errors are returned as `Err`.
    pub async fn test_against(&self, client: &Client, base_url: &str) -> ModelResult<CredentialTestResult> {
        let check = CredentialTestRequest::minimal_completion(base_url);
        let url = endpoint(&check.base_url, &check.url)?;

        let mut request = client.post(url);
        for (name, value) in &check.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let request = self.authenticate().apply(request).json(&check.body);

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            info!(%status, "Credential test succeeded");
            return Ok(CredentialTestResult::passed(status));
        }

        let body = response.text().await.unwrap_or_default();
        let error = ModelError::from_status(status, body);
        warn!(%status, error = %error, "Credential test failed");
        Ok(CredentialTestResult::failed(status, error.to_string()))
    }
}

/// Headers to add to every outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateRule {
    headers: Vec<(HeaderName, String)>,
}

impl AuthenticateRule {
    pub fn headers(&self) -> impl Iterator<Item = (&HeaderName, &str)> + '_ {
        self.headers.iter().map(|(name, value)| (name, value.as_str()))
    }

    /// Header value for `name`, if the rule sets it
    pub fn get(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attach the headers to a request.
    ///
    /// Keys that are not valid header values surface as a builder error when
    /// the request is sent.
    pub fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (name, value) in &self.headers {
            request = match HeaderValue::from_str(value) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    request.header(name.clone(), value)
                }
                Err(_) => request.header(name.clone(), value.as_str()),
            };
        }
        request
    }
}

/// The request the host issues to check a key before saving it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTestRequest {
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub url: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl CredentialTestRequest {
    pub fn minimal_completion(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            url: "/chat/completions".to_string(),
            method: "POST".to_string(),
            headers: BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            body: json!({
                "model": TEST_MODEL,
                "messages": [{ "role": "user", "content": "test" }],
                "max_tokens": 1,
            }),
        }
    }
}

/// Outcome of a credential check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialTestResult {
    pub success: bool,
    pub status: u16,
    pub message: String,
}

impl CredentialTestResult {
    fn passed(status: StatusCode) -> Self {
        Self {
            success: true,
            status: status.as_u16(),
            message: "Connection successful".to_string(),
        }
    }

    fn failed(status: StatusCode, message: String) -> Self {
        Self {
            success: false,
            status: status.as_u16(),
            message,
        }
    }
}

/// Form field shown when editing the credential
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialProperty {
    pub display_name: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub type_options: Value,
    pub default: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Registration record for the credential type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTypeDescription {
    pub name: &'static str,
    pub display_name: &'static str,
    pub documentation_url: &'static str,
    pub properties: Vec<CredentialProperty>,
    pub authenticate: Value,
    pub test: CredentialTestRequest,
}

pub fn credential_type() -> CredentialTypeDescription {
    CredentialTypeDescription {
        name: CREDENTIAL_NAME,
        display_name: "Blackbox AI API",
        documentation_url: "https://docs.blackbox.ai/",
        properties: vec![CredentialProperty {
            display_name: "API Key",
            name: "apiKey",
            kind: "string",
            type_options: json!({ "password": true }),
            default: "",
            required: true,
            description: "Get your API key from <a href=\"https://app.blackbox.ai/dashboard\" target=\"_blank\">Blackbox AI Dashboard</a>",
        }],
        authenticate: json!({
            "type": "generic",
            "properties": {
                "headers": { "Authorization": "Bearer {{$credentials.apiKey}}" }
            }
        }),
        test: CredentialTestRequest::minimal_completion(BLACKBOX_API_BASE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bearer_header_is_key_verbatim() {
        for key in ["k1", "", "sk-with spaces", "ünïcode"] {
            let rule = BlackboxApiCredential::new(key).authenticate();
            assert_eq!(rule.get(&AUTHORIZATION), Some(format!("Bearer {}", key).as_str()));
            assert_eq!(rule.headers().count(), 1);
        }
    }

    #[test]
    fn apply_sets_authorization_header() {
        let client = Client::new();
        let request = BlackboxApiCredential::new("k1")
            .authenticate()
            .apply(client.get("http://localhost/"))
            .build()
            .unwrap();
        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer k1");
    }

    #[test]
    fn credential_reads_host_json() {
        let cred: BlackboxApiCredential = serde_json::from_value(json!({ "apiKey": "k1" })).unwrap();
        assert_eq!(cred, BlackboxApiCredential::new("k1"));
        let missing: BlackboxApiCredential = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.api_key, "");
        assert!(!format!("{:?}", cred).contains("k1"));
    }

    #[test]
    fn test_request_matches_gateway_contract() {
        let check = CredentialTestRequest::minimal_completion(BLACKBOX_API_BASE);
        assert_eq!(check.method, "POST");
        assert_eq!(
            endpoint(&check.base_url, &check.url).unwrap().as_str(),
            "https://api.blackbox.ai/chat/completions"
        );
        assert_eq!(check.headers.len(), 1);
        assert_eq!(check.headers["Content-Type"], "application/json");
        assert_eq!(
            check.body,
            json!({
                "model": "blackboxai/openai/gpt-4o-mini",
                "messages": [{ "role": "user", "content": "test" }],
                "max_tokens": 1
            })
        );
    }

    #[test]
    fn descriptor_serializes_for_host() {
        let json = serde_json::to_value(credential_type()).unwrap();
        assert_eq!(json["name"], "blackboxApi");
        assert_eq!(json["properties"][0]["name"], "apiKey");
        assert_eq!(json["properties"][0]["typeOptions"]["password"], true);
        assert_eq!(json["test"]["baseURL"], "https://api.blackbox.ai");
        assert_eq!(json["test"]["headers"], json!({ "Content-Type": "application/json" }));
    }
}
