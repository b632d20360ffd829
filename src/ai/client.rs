//! GitHub Models chat completion client

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{LazyCommitError, Result};

/// GitHub Models API base URL
pub const GITHUB_MODELS_BASE: &str = "https://models.github.ai";

const GITHUB_API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_JSON: &str = "application/vnd.github+json";

const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 0.95;
const MAX_TOKENS: u32 = 256;

/// Chat completion client bound to one token and one model
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    token: SecretString,
    model: String,
    base_url: String,
}

impl ChatClient {
    /// Create a client for the public GitHub Models endpoint
    pub fn new(token: SecretString, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token,
            model: model.into(),
            base_url: GITHUB_MODELS_BASE.to_string(),
        }
    }

    /// Point the client at another host (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the current model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|url| url.join(path))
            .map_err(|e| LazyCommitError::Config(format!("Invalid API URL '{}': {}", base, e)))
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }

    /// Check the token against the models catalog
    ///
    /// Any network failure or non-success status means "invalid".
    pub async fn validate_token(&self) -> bool {
        let url = match self.endpoint("catalog/models") {
            Ok(url) => url,
            Err(e) => {
                warn!("{}", e);
                return false;
            }
        };

        let response = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_JSON)
            .header(AUTHORIZATION, self.bearer())
            .header(GITHUB_API_VERSION_HEADER, GITHUB_API_VERSION)
            .send()
            .await;

        match response {
            Ok(response) => {
                debug!("Token validation returned {}", response.status());
                response.status().is_success()
            }
            Err(e) => {
                debug!("Token validation request failed: {}", e);
                false
            }
        }
    }

    /// Generate a commit message for the diff using the given system prompt
    pub async fn generate_commit_message(&self, system_prompt: &str, diff: &str) -> Result<String> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system_prompt,
                },
                ChatMessage {
                    role: Role::User,
                    content: diff,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
        };

        debug!(model = %self.model, diff_len = diff.len(), "Requesting chat completion");

        let response = self
            .client
            .post(self.endpoint("inference/chat/completions")?)
            .header(AUTHORIZATION, self.bearer())
            .header(GITHUB_API_VERSION_HEADER, GITHUB_API_VERSION)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LazyCommitError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}

/// Extract the trimmed first-choice content from a completion body
fn parse_completion(body: &str) -> Result<String> {
    let completion: ChatCompletion = serde_json::from_str(body)?;

    if let Some(usage) = &completion.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Chat completion usage"
        );
    }

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(LazyCommitError::NoResponse)
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat completion request/response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ChatClient {
        ChatClient::new(SecretString::from("ghp_test"), "gpt-4o-mini").with_base_url(server.uri())
    }

    #[test]
    fn test_parse_completion_trims() {
        let body = json!({"choices": [{"message": {"content": " feat(x): add hello\n"}}]});
        assert_eq!(parse_completion(&body.to_string()).unwrap(), "feat(x): add hello");
    }

    #[test]
    fn test_parse_completion_missing_or_empty_content() {
        let bodies = [
            json!({"choices": []}),
            json!({}),
            json!({"choices": [{"message": {}}]}),
            json!({"choices": [{"message": {"content": null}}]}),
            json!({"choices": [{"message": {"content": ""}}]}),
            json!({"choices": [{"message": {"content": "  \n "}}]}),
        ];
        for body in bodies {
            assert!(matches!(
                parse_completion(&body.to_string()),
                Err(LazyCommitError::NoResponse)
            ));
        }
    }

    #[test]
    fn test_parse_completion_ignores_extra_fields() {
        let body = json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "fix: handle empty diff"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });
        assert_eq!(
            parse_completion(&body.to_string()).unwrap(),
            "fix: handle empty diff"
        );
    }

    #[tokio::test]
    async fn test_validate_token_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalog/models"))
            .and(header("authorization", "Bearer ghp_test"))
            .and(header("accept", "application/vnd.github+json"))
            .and(header("x-github-api-version", "2022-11-28"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client(&server).validate_token().await);
    }

    #[tokio::test]
    async fn test_validate_token_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalog/models"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert!(!client(&server).validate_token().await);
    }

    #[tokio::test]
    async fn test_validate_token_unreachable() {
        let client = ChatClient::new(SecretString::from("ghp_test"), "gpt-4o-mini")
            .with_base_url("http://127.0.0.1:9");
        assert!(!client.validate_token().await);
    }

    #[tokio::test]
    async fn test_generate_sends_two_messages_with_sampling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/inference/chat/completions"))
            .and(header("authorization", "Bearer ghp_test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 256,
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": " feat(x): add hello\n"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let message = client(&server)
            .generate_commit_message("SYSTEM", "diff --git a/x.txt b/x.txt\n+hello\n")
            .await
            .unwrap();
        assert_eq!(message, "feat(x): add hello");

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], json!({"role": "system", "content": "SYSTEM"}));
        assert_eq!(messages[1]["role"], "user");
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert!((body["top_p"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_generate_error_status_carries_code_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/inference/chat/completions"))
            .respond_with(ResponseTemplate::new(403).set_body_string("model access denied"))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_commit_message("SYSTEM", "+x")
            .await
            .unwrap_err();
        assert!(matches!(err, LazyCommitError::Api { status: 403, .. }));
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("model access denied"));
    }

    #[tokio::test]
    async fn test_generate_empty_content_is_no_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": [{"message": {"content": ""}}]})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_commit_message("SYSTEM", "+x")
            .await
            .unwrap_err();
        assert!(matches!(err, LazyCommitError::NoResponse));
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let client = ChatClient::new(SecretString::from("t"), "m").with_base_url("http://host/api/");
        assert_eq!(
            client.endpoint("catalog/models").unwrap().as_str(),
            "http://host/api/catalog/models"
        );
    }
}
