//! Chat completion client for an OpenAI-compatible API

use std::time::Duration;

use async_trait::async_trait;
use koreplan_core::config::ApiConfig;
use koreplan_core::Secrets;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use crate::{Error, Result};

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a chat completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Something that can answer a chat conversation with text
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Return the assistant reply to `messages`
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for `POST {base_url}/chat/completions`
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl ChatClient {
    /// Create a client for the given endpoint base and model
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let endpoint = completions_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("koreplan/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let model = model.into();
        info!(endpoint = %endpoint, model = %model, "Created chat client");

        Ok(Self {
            http,
            endpoint,
            model,
            api_key: api_key.into(),
        })
    }

    /// Create a client from configuration and the stored API key
    ///
    /// The key is loaded from (in priority order):
    /// 1. DEEPSEEK_API_KEY environment variable
    /// 2. ~/.config/koreplan/secrets.toml
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let secrets = Secrets::load()?;
        let api_key = secrets.api_key().ok_or_else(|| {
            Error::Auth(
                "API key not found. Set DEEPSEEK_API_KEY environment variable \
                 or add it to ~/.config/koreplan/secrets.toml"
                    .to_string(),
            )
        })?;

        Self::new(&config.base_url, &config.model, api_key, config.timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    fn name(&self) -> &'static str {
        "chat-completions"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        debug!(model = %self.model, messages = messages.len(), "Sending chat completion request");

        let request_body = json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(if status == reqwest::StatusCode::UNAUTHORIZED {
                Error::Auth(format!("API key rejected: {}", message))
            } else {
                Error::Api {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Failed to parse completion response: {}", e)))?;

        extract_content(body)
    }
}

/// `https://api.deepseek.com` -> `https://api.deepseek.com/chat/completions`
fn completions_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("chat/completions")?)
}

fn extract_content(body: CompletionResponse) -> Result<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| Error::Parse("Completion response contained no message".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url() {
        assert_eq!(
            completions_url("https://api.deepseek.com").unwrap().as_str(),
            "https://api.deepseek.com/chat/completions"
        );
        assert_eq!(
            completions_url("http://localhost:8080/v1").unwrap().as_str(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(
            completions_url("http://localhost:8080/v1/").unwrap().as_str(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert!(completions_url("not a url").is_err());
    }

    #[test]
    fn test_message_serialization() {
        let json = serde_json::to_value(ChatMessage::system("hi")).unwrap();
        assert_eq!(json, json!({"role": "system", "content": "hi"}));
    }

    #[test]
    fn test_extract_content() {
        let body: CompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "**Plan**"}}]
        }))
        .unwrap();
        assert_eq!(extract_content(body).unwrap(), "**Plan**");
    }

    #[test]
    fn test_extract_content_missing() {
        let body: CompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(extract_content(body).is_err());

        let body: CompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": null}}]})).unwrap();
        assert!(extract_content(body).is_err());
    }

    #[test]
    fn test_client_debug_hides_key() {
        let client = ChatClient::new(
            "https://api.deepseek.com",
            "deepseek-chat",
            "sk-secret",
            Duration::from_secs(5),
        )
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("deepseek-chat"));
        assert!(!debug.contains("sk-secret"));
    }
}
