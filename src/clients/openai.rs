use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::clients::retry::RetryPolicy;
use crate::clients::traits::{LanguageModel, LlmError};
use crate::config::LlmConfig;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Any OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_output_tokens: Option<u32>,
    retry: RetryPolicy,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig, model: &str, api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        let base = config.api_base.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let endpoint = if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{}/chat/completions", base.trim_end_matches('/'))
        };

        Ok(Self {
            client,
            endpoint,
            model: model.trim().to_string(),
            api_key,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            retry: RetryPolicy::new(config.max_retries, config.retry_backoff_ms),
        })
    }

    fn send_once(&self, body: &Value) -> Result<String, LlmError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let val: Value = resp.json()?;
        extract_content(&val)
    }
}

pub(crate) fn extract_content(val: &Value) -> Result<String, LlmError> {
    let choice = val
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| LlmError::ParseError(format!("no choices in response: {val}")))?;

    let content = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or("");

    if content.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(content.to_string())
}

impl LanguageModel for OpenAiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(
            "chat/completions (model={}, chars={})",
            self.model,
            prompt.len()
        );
        let mut body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.temperature,
        });
        if let Some(max_tokens) = self.max_output_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        self.retry.run("chat completion", || self.send_once(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_choice() {
        let val = json!({"choices": [{"message": {"role": "assistant", "content": "A\nB"}}]});
        assert_eq!(extract_content(&val).unwrap(), "A\nB");
    }

    #[test]
    fn missing_choices_is_a_parse_error() {
        let val = json!({"error": {"message": "nope"}});
        assert!(matches!(extract_content(&val), Err(LlmError::ParseError(_))));
    }

    #[test]
    fn null_content_is_empty() {
        let val = json!({"choices": [{"message": {"content": null}}]});
        assert!(matches!(extract_content(&val), Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn endpoint_is_not_duplicated() {
        let config = LlmConfig {
            api_base: Some("http://127.0.0.1:8111/v1/chat/completions".into()),
            ..LlmConfig::default()
        };
        let client = OpenAiClient::new(&config, "local", "k".into()).unwrap();
        assert_eq!(client.endpoint, "http://127.0.0.1:8111/v1/chat/completions");
    }
}
