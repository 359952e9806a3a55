pub mod gemini;
pub mod openai;
pub mod retry;
pub mod traits;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use retry::RetryPolicy;
pub use traits::{LanguageModel, LlmError};

use crate::config::LlmConfig;
use crate::error::{AnalystError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
}

/// Split a `provider/model` string. Bare model names are Gemini models.
pub fn parse_model(name: &str) -> Result<(Provider, &str)> {
    let name = name.trim();
    let (provider, model) = match name.split_once('/') {
        Some((p, m)) => (p, m),
        None => ("gemini", name),
    };
    if model.trim().is_empty() {
        return Err(AnalystError::Config {
            message: format!("model {name:?} has no model name"),
        });
    }
    let provider = match provider.to_ascii_lowercase().as_str() {
        "gemini" | "google" => Provider::Gemini,
        "openai" => Provider::OpenAi,
        other => {
            return Err(AnalystError::Config {
                message: format!("unknown model provider {other:?} (expected gemini or openai)"),
            });
        }
    };
    Ok((provider, model))
}

/// Build the client for the configured provider.
pub fn connect(config: &LlmConfig, api_key: String) -> Result<Box<dyn LanguageModel>> {
    let (provider, model) = parse_model(&config.model)?;
    tracing::info!("Using {:?} model {}", provider, model);
    let client: Box<dyn LanguageModel> = match provider {
        Provider::Gemini => Box::new(GeminiClient::new(config, model, api_key)?),
        Provider::OpenAi => Box::new(OpenAiClient::new(config, model, api_key)?),
    };
    Ok(client)
}
