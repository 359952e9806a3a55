use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http transport error: {0}")]
    Transport(String),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<LlmError> },
}

impl LlmError {
    /// Rate limits, server errors and dropped connections are worth another try.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Transport(_) => true,
            LlmError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    /// The request URL is dropped from the message; it may carry credentials.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            LlmError::ParseError(err.to_string())
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}

/// A hosted completion service. Calls block until the provider answers.
pub trait LanguageModel {
    fn model_name(&self) -> &str;

    fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
