//! Domain-specific error types for csv-analyst

use thiserror::Error;

use crate::clients::LlmError;

/// Main error type for an analysis run
#[derive(Error, Debug)]
pub enum AnalystError {
    #[error("{var} not found. Please set it in your environment or a .env file.")]
    MissingCredential { var: String },

    #[error("The file '{path}' was not found.")]
    FileNotFound { path: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("The model returned an empty answer for: {question}")]
    EmptyAnswer { question: String },
}

impl AnalystError {
    /// Errors the user can fix directly get a plain `ERROR:` line; anything
    /// else is reported as unexpected.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AnalystError::MissingCredential { .. } | AnalystError::FileNotFound { .. }
        )
    }

    /// The line printed to stderr when a run ends with this error.
    pub fn boundary_message(&self) -> String {
        if self.is_user_facing() {
            format!("ERROR: {self}")
        } else {
            format!("\nAn unexpected error occurred: {self}")
        }
    }
}

impl From<toml::de::Error> for AnalystError {
    fn from(err: toml::de::Error) -> Self {
        AnalystError::Config {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for AnalystError {
    fn from(err: anyhow::Error) -> Self {
        AnalystError::Config {
            message: format!("{err:#}"),
        }
    }
}

/// Result type alias for csv-analyst operations
pub type Result<T> = std::result::Result<T, AnalystError>;
