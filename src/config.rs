use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Main configuration structure loaded from csv_analyst.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmConfig,
    pub table: TableConfig,
}

/// Model selection, transport and retry policy for every LLM call in a run
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// `provider/model`, e.g. `gemini/gemini-2.5-flash` or `openai/gpt-4o-mini`
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Override for the provider's base URL
    pub api_base: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini/gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_base: None,
            temperature: 0.2,
            max_output_tokens: None,
            max_retries: 5,
            retry_backoff_ms: 500,
            timeout_ms: 120_000,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured variable. Empty values count as unset.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

/// How the CSV is parsed and how much of it is shown to the model
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    pub delimiter: char,
    /// Rows shown to the model when the table is too large to send whole
    pub preview_rows: usize,
    /// Tables up to this many rows are sent to the model in full
    pub max_context_rows: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            preview_rows: 20,
            max_context_rows: 200,
        }
    }
}

impl TableConfig {
    pub fn delimiter_byte(&self) -> anyhow::Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("delimiter {:?} must be a single ASCII character", self.delimiter))
    }
}

/// Populate the process environment from `path`, or from the nearest `.env`
/// when no path is given. Variables already set are left alone; a missing
/// file is not an error.
pub fn load_env_file(path: Option<&str>) {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| PathBuf::from(path)),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(err) => tracing::debug!("No .env loaded: {}", err),
    }
}

impl Settings {
    /// Load configuration from the `.env` file, an optional TOML file and
    /// environment overrides. Uses CSV_ANALYST_CONFIG or defaults to
    /// "csv_analyst.toml".
    pub fn load() -> anyhow::Result<Self> {
        load_env_file(std::env::var("CSV_ANALYST_ENV_FILE").ok().as_deref());

        let config_path = std::env::var("CSV_ANALYST_CONFIG")
            .unwrap_or_else(|_| "csv_analyst.toml".to_string());

        let mut settings = match std::fs::read_to_string(&config_path) {
            Ok(content) => Self::from_toml(&content)
                .with_context(|| format!("failed to parse {config_path}"))?,
            Err(_) => {
                tracing::debug!("Config file {} not found, using defaults", config_path);
                Self::default()
            }
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply CSV_ANALYST_* overrides. `lookup` is the environment in
    /// production and a map in tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup("CSV_ANALYST_MODEL") {
            self.llm.model = model;
        }
        if let Some(base) = lookup("CSV_ANALYST_API_BASE") {
            self.llm.api_base = Some(base);
        }
        if let Some(var) = lookup("CSV_ANALYST_API_KEY_ENV") {
            self.llm.api_key_env = var;
        }
        if let Some(retries) = lookup("CSV_ANALYST_MAX_RETRIES") {
            self.llm.max_retries = retries
                .parse()
                .with_context(|| format!("CSV_ANALYST_MAX_RETRIES={retries:?} is not a number"))?;
        }
        if let Some(timeout) = lookup("CSV_ANALYST_TIMEOUT_MS") {
            self.llm.timeout_ms = timeout
                .parse()
                .with_context(|| format!("CSV_ANALYST_TIMEOUT_MS={timeout:?} is not a number"))?;
        }
        Ok(())
    }
}
