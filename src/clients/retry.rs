use std::time::Duration;

use tracing::{debug, warn};

use super::traits::LlmError;

/// Simple exponential backoff shared by the HTTP clients
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff: Duration::from_millis(initial_backoff_ms),
        }
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX))
    }

    /// Run `op` until it succeeds, fails permanently, or the budget is spent.
    pub fn run<T, F>(&self, label: &str, mut op: F) -> Result<T, LlmError>
    where
        F: FnMut() -> Result<T, LlmError>,
    {
        let attempts = self.max_retries.saturating_add(1);
        let mut attempt = 0;
        loop {
            debug!("{} attempt {}/{}", label, attempt + 1, attempts);
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) if attempt + 1 >= attempts => {
                    return Err(LlmError::RetriesExhausted {
                        attempts,
                        last: Box::new(err),
                    });
                }
                Err(err) => {
                    let delay = self.delay_for(attempt);
                    warn!("{} failed ({}), retrying in {:?}", label, err, delay);
                    std::thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}
