use thiserror::Error;

/// Unified error type for the entire portfolio-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Market data ─────────────────────────────────────────────────
    #[error("Failed to fetch price for {0}")]
    QuoteFetch(String),

    #[error("Failed to fetch financial data for {0}")]
    FinancialFetch(String),

    #[error("Market data error ({provider}): {message}")]
    Provider {
        provider: String,
        message: String,
    },

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}
