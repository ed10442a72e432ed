use thiserror::Error;

/// Unified error type for the entire esg-portfolio-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No quote provider available")]
    NoProvider,

    // ── Quotes ──────────────────────────────────────────────────────
    #[error("Invalid ticker. It must be a non-empty string.")]
    InvalidTicker,

    #[error("No historical data found for ticker \"{0}\".")]
    TickerNotFound(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Holding validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid score '{raw}': {reason}")]
    InvalidScore {
        raw: String,
        reason: String,
    },

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Holding already in portfolio: {0}")]
    DuplicateHolding(String),
}

impl CoreError {
    /// True for failures reported by (or while talking to) an upstream quote provider.
    pub fn is_provider_error(&self) -> bool {
        matches!(self, CoreError::Api { .. } | CoreError::Network(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL, including the API key in the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
