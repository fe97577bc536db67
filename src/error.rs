use thiserror::Error;

/// Errors produced while talking to the weather provider.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The chain was superseded by a newer location request.
    #[error("Request cancelled")]
    Cancelled,
}

impl WeatherError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WeatherError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
