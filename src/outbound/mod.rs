//! Outbound provider integration.
//!
//! # Data Flow
//! ```text
//! AggregationService
//!     → openweather.rs (geocoding + current conditions, two cache stages)
//!     → coingecko.rs   (price quotes, one cache stage)
//!         → http.rs    (reqwest wrapper: per-call timeout, 500-only retry)
//! ```
//!
//! # Design Decisions
//! - Retry only HTTP 500, never transport errors or other statuses
//! - Cache keys are lowercase-normalized so hits are case-insensitive
//! - Not-found is a domain answer, not a failure of the transport layer

pub mod coingecko;
pub mod http;
pub mod openweather;

pub use coingecko::{CoinGeckoClient, CryptoPrice};
pub use http::{ResilientHttpClient, RetryPolicy};
pub use openweather::{CityCoordinates, OpenWeatherClient, WeatherSnapshot};

/// Failures observed while talking to external data providers.
#[derive(Debug, thiserror::Error)]
pub enum OutboundError {
    /// No usable response was obtained (connect failure, timeout, bad body).
    #[error("Error in {verb} request: {source}")]
    Transport {
        verb: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("Error in {verb} request: request failed with status code {status}")]
    Status { verb: &'static str, status: u16 },

    /// The provider answered, but the requested entity does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// A lower-level failure rewrapped with provider context.
    #[error("{context}: {message}")]
    Provider {
        context: &'static str,
        message: String,
    },
}

impl OutboundError {
    /// Rewrap an error with a provider-level context prefix.
    ///
    /// Not-found answers pass through untouched: they carry their own
    /// message and must stay distinguishable from transport trouble.
    pub fn wrap(context: &'static str, err: OutboundError) -> OutboundError {
        match err {
            OutboundError::NotFound(_) => err,
            other => OutboundError::Provider {
                context,
                message: other.to_string(),
            },
        }
    }
}
