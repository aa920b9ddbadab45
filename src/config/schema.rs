//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files;
//! secrets are expected to arrive via environment overrides.

use serde::{Deserialize, Serialize};

/// Root configuration for the API service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub server: ServerConfig,

    /// Token issuance settings.
    pub auth: AuthConfig,

    /// External provider endpoints and credentials.
    pub providers: ProviderConfig,

    /// Provider response caching.
    pub cache: CacheConfig,

    /// Outbound HTTP client settings.
    pub outbound: OutboundConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Required; no usable default.
    pub jwt_secret: String,

    /// Token lifetime in seconds.
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// OpenWeather API key. Required.
    pub openweather_api_key: String,

    /// CoinGecko API key. Required.
    pub coingecko_api_key: String,

    /// Geocoding endpoint (city name -> coordinates).
    pub geocoding_url: String,

    /// Current-conditions endpoint.
    pub weather_url: String,

    /// Price-quote endpoint.
    pub crypto_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openweather_api_key: String::new(),
            coingecko_api_key: String::new(),
            geocoding_url: "http://api.openweathermap.org/geo/1.0/direct".to_string(),
            weather_url: "https://api.openweathermap.org/data/3.0/onecall".to_string(),
            crypto_url: "https://api.coingecko.com/api/v3/simple/price".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 5 * 60 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutboundConfig {
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,

    /// Retries after the first attempt for 500 responses.
    pub max_retries: u32,

    /// Linear backoff base in milliseconds (retry N waits N * base).
    pub base_delay_ms: u64,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            max_retries: 3,
            base_delay_ms: 1000,
        }
    }
}
