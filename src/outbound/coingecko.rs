//! CoinGecko price quotes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{OutboundError, ResilientHttpClient};
use crate::cache::TimedCache;

const USD_CURRENCY: &str = "usd";

/// A USD price quote for one cryptocurrency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoPrice {
    /// Symbol as the caller spelled it.
    pub name: String,
    pub price_usd: f64,
}

/// Price-quote client with a TTL cache in front of the network.
#[derive(Clone)]
pub struct CoinGeckoClient {
    http: ResilientHttpClient,
    cache: TimedCache<CryptoPrice>,
    price_url: String,
}

impl CoinGeckoClient {
    pub fn new(http: ResilientHttpClient, cache: TimedCache<CryptoPrice>, price_url: String) -> Self {
        Self {
            http,
            cache,
            price_url,
        }
    }

    /// Look up the current USD price for `symbol`.
    ///
    /// Symbols are lowercased for the cache key and the provider query, so
    /// lookups are case-insensitive. `refresh` bypasses the cache read but
    /// still writes the fresh result back.
    pub async fn get_price(&self, symbol: &str, refresh: bool) -> Result<CryptoPrice, OutboundError> {
        let id = symbol.to_lowercase();
        let cache_key = format!("crypto:{id}");

        if !refresh {
            if let Some(cached) = self.cache.get(&cache_key) {
                tracing::info!("Returning cached crypto data");
                return Ok(cached);
            }
        }

        let body: Value = self
            .http
            .get_json(
                &self.price_url,
                &[("ids", id.clone()), ("vs_currencies", USD_CURRENCY.to_string())],
            )
            .await
            .map_err(|e| OutboundError::wrap("Error fetching crypto data", e))?;

        // An unknown symbol comes back as an empty object, not an error status.
        let quote = body
            .get(&id)
            .and_then(|entry| entry.get(USD_CURRENCY))
            .and_then(Value::as_f64)
            .ok_or(OutboundError::NotFound("Cryptocurrency not found"))?;

        let price = CryptoPrice {
            name: symbol.to_string(),
            price_usd: quote,
        };
        self.cache.set(&cache_key, price.clone());
        tracing::info!("Cryptocurrency price data fetched and cached successfully");

        Ok(price)
    }
}
