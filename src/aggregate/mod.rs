//! Fan-out/fan-in aggregation of weather and crypto lookups.
//!
//! The one place in the service with genuine concurrency coordination:
//! both provider lookups start before either is awaited, and the first
//! failure fails the whole operation. No partial result is ever returned.

use serde::Serialize;

use crate::outbound::{CoinGeckoClient, CryptoPrice, OpenWeatherClient, OutboundError};

/// Combined response for one city / currency pair.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedReport {
    pub city: String,
    pub temperature: String,
    pub description: String,
    pub crypto: CryptoPrice,
}

#[derive(Clone)]
pub struct AggregationService {
    weather: OpenWeatherClient,
    crypto: CoinGeckoClient,
}

impl AggregationService {
    pub fn new(weather: OpenWeatherClient, crypto: CoinGeckoClient) -> Self {
        Self { weather, crypto }
    }

    /// Run the weather-by-city and price lookups concurrently and merge.
    pub async fn get_combined(
        &self,
        city: &str,
        currency: &str,
        refresh: bool,
    ) -> Result<CombinedReport, OutboundError> {
        let (weather, crypto) = tokio::try_join!(
            self.weather.get_weather_by_city(city, refresh),
            self.crypto.get_price(currency, refresh),
        )?;

        Ok(CombinedReport {
            city: city.to_string(),
            temperature: weather.temperature,
            description: weather.description,
            crypto,
        })
    }
}
