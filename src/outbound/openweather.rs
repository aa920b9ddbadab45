//! OpenWeather geocoding and current conditions.
//!
//! Two-stage lookup, each stage with its own TTL cache: a city name is
//! geocoded to coordinates, then the coordinates are resolved to current
//! conditions. The stages can also be called independently.

use serde::{Deserialize, Serialize};

use super::{OutboundError, ResilientHttpClient};
use crate::cache::TimedCache;

/// Result of the geocoding stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityCoordinates {
    pub lat: f64,
    pub lon: f64,
    /// Canonical city name as the provider spells it.
    pub name: String,
}

/// Result of the conditions stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Formatted metric temperature, e.g. `"18.2°C"`.
    pub temperature: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct ConditionsResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp: f64,
    weather: Vec<WeatherDescription>,
}

#[derive(Debug, Deserialize)]
struct WeatherDescription {
    description: String,
}

/// Weather client with per-stage TTL caches in front of the network.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: ResilientHttpClient,
    coords_cache: TimedCache<CityCoordinates>,
    weather_cache: TimedCache<WeatherSnapshot>,
    geocoding_url: String,
    weather_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(
        http: ResilientHttpClient,
        coords_cache: TimedCache<CityCoordinates>,
        weather_cache: TimedCache<WeatherSnapshot>,
        geocoding_url: String,
        weather_url: String,
        api_key: String,
    ) -> Self {
        Self {
            http,
            coords_cache,
            weather_cache,
            geocoding_url,
            weather_url,
            api_key,
        }
    }

    /// Geocode `city` to coordinates, case-insensitively cached.
    pub async fn get_city_coordinates(
        &self,
        city: &str,
        refresh: bool,
    ) -> Result<CityCoordinates, OutboundError> {
        let cache_key = format!("city:{}", city.to_lowercase());

        if !refresh {
            if let Some(cached) = self.coords_cache.get(&cache_key) {
                tracing::info!("Returning cached city coordinates");
                return Ok(cached);
            }
        }

        let matches: Vec<CityCoordinates> = self
            .http
            .get_json(
                &self.geocoding_url,
                &[
                    ("q", city.to_string()),
                    ("limit", "1".to_string()),
                    ("appid", self.api_key.clone()),
                ],
            )
            .await
            .map_err(|e| OutboundError::wrap("Error fetching city coordinates", e))?;

        // Unknown cities come back as an empty array, not an error status.
        let coords = matches
            .into_iter()
            .next()
            .ok_or(OutboundError::NotFound("City not found"))?;

        self.coords_cache.set(&cache_key, coords.clone());
        tracing::info!("City coordinates data fetched and cached successfully");

        Ok(coords)
    }

    /// Fetch current conditions for a coordinate pair.
    pub async fn get_weather(
        &self,
        lat: f64,
        lon: f64,
        refresh: bool,
    ) -> Result<WeatherSnapshot, OutboundError> {
        let cache_key = format!("weather:{lat},{lon}");

        if !refresh {
            if let Some(cached) = self.weather_cache.get(&cache_key) {
                tracing::info!("Returning cached weather data");
                return Ok(cached);
            }
        }

        let conditions: ConditionsResponse = self
            .http
            .get_json(
                &self.weather_url,
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("units", "metric".to_string()),
                    ("exclude", "minutely,hourly,daily".to_string()),
                    ("appid", self.api_key.clone()),
                ],
            )
            .await
            .map_err(|e| OutboundError::wrap("Error fetching weather data", e))?;

        let description = conditions
            .current
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or(OutboundError::Provider {
                context: "Error fetching weather data",
                message: "no conditions present in provider response".to_string(),
            })?;

        let snapshot = WeatherSnapshot {
            temperature: format!("{}°C", conditions.current.temp),
            description,
        };
        self.weather_cache.set(&cache_key, snapshot.clone());
        tracing::info!("Weather data fetched and cached successfully");

        Ok(snapshot)
    }

    /// Compose the two stages: geocode first, then current conditions.
    ///
    /// `refresh` applies to the geocoding stage; the conditions stage always
    /// consults its cache, matching how the stages are wired upstream.
    pub async fn get_weather_by_city(
        &self,
        city: &str,
        refresh: bool,
    ) -> Result<WeatherSnapshot, OutboundError> {
        let result = async {
            let coords = self.get_city_coordinates(city, refresh).await?;
            self.get_weather(coords.lat, coords.lon, false).await
        }
        .await;

        result.map_err(|e| OutboundError::wrap("Error fetching weather data by city", e))
    }
}
