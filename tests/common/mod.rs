//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use skymint::config::AppConfig;
use skymint::http::{build_router, AppState};

/// Serve `router` on an ephemeral local port and return its address.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Mock geocoding + conditions provider; counts requests per endpoint.
pub struct WeatherUpstream {
    pub addr: SocketAddr,
    pub geo_calls: Arc<AtomicU32>,
    pub weather_calls: Arc<AtomicU32>,
}

pub async fn spawn_weather_upstream() -> WeatherUpstream {
    let geo_calls = Arc::new(AtomicU32::new(0));
    let weather_calls = Arc::new(AtomicU32::new(0));

    let gc = geo_calls.clone();
    let wc = weather_calls.clone();
    let router = Router::new()
        .route(
            "/geo",
            get(move || {
                let gc = gc.clone();
                async move {
                    gc.fetch_add(1, Ordering::SeqCst);
                    Json(json!([{ "lat": 48.8589, "lon": 2.32, "name": "Paris" }]))
                }
            }),
        )
        .route(
            "/weather",
            get(move || {
                let wc = wc.clone();
                async move {
                    wc.fetch_add(1, Ordering::SeqCst);
                    Json(json!({
                        "current": {
                            "temp": 18.2,
                            "weather": [{ "description": "clear sky" }]
                        }
                    }))
                }
            }),
        );

    WeatherUpstream {
        addr: spawn_upstream(router).await,
        geo_calls,
        weather_calls,
    }
}

/// Mock price-quote provider answering for "bitcoin" only.
pub struct CryptoUpstream {
    pub addr: SocketAddr,
    pub calls: Arc<AtomicU32>,
}

pub async fn spawn_crypto_upstream(known_symbol: &'static str, price: f64) -> CryptoUpstream {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let router = Router::new().route(
        "/",
        get(move || {
            let cc = cc.clone();
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Json(json!({ known_symbol: { "usd": price } }))
            }
        }),
    );

    CryptoUpstream {
        addr: spawn_upstream(router).await,
        calls,
    }
}

/// Config wired for tests: secrets present, fast retries, provider URLs
/// pointed at the given mock upstreams.
pub fn test_config(geo_addr: SocketAddr, weather_addr: SocketAddr, crypto_addr: SocketAddr) -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".into();
    config.providers.openweather_api_key = "test-ow-key".into();
    config.providers.coingecko_api_key = "test-cg-key".into();
    config.providers.geocoding_url = format!("http://{geo_addr}/geo");
    config.providers.weather_url = format!("http://{weather_addr}/weather");
    config.providers.crypto_url = format!("http://{crypto_addr}/");
    config.outbound.base_delay_ms = 10;
    config
}

/// Serve the full application router on an ephemeral port.
pub async fn spawn_app(config: &AppConfig) -> SocketAddr {
    let state = AppState::from_config(config).unwrap();
    spawn_upstream(build_router(state)).await
}
