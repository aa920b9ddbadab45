//! HTTP server setup and wiring.
//!
//! # Responsibilities
//! - Build the composition root (store, clients, services) from config
//! - Create the Axum router with all handlers and guards
//! - Wire up middleware (tracing, CORS, body limits, request timeout)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::aggregate::AggregationService;
use crate::auth::middleware::{require_admin, require_auth};
use crate::auth::token::TokenIssuer;
use crate::auth::AuthService;
use crate::cache::TimedCache;
use crate::config::AppConfig;
use crate::http::routes;
use crate::outbound::{CoinGeckoClient, OpenWeatherClient, ResilientHttpClient, RetryPolicy};
use crate::users::store::MemoryStore;
use crate::users::UserService;

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state injected into handlers and guards.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
    pub aggregator: AggregationService,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Manually wired composition root; collaborators are constructed here
    /// and handed to the services already built.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenIssuer::new(&config.auth.jwt_secret, config.auth.token_ttl_secs);

        let policy = RetryPolicy {
            max_retries: config.outbound.max_retries,
            base_delay: Duration::from_millis(config.outbound.base_delay_ms),
        };
        let http =
            ResilientHttpClient::new(Duration::from_millis(config.outbound.timeout_ms), policy)?;

        let ttl = Duration::from_secs(config.cache.ttl_secs);
        let weather = OpenWeatherClient::new(
            http.clone(),
            TimedCache::new(ttl),
            TimedCache::new(ttl),
            config.providers.geocoding_url.clone(),
            config.providers.weather_url.clone(),
            config.providers.openweather_api_key.clone(),
        );
        let crypto = CoinGeckoClient::new(
            http,
            TimedCache::new(ttl),
            config.providers.crypto_url.clone(),
        );

        Ok(Self {
            auth: AuthService::new(store.clone(), tokens.clone()),
            users: UserService::new(store),
            aggregator: AggregationService::new(weather, crypto),
            tokens,
        })
    }
}

/// Build the Axum router with all handlers, guards, and middleware layers.
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route(
            "/profile",
            get(routes::auth::profile)
                .layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        );

    let user_routes = Router::new()
        .route("/", get(routes::users::list))
        .route(
            "/{id}",
            get(routes::users::get_by_id)
                .patch(routes::users::update)
                .delete(routes::users::remove),
        )
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(routes::health))
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .route("/data", get(routes::data::combined))
        .with_state(state)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::from_config(config)?;
        Ok(Self {
            router: build_router(state),
        })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
