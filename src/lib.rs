//! Authenticated weather + crypto aggregation API.

pub mod aggregate;
pub mod auth;
pub mod cache;
pub mod config;
pub mod http;
pub mod outbound;
pub mod users;

pub use config::AppConfig;
pub use http::HttpServer;
