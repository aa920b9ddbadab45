//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! Request
//!     → server.rs (router, middleware stack)
//!     → auth guards (bearer token, role check)
//!     → routes/ (handlers: auth, users, data)
//!     → error.rs (failures rendered as { "message": ... })
//! ```

pub mod error;
pub mod routes;
pub mod server;

pub use server::{build_router, AppState, HttpServer};
