//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     schema.rs (defaults) → loader.rs (TOML file, env overrides)
//!         → loader.rs validate → accepted AppConfig
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load, ConfigError};
pub use schema::AppConfig;
