//! Configuration management.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (INTAKE_API_BASE_URL)
//!     → ClientConfig (immutable once built)
//! ```
//!
//! # Design Decisions
//! - Every field has a default so no config file is required at all
//! - The environment always wins over the file for the base URL

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, BASE_URL_ENV};
pub use schema::{ApiConfig, ClientConfig, ObservabilityConfig, RetryConfig};
