//! Clinic intake client core.
//!
//! The client-side mechanisms behind the patient screening front-end: a
//! resilient HTTP request client, the two-step screening form controller,
//! and the domain services around them. Presentation is an external
//! consumer of this crate.

// Core subsystems
pub mod api;
pub mod config;
pub mod resilience;
pub mod screening;

// Domain services
pub mod account;

// Cross-cutting concerns
pub mod notify;
pub mod observability;

pub use api::client::ApiClient;
pub use api::error::{ApiError, ApiResult, ErrorKind};
pub use config::ClientConfig;
pub use screening::form::ScreeningForm;
