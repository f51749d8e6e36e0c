//! Account subsystem: registration and the authenticated profile.

pub mod service;
pub mod types;

pub use service::{AccountService, InMemoryTokenStore, TokenStore};
pub use types::{Profile, RegisterRequest};
