//! Account wire types.

use serde::{Deserialize, Serialize};

/// Payload for creating a patient account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Authenticated user summary, as shown in the navbar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub role: String,
}
