//! Librarian account types for the login exchange

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials sent to `POST /api/login/`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Authenticated librarian as returned by the login endpoint.
/// Mirrored into session storage so the session survives a restart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub id: String,
    pub user_name: String,
    pub access_token: String,
    pub refresh_token: String,
}
