use serde::{Deserialize, Serialize};

use crate::session::SessionState;

/// Body of `GET /api/auth/google-url`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthUrlResponse {
    #[serde(rename = "authUrl")]
    pub auth_url: String,
}

/// Generic error body; never carries internal detail
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `POST /api/auth/logout`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Body of `GET /api/auth/session`
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub state: SessionState,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
