//! OAuth error types

use thiserror::Error;

/// Errors raised at the OAuth boundary
///
/// The `Display` output may contain configuration or provider detail and is
/// meant for server-side logs only; route handlers answer clients with a
/// generic message.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// Missing or malformed client id / secret / redirect URI / endpoints
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure reported by the provider or while talking to it
    #[error("OAuth provider error: {0}")]
    Provider(String),

    /// Token bundle rejected at the boundary
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

impl OAuthError {
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<reqwest::Error> for OAuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Provider(err.to_string())
    }
}
