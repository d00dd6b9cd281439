//! Google OAuth module
//!
//! This module provides the pieces of the OAuth handoff: the process-wide
//! client configuration, consent URL generation, validated credentials and
//! the client factory used for downstream provider calls.

pub mod auth_url;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;

pub use auth_url::generate_auth_url;
pub use client::{AuthorizedClient, OAuthClient, OAuthClientFactory};
pub use config::{ClientIdentity, OAuthConfig};
pub use credentials::{Credentials, RawCredentials};
pub use error::OAuthError;
