#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the classroom portal
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod classroom;
pub mod handlers;
pub mod models;
pub mod oauth;
pub mod session;
pub mod settings;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

/// Re-export commonly used items
pub use handlers::configure_services;
pub use oauth::{generate_auth_url, Credentials, OAuthClientFactory, OAuthConfig, OAuthError};
pub use session::{SessionCookieManager, SessionState};
pub use settings::PortalSettings;
