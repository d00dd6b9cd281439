//! Test fixtures shared by unit tests

use std::sync::Arc;

use crate::oauth::{Credentials, OAuthClientFactory, OAuthConfig};
use crate::settings::GoogleSettings;

pub const TEST_CLIENT_ID: &str = "test-client-id";
pub const TEST_CLIENT_SECRET: &str = "test-client-secret";
pub const TEST_REDIRECT_URI: &str = "https://example.com/callback";

/// Central fixture provider for test data
pub struct TestFixtures;

impl TestFixtures {
    /// Google settings with a complete client configuration
    #[must_use]
    pub fn google_settings() -> GoogleSettings {
        GoogleSettings {
            client_id: Some(TEST_CLIENT_ID.to_string()),
            client_secret: Some(TEST_CLIENT_SECRET.to_string()),
            redirect_uri: Some(TEST_REDIRECT_URI.to_string()),
            ..GoogleSettings::default()
        }
    }

    #[must_use]
    pub fn oauth_config() -> OAuthConfig {
        OAuthConfig::from_settings(&Self::google_settings())
    }

    #[must_use]
    pub fn client_factory() -> OAuthClientFactory {
        OAuthClientFactory::new(Arc::new(Self::oauth_config()))
    }

    #[must_use]
    pub fn credentials() -> Credentials {
        Credentials {
            refresh_token: Some("1//test-refresh-token".to_string()),
            scope: Some(Self::google_settings().scopes.join(" ")),
            ..Credentials::bearer("ya29.test-access-token")
        }
    }
}
