// Centralized logging for recurring auth boundary events.
// Tokens, secrets and full consent URLs are never logged.
use log::{debug, error, info, warn};

use crate::oauth::{OAuthConfig, OAuthError};
use crate::session::SessionState;

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log OAuth client configuration status at startup
    pub fn log_oauth_config_status(config: &OAuthConfig) {
        match config.client_identity() {
            Ok(identity) => info!(
                "✅ Google OAuth client configured (redirect URI: {})",
                identity.redirect_uri
            ),
            Err(e) => warn!("❌ Google OAuth client not configured: {e}"),
        }
    }

    /// Log consent URL construction
    pub fn log_auth_url_built(scopes: &str, access_type: &str) {
        debug!("🔍 Built Google consent URL with scopes: {scopes} (access_type={access_type})");
    }

    /// Log a failure that is reported to the client as a generic 500
    pub fn log_auth_url_failure(err: &OAuthError) {
        error!("Failed to generate Google auth URL: {err}");
    }

    /// Log a token endpoint request
    pub fn log_token_request(grant_type: &str) {
        info!("🔄 Requesting Google tokens (grant_type={grant_type})");
    }

    /// Log a session state transition
    pub fn log_session_transition(from: SessionState, to: SessionState) {
        debug!("Session state: {from:?} -> {to:?}");
    }
}
