//! Consent-screen URL generation

use crate::oauth::{OAuthConfig, OAuthError};
use crate::utils::logging::LoggingHelper;

/// Build the Google consent URL for the configured client
///
/// Takes no request-scoped input; everything comes from the process-wide
/// [`OAuthConfig`].
///
/// # Errors
///
/// Returns `OAuthError::Configuration` if:
/// - Client id, secret or redirect URI is missing or malformed
/// - The authorization endpoint is not a valid URL
/// - No scopes are configured
pub fn generate_auth_url(config: &OAuthConfig) -> Result<String, OAuthError> {
    let identity = config.client_identity()?;
    let mut url = config.authorization_endpoint()?;

    if config.scopes().is_empty() {
        return Err(OAuthError::Configuration(
            "no OAuth scopes are configured".to_string(),
        ));
    }
    let scopes = config.scopes().join(" ");

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("client_id", identity.client_id)
            .append_pair("redirect_uri", identity.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &scopes)
            .append_pair("access_type", config.access_type());
        if let Some(prompt) = config.prompt() {
            query.append_pair("prompt", prompt);
        }
    }

    LoggingHelper::log_auth_url_built(&scopes, config.access_type());
    Ok(url.into())
}
