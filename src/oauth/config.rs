//! Process-wide Google OAuth client configuration
//!
//! `OAuthConfig` is built once at startup from [`GoogleSettings`] and shared
//! read-only between requests. Values are kept exactly as configured, so a
//! misconfigured deployment still boots and the failure surfaces on the
//! first request that needs the client.

use crate::oauth::OAuthError;
use crate::settings::GoogleSettings;
use url::Url;

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    scopes: Vec<String>,
    access_type: String,
    prompt: Option<String>,
    authorization_endpoint: String,
    token_endpoint: String,
}

/// Client identity after validation, borrowed from an [`OAuthConfig`]
///
/// `redirect_uri` is the configured value, trimmed but otherwise untouched:
/// Google compares it byte for byte with the registered redirect URI.
#[derive(Debug, Clone, Copy)]
pub struct ClientIdentity<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
}

impl OAuthConfig {
    #[must_use]
    pub fn from_settings(settings: &GoogleSettings) -> Self {
        Self {
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            scopes: settings.scopes.clone(),
            access_type: settings.access_type.clone(),
            prompt: settings.prompt.clone(),
            authorization_endpoint: settings.authorization_endpoint.clone(),
            token_endpoint: settings.token_endpoint.clone(),
        }
    }

    /// Validate and return the client id, secret and redirect URI
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::Configuration` if:
    /// - Any of client id, client secret or redirect URI is missing or blank
    /// - The redirect URI is not an absolute `http`/`https` URL
    pub fn client_identity(&self) -> Result<ClientIdentity<'_>, OAuthError> {
        let client_id = required(self.client_id.as_deref(), "client id")?;
        let client_secret = required(self.client_secret.as_deref(), "client secret")?;
        let redirect_uri = required(self.redirect_uri.as_deref(), "redirect URI")?;

        // Parsed for validation only; the raw value is what gets sent
        let parsed = Url::parse(redirect_uri).map_err(|e| {
            OAuthError::Configuration(format!("redirect URI is not a valid URL: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(OAuthError::Configuration(format!(
                "redirect URI must use http or https, got {}",
                parsed.scheme()
            )));
        }

        Ok(ClientIdentity {
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    /// Parsed authorization (consent screen) endpoint
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::Configuration` if the endpoint is not a valid URL
    pub fn authorization_endpoint(&self) -> Result<Url, OAuthError> {
        parse_endpoint(&self.authorization_endpoint, "authorization endpoint")
    }

    /// Parsed token endpoint
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::Configuration` if the endpoint is not a valid URL
    pub fn token_endpoint(&self) -> Result<Url, OAuthError> {
        parse_endpoint(&self.token_endpoint, "token endpoint")
    }

    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    #[must_use]
    pub fn access_type(&self) -> &str {
        &self.access_type
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Whether all client values are present and well formed
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client_identity().is_ok()
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, OAuthError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(OAuthError::Configuration(format!("Google OAuth {name} is not configured"))),
    }
}

fn parse_endpoint(raw: &str, name: &str) -> Result<Url, OAuthError> {
    Url::parse(raw).map_err(|e| OAuthError::Configuration(format!("invalid {name}: {e}")))
}
