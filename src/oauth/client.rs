//! OAuth client factory
//!
//! The factory binds previously obtained [`Credentials`] to the process's
//! client id, secret and redirect URI. Building a client performs no network
//! call; malformed tokens only surface once the client talks to Google.

use crate::oauth::{Credentials, OAuthConfig, OAuthError, RawCredentials};
use crate::utils::logging::LoggingHelper;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

/// Authorized access to provider APIs
///
/// Downstream API wrappers depend on this trait rather than on
/// [`OAuthClient`] so they can be exercised without a provider.
#[async_trait]
pub trait AuthorizedClient: Send + Sync {
    /// Perform an authorized `GET` and decode the JSON body
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::Provider` if the request fails or the provider
    /// answers with a non-success status
    async fn get_json(&self, url: &str) -> Result<Value, OAuthError>;
}

/// Builds [`OAuthClient`]s around the shared configuration
#[derive(Clone)]
pub struct OAuthClientFactory {
    config: Arc<OAuthConfig>,
    http_client: reqwest::Client,
}

impl OAuthClientFactory {
    #[must_use]
    pub fn new(config: Arc<OAuthConfig>) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    #[must_use]
    pub fn with_http_client(config: Arc<OAuthConfig>, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Wrap `credentials` in a client bound to the configured OAuth client
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::Configuration` if the client id, secret or
    /// redirect URI is missing or malformed
    pub fn create(&self, credentials: Credentials) -> Result<OAuthClient, OAuthError> {
        self.config.client_identity()?;
        Ok(OAuthClient {
            config: Arc::clone(&self.config),
            http_client: self.http_client.clone(),
            credentials,
        })
    }

    /// Exchange an authorization code for credentials
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The client configuration is incomplete
    /// - The token endpoint cannot be reached or rejects the code
    /// - The token response is not a valid token set
    pub async fn exchange_code(&self, code: &str) -> Result<Credentials, OAuthError> {
        let identity = self.config.client_identity()?;
        let token_url = self.config.token_endpoint()?;

        LoggingHelper::log_token_request("authorization_code");
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", identity.client_id),
            ("client_secret", identity.client_secret),
            ("redirect_uri", identity.redirect_uri),
        ];
        let raw = post_token_request(&self.http_client, token_url, &params).await?;
        Credentials::from_raw(raw, Utc::now())
    }
}

/// OAuth client with credentials pre-set
#[derive(Clone)]
pub struct OAuthClient {
    config: Arc<OAuthConfig>,
    http_client: reqwest::Client,
    credentials: Credentials,
}

impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("has_refresh_token", &self.credentials.refresh_token.is_some())
            .field("expiry", &self.credentials.expiry)
            .finish_non_exhaustive()
    }
}

impl OAuthClient {
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Replace the held credentials
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// Use the refresh token to obtain a new access token
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No refresh token is held
    /// - The client configuration is incomplete
    /// - The token endpoint rejects the refresh
    pub async fn refresh(&mut self) -> Result<&Credentials, OAuthError> {
        let refresh_token = self.credentials.refresh_token.clone().ok_or_else(|| {
            OAuthError::InvalidCredentials("no refresh token available".to_string())
        })?;
        let identity = self.config.client_identity()?;
        let token_url = self.config.token_endpoint()?;

        LoggingHelper::log_token_request("refresh_token");
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", identity.client_id),
            ("client_secret", identity.client_secret),
        ];
        let raw = post_token_request(&self.http_client, token_url, &params).await?;
        let refreshed = Credentials::from_raw(raw, Utc::now())?;

        self.credentials = self.credentials.merge_refreshed(refreshed);
        Ok(&self.credentials)
    }
}

#[async_trait]
impl AuthorizedClient for OAuthClient {
    async fn get_json(&self, url: &str) -> Result<Value, OAuthError> {
        let response = self
            .http_client
            .get(url)
            .header(
                reqwest::header::AUTHORIZATION,
                self.credentials.authorization_header(),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::Provider(format!(
                "GET {url} failed with status {status}: {body}"
            )));
        }

        Ok(response.json().await?)
    }
}

async fn post_token_request(
    http_client: &reqwest::Client,
    token_url: url::Url,
    params: &[(&str, &str)],
) -> Result<RawCredentials, OAuthError> {
    let response = http_client.post(token_url).form(params).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(OAuthError::Provider(format!(
            "token request failed with status {status}: {body}"
        )));
    }

    Ok(response.json().await?)
}
