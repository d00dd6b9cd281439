use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;
use log::warn;
use thiserror::Error;

use crate::session::SessionState;
use crate::settings::PortalSettings;

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "token";

/// Browsers cap `Max-Age` at 400 days
pub const MAX_SESSION_DURATION_HOURS: u32 = 400 * 24;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// An empty value is reserved for the cleared cookie
    #[error("Session token must not be empty")]
    EmptyToken,

    /// Bytes outside the RFC 6265 `cookie-octet` set
    #[error("Session token contains characters not allowed in a cookie value")]
    InvalidToken,
}

/// Issues and clears the HTTP-only `token` cookie
#[derive(Debug, Clone)]
pub struct SessionCookieManager {
    cookie_secure: bool,
    max_age: Duration,
}

impl SessionCookieManager {
    /// Durations above [`MAX_SESSION_DURATION_HOURS`] are capped
    #[must_use]
    pub fn new(cookie_secure: bool, session_duration_hours: u64) -> Self {
        let hours = u32::try_from(session_duration_hours)
            .map_or(MAX_SESSION_DURATION_HOURS, |h| h.min(MAX_SESSION_DURATION_HOURS));
        Self {
            cookie_secure,
            max_age: Duration::hours(i64::from(hours)),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &PortalSettings) -> Self {
        let hours = settings.session.session_duration_hours;
        if hours > u64::from(MAX_SESSION_DURATION_HOURS) {
            warn!(
                "Session duration of {hours}h exceeds the cookie limit, capping at {MAX_SESSION_DURATION_HOURS}h"
            );
        }
        Self::new(settings.cookie_secure(), hours)
    }

    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    #[must_use]
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Cookie marking the client as logged in
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `token` is empty (`SessionError::EmptyToken`)
    /// - `token` is not a valid cookie value (`SessionError::InvalidToken`)
    pub fn issue(&self, token: &str) -> Result<Cookie<'static>, SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        if !token.bytes().all(is_cookie_octet) {
            return Err(SessionError::InvalidToken);
        }
        Ok(self.build_cookie(token.to_owned(), self.max_age))
    }

    /// Cookie that expires the session immediately; same output on every call
    #[must_use]
    pub fn clear(&self) -> Cookie<'static> {
        self.build_cookie(String::new(), Duration::ZERO)
    }

    fn build_cookie(&self, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME, value)
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(max_age)
            .finish()
    }

    /// Non-empty session token carried by the request, if any
    #[must_use]
    pub fn token_from_request(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
    }

    /// Session state as observable from a single request
    #[must_use]
    pub fn session_state(&self, req: &HttpRequest) -> SessionState {
        if self.token_from_request(req).is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }
}

/// `cookie-octet` from RFC 6265 section 4.1.1
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}
