//! OAuth token bundle
//!
//! Token payloads arrive as loosely typed JSON (Google's token endpoint, or
//! a serialized token set handed over by the callback route). They are
//! parsed into [`RawCredentials`] and validated into [`Credentials`] before
//! any client is built around them.

use crate::oauth::OAuthError;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Token payload as received, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Absolute expiry in milliseconds since the epoch (googleapis token sets)
    pub expiry_date: Option<i64>,
    /// Relative expiry in seconds (token endpoint responses)
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
    pub id_token: Option<String>,
}

/// Validated OAuth credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
    pub id_token: Option<String>,
}

impl Credentials {
    /// Bearer credentials with only an access token
    #[must_use]
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expiry: None,
            scope: None,
            token_type: Some("Bearer".to_string()),
            id_token: None,
        }
    }

    /// Validate a raw token payload, resolving relative expiry against `now`
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::InvalidCredentials` if:
    /// - The access token is missing or blank
    /// - A token type other than `Bearer` is given
    /// - The expiry is out of range
    pub fn from_raw(raw: RawCredentials, now: DateTime<Utc>) -> Result<Self, OAuthError> {
        let access_token = non_blank(raw.access_token)
            .ok_or_else(|| OAuthError::InvalidCredentials("missing access token".to_string()))?;

        if let Some(token_type) = raw.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                return Err(OAuthError::InvalidCredentials(format!(
                    "unsupported token type: {token_type}"
                )));
            }
        }

        let expiry = match (raw.expiry_date, raw.expires_in) {
            (Some(millis), _) => Some(
                Utc.timestamp_millis_opt(millis)
                    .single()
                    .ok_or_else(|| OAuthError::InvalidCredentials("expiry out of range".to_string()))?,
            ),
            (None, Some(seconds)) => Some(
                Duration::try_seconds(seconds)
                    .and_then(|d| now.checked_add_signed(d))
                    .ok_or_else(|| OAuthError::InvalidCredentials("expiry out of range".to_string()))?,
            ),
            (None, None) => None,
        };

        Ok(Self {
            access_token,
            refresh_token: non_blank(raw.refresh_token),
            expiry,
            scope: non_blank(raw.scope),
            token_type: raw.token_type,
            id_token: non_blank(raw.id_token),
        })
    }

    /// Parse and validate a JSON token payload
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::InvalidCredentials` if the JSON does not describe
    /// a token set or fails validation
    pub fn from_json(value: serde_json::Value) -> Result<Self, OAuthError> {
        let raw: RawCredentials = serde_json::from_value(value)
            .map_err(|e| OAuthError::InvalidCredentials(format!("malformed token payload: {e}")))?;
        Self::from_raw(raw, Utc::now())
    }

    /// Whether the access token is expired at `now`; unknown expiry counts as valid
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= now)
    }

    /// Value for the `Authorization` header
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Merge a refreshed token set, keeping the refresh token when none is returned
    #[must_use]
    pub fn merge_refreshed(&self, refreshed: Self) -> Self {
        Self {
            refresh_token: refreshed
                .refresh_token
                .or_else(|| self.refresh_token.clone()),
            scope: refreshed.scope.or_else(|| self.scope.clone()),
            ..refreshed
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_googleapis_token_set_is_accepted() {
        let creds = Credentials::from_json(json!({
            "access_token": "ya29.a0AfH6",
            "refresh_token": "1//0gRefresh",
            "expiry_date": 1_725_192_000_000_i64,
            "scope": "https://www.googleapis.com/auth/classroom.courses.readonly",
            "token_type": "Bearer"
        }))
        .unwrap();

        assert_eq!(creds.access_token, "ya29.a0AfH6");
        assert_eq!(creds.refresh_token.as_deref(), Some("1//0gRefresh"));
        assert_eq!(creds.expiry, Some(fixed_now()));
        assert_eq!(creds.authorization_header(), "Bearer ya29.a0AfH6");
    }

    #[test]
    fn test_expires_in_is_relative_to_now() {
        let raw = RawCredentials {
            access_token: Some("token".to_string()),
            expires_in: Some(3599),
            ..Default::default()
        };
        let creds = Credentials::from_raw(raw, fixed_now()).unwrap();
        assert_eq!(creds.expiry, Some(fixed_now() + Duration::seconds(3599)));
        assert!(!creds.is_expired_at(fixed_now()));
        assert!(creds.is_expired_at(fixed_now() + Duration::hours(1)));
    }

    #[test]
    fn test_missing_access_token_is_rejected() {
        let err = Credentials::from_json(json!({ "refresh_token": "r" })).unwrap_err();
        assert!(matches!(err, OAuthError::InvalidCredentials(_)));

        let err = Credentials::from_json(json!({ "access_token": "  " })).unwrap_err();
        assert!(err.to_string().contains("missing access token"));
    }

    #[test]
    fn test_non_bearer_token_type_is_rejected() {
        let err = Credentials::from_json(json!({
            "access_token": "token",
            "token_type": "MAC"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unsupported token type"));
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        let err = Credentials::from_json(json!({ "access_token": 42 })).unwrap_err();
        assert!(err.to_string().contains("malformed token payload"));
    }

    #[test]
    fn test_unknown_expiry_never_expires() {
        let creds = Credentials::bearer("token");
        assert!(!creds.is_expired_at(fixed_now()));
    }

    #[test]
    fn test_merge_refreshed_keeps_refresh_token() {
        let mut original = Credentials::bearer("old");
        original.refresh_token = Some("refresh".to_string());

        let merged = original.merge_refreshed(Credentials::bearer("new"));
        assert_eq!(merged.access_token, "new");
        assert_eq!(merged.refresh_token.as_deref(), Some("refresh"));
    }
}
