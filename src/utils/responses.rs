//! HTTP response helpers
//!
//! Error bodies are generic on purpose: handlers log the underlying cause and
//! answer clients with one of the fixed messages below.

use actix_web::{cookie::Cookie, http::header, http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::models::{ErrorResponse, LogoutResponse};

// ===============================
// CACHED RESPONSES
// ===============================

/// Pre-serialized bodies for responses that never change
static CACHED_RESPONSES: std::sync::LazyLock<CachedResponses> =
    std::sync::LazyLock::new(CachedResponses::new);

struct CachedResponses {
    auth_url_failed: String,
    logout_success: String,
}

impl CachedResponses {
    fn new() -> Self {
        Self {
            auth_url_failed: Self::error_json("Failed to generate auth URL"),
            logout_success: Self::to_json(&LogoutResponse { success: true }),
        }
    }

    fn error_json(message: &str) -> String {
        Self::to_json(&ErrorResponse {
            error: message.to_string(),
        })
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Unified response builder for the JSON API
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// 200 with a serialized JSON body
    #[must_use]
    pub fn ok_json<T: Serialize>(body: &T) -> HttpResponse {
        HttpResponse::Ok().json(body)
    }

    /// 500 reported when the consent URL cannot be produced
    #[must_use]
    pub fn auth_url_failed() -> HttpResponse {
        Self::cached_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            &CACHED_RESPONSES.auth_url_failed,
            None,
        )
    }

    /// 200 `{"success": true}` carrying the clearing session cookie
    #[must_use]
    pub fn logout_success(clear_cookie: Cookie<'static>) -> HttpResponse {
        Self::cached_json(
            StatusCode::OK,
            &CACHED_RESPONSES.logout_success,
            Some(clear_cookie),
        )
    }

    /// 200 HTML document
    #[must_use]
    pub fn html(body: String) -> HttpResponse {
        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body)
    }

    fn cached_json(status: StatusCode, body: &str, cookie: Option<Cookie<'static>>) -> HttpResponse {
        let mut builder = HttpResponse::build(status);
        builder.insert_header((header::CONTENT_TYPE, "application/json"));
        if let Some(cookie) = cookie {
            builder.cookie(cookie);
        }
        builder.body(body.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_auth_url_failed_is_generic() {
        let response = ResponseBuilder::auth_url_failed();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to generate auth URL");
    }

    #[actix_web::test]
    async fn test_logout_success_body() {
        let response = ResponseBuilder::logout_success(Cookie::new("token", ""));
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::SET_COOKIE));

        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], br#"{"success":true}"#);
    }
}
