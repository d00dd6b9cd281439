// Authentication handlers: consent URL, logout and session status
use crate::models::{AuthUrlResponse, SessionStatusResponse};
use crate::oauth::{generate_auth_url, OAuthConfig};
use crate::session::{SessionCookieManager, SessionEvent};
use crate::utils::logging::LoggingHelper;
use crate::utils::responses::ResponseBuilder;
use actix_web::{web, HttpRequest, HttpResponse};
use log::info;

/// `GET /api/auth/google-url`
///
/// Every failure is logged and answered with a generic 500; nothing
/// propagates past this handler.
pub async fn google_auth_url(
    req: HttpRequest,
    oauth_config: web::Data<OAuthConfig>,
    cookie_manager: web::Data<SessionCookieManager>,
) -> HttpResponse {
    match generate_auth_url(&oauth_config) {
        Ok(auth_url) => {
            let current = cookie_manager.session_state(&req);
            LoggingHelper::log_session_transition(
                current,
                current.transition(SessionEvent::ConsentRequested),
            );
            ResponseBuilder::ok_json(&AuthUrlResponse { auth_url })
        }
        Err(e) => {
            LoggingHelper::log_auth_url_failure(&e);
            ResponseBuilder::auth_url_failed()
        }
    }
}

/// `POST /api/auth/logout`
///
/// Always succeeds with the same body and clearing cookie, whether or not a
/// session existed.
pub async fn logout(
    req: HttpRequest,
    cookie_manager: web::Data<SessionCookieManager>,
) -> HttpResponse {
    let current = cookie_manager.session_state(&req);
    if current.is_authenticated() {
        info!("User signed out and session cookie cleared");
    }
    LoggingHelper::log_session_transition(current, current.transition(SessionEvent::LoggedOut));

    ResponseBuilder::logout_success(cookie_manager.clear())
}

/// `GET /api/auth/session`
pub async fn session_status(
    req: HttpRequest,
    cookie_manager: web::Data<SessionCookieManager>,
) -> HttpResponse {
    let state = cookie_manager.session_state(&req);
    ResponseBuilder::ok_json(&SessionStatusResponse {
        authenticated: state.is_authenticated(),
        state,
    })
}
