// HTTP request handlers
pub mod auth;
pub mod health;
pub mod pages;

use actix_web::web;

pub use auth::{google_auth_url, logout, session_status};
pub use health::health;
pub use pages::{admin, home};

/// Route table shared by the server and the integration tests
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg
        // Auth API
        .route("/api/auth/google-url", web::get().to(google_auth_url))
        .route("/api/auth/logout", web::post().to(logout))
        .route("/api/auth/session", web::get().to(session_status))
        // Page shells
        .route("/", web::get().to(home))
        .route("/admin", web::get().to(admin))
        // Health endpoint
        .route("/ping", web::get().to(health));
}
