#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use classroom_portal::{
    configure_services, utils::logging::LoggingHelper, OAuthConfig, PortalSettings,
    SessionCookieManager,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = PortalSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e:#}")))?;

    // Missing OAuth values are reported by the auth-url route, not at startup
    let oauth_config = OAuthConfig::from_settings(&settings.google);
    LoggingHelper::log_oauth_config_status(&oauth_config);

    start_server(oauth_config, settings).await
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(oauth_config: OAuthConfig, settings: PortalSettings) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address, &settings);

    let cookie_manager = web::Data::new(SessionCookieManager::from_settings(&settings));
    let oauth_config = web::Data::new(oauth_config);
    let cors_origins = settings.get_cors_origins();
    let settings = web::Data::new(settings);

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(oauth_config.clone())
            .app_data(cookie_manager.clone())
            .app_data(settings.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn print_startup_info(bind_address: &str, settings: &PortalSettings) {
    log::info!(
        "Starting classroom portal v{} on http://{bind_address} ({:?})",
        classroom_portal::VERSION,
        settings.application.environment
    );
    log::info!("Auth endpoints:");
    log::info!("  GET  /api/auth/google-url - Google consent URL");
    log::info!("  POST /api/auth/logout     - Clear session cookie");
    log::info!("  GET  /api/auth/session    - Session status");
    log::info!("Pages:");
    log::info!("  GET  /       - Student dashboard (admin login when signed out)");
    log::info!("  GET  /admin  - Admin login");
    log::info!("  GET  /ping   - Health check");
    log::info!(
        "Session cookie: secure={}, lifetime={}h",
        settings.cookie_secure(),
        settings.session.session_duration_hours
    );
}
