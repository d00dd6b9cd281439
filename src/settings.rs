use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Google's OAuth 2.0 consent screen
pub const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// Google's OAuth 2.0 token endpoint
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
/// Base URL of the Classroom REST API
pub const CLASSROOM_API_BASE: &str = "https://classroom.googleapis.com/v1";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PortalSettings {
    pub application: ApplicationSettings,
    pub google: GoogleSettings,
    pub session: SessionSettings,
    pub cookies: CookieSettings,
    pub static_files: StaticFilesSettings,
    pub logging: LoggingSettings,
}

/// Deployment mode of the running process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            _ => Ok(Self::Development),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub cors_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub scopes: Vec<String>,
    /// `offline` asks Google for a refresh token
    pub access_type: String,
    pub prompt: Option<String>,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub classroom_api_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Lifetime of the `token` cookie in hours
    pub session_duration_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CookieSettings {
    /// Explicit override; when unset the deployment environment decides
    pub secure: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFilesSettings {
    pub assets_folder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            cors_origins: "http://localhost:3000,http://localhost:8080".to_string(),
        }
    }
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            scopes: vec![
                "https://www.googleapis.com/auth/classroom.courses.readonly".to_string(),
                "https://www.googleapis.com/auth/classroom.rosters.readonly".to_string(),
                "https://www.googleapis.com/auth/userinfo.email".to_string(),
                "https://www.googleapis.com/auth/userinfo.profile".to_string(),
            ],
            access_type: "offline".to_string(),
            prompt: Some("consent".to_string()),
            authorization_endpoint: GOOGLE_AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
            classroom_api_base: CLASSROOM_API_BASE.to_string(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            session_duration_hours: 24,
        }
    }
}

impl Default for StaticFilesSettings {
    fn default() -> Self {
        Self {
            assets_folder: "static".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl PortalSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// This also loads the `.env` file and initializes the logger.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Logger initialization fails
    /// - A settings file cannot be read or parsed
    pub fn load() -> Result<Self> {
        Self::initialize_environment()?;

        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);

        Ok(settings)
    }

    /// Initialize environment and logging
    fn initialize_environment() -> Result<()> {
        Self::load_env_file();
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
            .context("Failed to initialize logger")?;
        Ok(())
    }

    /// Load base settings from TOML file(s) or use defaults
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `PORTAL_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    fn load_base_settings() -> Result<Self> {
        let mut settings = Self::default();

        let default_config_path = Path::new("Settings.toml");
        if default_config_path.exists() {
            settings = Self::from_file(default_config_path)?;
            log::info!(
                "✓ Loaded base settings from {}",
                default_config_path.display()
            );
        }

        if let Ok(secrets_dir) = std::env::var("PORTAL_SECRETS_DIR") {
            let secrets_path = Path::new(&secrets_dir).join("Settings.toml");
            if secrets_path.exists() {
                settings = Self::from_file(&secrets_path)?;
                log::info!("✓ Overriding settings from {}", secrets_path.display());
            } else {
                log::info!(
                    "ℹ PORTAL_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Parse a single TOML settings file; missing sections fall back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn from_file(path: &Path) -> Result<Self> {
        let toml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        basic_toml::from_str(&toml_content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_google_env_overrides(&mut settings.google);
        Self::apply_session_env_overrides(&mut settings.session);
        Self::apply_cookie_env_overrides(&mut settings.cookies);
        Self::apply_static_files_env_overrides(&mut settings.static_files);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                app_settings.port = port;
            }
        }
        if let Ok(environment) = std::env::var("APP_ENV") {
            // Infallible: unknown values mean development
            app_settings.environment = environment.parse().unwrap_or_default();
        }
        if let Ok(cors_origins) = std::env::var("CORS_ORIGINS") {
            app_settings.cors_origins = cors_origins;
        }
    }

    /// Apply environment overrides for the Google OAuth client
    pub fn apply_google_env_overrides(google: &mut GoogleSettings) {
        Self::apply_optional_env_override("GOOGLE_CLIENT_ID", &mut google.client_id);
        Self::apply_optional_env_override("GOOGLE_CLIENT_SECRET", &mut google.client_secret);
        Self::apply_optional_env_override("GOOGLE_REDIRECT_URI", &mut google.redirect_uri);
    }

    fn apply_optional_env_override(env_var: &str, target: &mut Option<String>) {
        if let Ok(value) = std::env::var(env_var) {
            *target = Some(value);
        }
    }

    fn apply_session_env_overrides(session_settings: &mut SessionSettings) {
        if let Ok(value_str) = std::env::var("SESSION_DURATION_HOURS") {
            if let Ok(value) = value_str.parse::<u64>() {
                session_settings.session_duration_hours = value;
            }
        }
    }

    fn apply_cookie_env_overrides(cookie_settings: &mut CookieSettings) {
        if let Ok(cookie_secure_str) = std::env::var("COOKIE_SECURE") {
            if let Ok(cookie_secure) = cookie_secure_str.parse::<bool>() {
                cookie_settings.secure = Some(cookie_secure);
            }
        }
    }

    fn apply_static_files_env_overrides(static_settings: &mut StaticFilesSettings) {
        if let Ok(assets_folder) = std::env::var("STATIC_FOLDER_PATH") {
            static_settings.assets_folder = assets_folder;
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }

    /// Get CORS origins as a vector of strings
    #[must_use]
    pub fn get_cors_origins(&self) -> Vec<String> {
        self.application
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Whether the session cookie carries the `Secure` attribute
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookies
            .secure
            .unwrap_or_else(|| self.application.environment.is_production())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clean_env_vars() {
        for var in [
            "GOOGLE_CLIENT_ID",
            "GOOGLE_CLIENT_SECRET",
            "GOOGLE_REDIRECT_URI",
            "APP_ENV",
            "COOKIE_SECURE",
            "SESSION_DURATION_HOURS",
            "PORTAL_SECRETS_DIR",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let settings = PortalSettings::default();
        assert_eq!(settings.session.session_duration_hours, 24);
        assert_eq!(settings.google.access_type, "offline");
        assert_eq!(settings.google.prompt.as_deref(), Some("consent"));
        assert!(settings.google.client_id.is_none());
        assert!(!settings.cookie_secure());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            "production".parse::<Environment>(),
            Ok(Environment::Production)
        );
        assert_eq!("PROD".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("staging".parse::<Environment>(), Ok(Environment::Development));
    }

    #[test]
    fn test_cookie_secure_follows_environment_unless_overridden() {
        let mut settings = PortalSettings::default();
        settings.application.environment = Environment::Production;
        assert!(settings.cookie_secure());

        settings.cookies.secure = Some(false);
        assert!(!settings.cookie_secure());
    }

    #[test]
    #[serial]
    fn test_google_env_overrides() {
        clean_env_vars();
        std::env::set_var("GOOGLE_CLIENT_ID", "env-client-id");
        std::env::set_var("GOOGLE_REDIRECT_URI", "https://example.com/callback");

        let mut settings = PortalSettings::default();
        settings.google.client_secret = Some("file-secret".to_string());
        PortalSettings::apply_env_overrides(&mut settings);

        assert_eq!(settings.google.client_id.as_deref(), Some("env-client-id"));
        assert_eq!(
            settings.google.redirect_uri.as_deref(),
            Some("https://example.com/callback")
        );
        // Untouched when the variable is absent
        assert_eq!(settings.google.client_secret.as_deref(), Some("file-secret"));

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_deployment_env_overrides() {
        clean_env_vars();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("SESSION_DURATION_HOURS", "48");

        let mut settings = PortalSettings::default();
        PortalSettings::apply_env_overrides(&mut settings);

        assert_eq!(settings.application.environment, Environment::Production);
        assert_eq!(settings.session.session_duration_hours, 48);
        assert!(settings.cookie_secure());

        std::env::set_var("COOKIE_SECURE", "false");
        PortalSettings::apply_env_overrides(&mut settings);
        assert!(!settings.cookie_secure());

        clean_env_vars();
    }

    #[test]
    fn test_partial_settings_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[google]
client_id = "file-client"
redirect_uri = "https://portal.example.com/api/auth/callback"

[session]
session_duration_hours = 12
"#
        )
        .unwrap();

        let settings = PortalSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.google.client_id.as_deref(), Some("file-client"));
        assert_eq!(settings.session.session_duration_hours, 12);
        assert_eq!(settings.google.token_endpoint, GOOGLE_TOKEN_ENDPOINT);
        assert_eq!(settings.application.port, 8080);
    }

    #[test]
    fn test_invalid_settings_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[application\nport = ").unwrap();
        assert!(PortalSettings::from_file(file.path()).is_err());
    }

    #[test]
    fn test_cors_origins_are_trimmed() {
        let mut settings = PortalSettings::default();
        settings.application.cors_origins = " http://a.test , http://b.test,".to_string();
        assert_eq!(
            settings.get_cors_origins(),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
