//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use quill_infra::JwtConfig;
use quill_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub site: SiteConfig,
    pub jwt: JwtConfig,
    pub admin: Option<AdminCredentials>,
}

/// Static site settings handed to every template.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub blog_title: String,
    pub template_path: PathBuf,
    /// Where the access guard sends visitors without a session.
    pub login_url: String,
}

/// Administrator created at startup when missing.
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            blog_title: "Quill".to_string(),
            template_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates")),
            login_url: "/login".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        let defaults = SiteConfig::default();
        let site = SiteConfig {
            blog_title: env::var("BLOG_TITLE").unwrap_or(defaults.blog_title),
            template_path: env::var("TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_path),
            login_url: env::var("LOGIN_URL").unwrap_or(defaults.login_url),
        };

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminCredentials { email, password })
            }
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            site,
            jwt: JwtConfig::from_env(),
            admin,
        }
    }
}
