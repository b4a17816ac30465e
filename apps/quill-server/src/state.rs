//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context as _;
use tera::Tera;

use quill_core::ports::{EntryRepository, PasswordService, TokenService, UserRepository};
use quill_infra::{
    Argon2PasswordService, InMemoryEntryRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};

use crate::config::{AppConfig, SiteConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub entries: Arc<dyn EntryRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub templates: Arc<Tera>,
    pub site: Arc<SiteConfig>,
}

type Stores = (Arc<dyn EntryRepository>, Arc<dyn UserRepository>);

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (entries, users) = Self::stores(config).await;

        let state = Self::with_stores(
            config.site.clone(),
            config.jwt.clone(),
            entries,
            users,
        )?;

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Assemble state around existing stores, loading templates from disk.
    pub fn with_stores(
        site: SiteConfig,
        jwt: JwtConfig,
        entries: Arc<dyn EntryRepository>,
        users: Arc<dyn UserRepository>,
    ) -> anyhow::Result<Self> {
        let glob = site.template_path.join("**").join("*");
        let templates = Tera::new(&glob.to_string_lossy())
            .with_context(|| format!("loading templates from {}", site.template_path.display()))?;

        tracing::debug!(
            templates = templates.get_template_names().count(),
            "Templates loaded"
        );

        Ok(Self {
            entries,
            users,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
            templates: Arc::new(templates),
            site: Arc::new(site),
        })
    }

    /// State over fresh in-memory stores.
    #[cfg(test)]
    pub fn in_memory(site: SiteConfig, jwt: JwtConfig) -> anyhow::Result<Self> {
        Self::with_stores(
            site,
            jwt,
            Arc::new(InMemoryEntryRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }

    #[cfg(feature = "postgres")]
    async fn stores(config: &AppConfig) -> Stores {
        use quill_infra::{PostgresEntryRepository, PostgresUserRepository};

        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::memory_stores();
        };

        match quill_infra::database::connect(db_config).await {
            Ok(conn) => (
                Arc::new(PostgresEntryRepository::new(conn.clone())),
                Arc::new(PostgresUserRepository::new(conn)),
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::memory_stores()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn stores(_config: &AppConfig) -> Stores {
        tracing::info!("Running without postgres feature - using in-memory stores");
        Self::memory_stores()
    }

    fn memory_stores() -> Stores {
        (
            Arc::new(InMemoryEntryRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }
}
