//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use quill_core::domain::{Entry, User};
use quill_core::error::RepoError;
use quill_core::ports::{EntryRepository, UserRepository};

use super::entity::entry::{self, Entity as EntryEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL entry repository.
pub type PostgresEntryRepository = PostgresBaseRepository<EntryEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.split_once('@') {
            Some((local, domain)) if local.chars().count() > 1 => {
                format!("{}***@{}", local.chars().next().unwrap_or('*'), domain)
            }
            Some((_, domain)) => format!("***@{domain}"),
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl EntryRepository for PostgresEntryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Entry>, RepoError> {
        let result = EntryEntity::find()
            .filter(entry::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn list_recent(&self, limit: Option<u64>) -> Result<Vec<Entry>, RepoError> {
        let mut query = EntryEntity::find().order_by_desc(entry::Column::Published);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let result = query.all(&self.db).await.map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = EntryEntity::find()
            .filter(entry::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .map_err(query_error)?;

        Ok(count > 0)
    }
}
