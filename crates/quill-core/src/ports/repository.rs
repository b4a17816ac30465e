use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Entry, User};
use crate::error::RepoError;

/// Generic repository trait defining the operations every store offers.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// Entry store. Entries are never deleted.
#[async_trait]
pub trait EntryRepository: BaseRepository<Entry, Uuid> {
    /// Find the entry carrying `slug`.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Entry>, RepoError>;

    /// Entries ordered by `published`, newest first. `None` returns all of them.
    async fn list_recent(&self, limit: Option<u64>) -> Result<Vec<Entry>, RepoError>;

    /// Whether any entry carries `slug`.
    async fn exists(&self, slug: &str) -> Result<bool, RepoError> {
        Ok(self.find_by_slug(slug).await?.is_some())
    }
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
