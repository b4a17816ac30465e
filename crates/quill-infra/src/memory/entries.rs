use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Entry;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, EntryRepository};

/// Entry store backed by a `HashMap` keyed on entry id.
///
/// Enforces slug uniqueness on save the way the `entries.slug` index does.
#[derive(Default)]
pub struct InMemoryEntryRepository {
    store: RwLock<HashMap<Uuid, Entry>>,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Entry, Uuid> for InMemoryEntryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, entry: Entry) -> Result<Entry, RepoError> {
        let mut store = self.store.write().await;

        if store
            .values()
            .any(|other| other.slug == entry.slug && other.id != entry.id)
        {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already in use",
                entry.slug
            )));
        }

        store.insert(entry.id, entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Entry>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|e| e.slug == slug).cloned())
    }

    async fn list_recent(&self, limit: Option<u64>) -> Result<Vec<Entry>, RepoError> {
        let store = self.store.read().await;
        let mut entries: Vec<Entry> = store.values().cloned().collect();
        entries.sort_by(|a, b| b.published.cmp(&a.published));

        if let Some(limit) = limit {
            entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use quill_core::domain::EntryDraft;

    fn entry(slug: &str, age_minutes: i64) -> Entry {
        let mut entry = Entry::new(
            None,
            slug.to_string(),
            EntryDraft::new(slug, "body").unwrap(),
        );
        entry.published = entry.published - TimeDelta::minutes(age_minutes);
        entry
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let repo = InMemoryEntryRepository::new();
        repo.save(entry("old", 30)).await.unwrap();
        repo.save(entry("new", 1)).await.unwrap();
        repo.save(entry("middle", 10)).await.unwrap();

        let slugs: Vec<String> = repo
            .list_recent(None)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.slug)
            .collect();
        assert_eq!(slugs, vec!["new", "middle", "old"]);

        assert_eq!(repo.list_recent(Some(2)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_upserts_by_id() {
        let repo = InMemoryEntryRepository::new();
        let mut saved = repo.save(entry("first", 0)).await.unwrap();

        saved.title = "Renamed".to_string();
        repo.save(saved.clone()).await.unwrap();

        let found = repo.find_by_slug("first").await.unwrap().unwrap();
        assert_eq!(found.title, "Renamed");
        assert_eq!(repo.list_recent(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let repo = InMemoryEntryRepository::new();
        repo.save(entry("taken", 0)).await.unwrap();

        let result = repo.save(entry("taken", 0)).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
