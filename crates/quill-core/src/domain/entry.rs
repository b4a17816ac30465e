use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Entry entity - a single blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    /// Email of the user who created the entry.
    pub author: Option<String>,
    pub title: String,
    /// URL-safe identifier, fixed at creation.
    pub slug: String,
    pub body_source: String,
    /// Rendered body. Stored verbatim from `body_source`.
    pub html: String,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Validated title and body submitted through the compose form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub body_source: String,
}

impl EntryDraft {
    /// Build a draft, rejecting blank fields.
    pub fn new(title: impl Into<String>, body_source: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        let body_source = body_source.into();

        if title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if body_source.trim().is_empty() {
            return Err(DomainError::Validation(
                "body_source must not be empty".to_string(),
            ));
        }

        Ok(Self { title, body_source })
    }
}

impl Entry {
    /// Create a new entry under an already-reserved slug.
    pub fn new(author: Option<String>, slug: String, draft: EntryDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author,
            title: draft.title,
            slug,
            html: draft.body_source.clone(),
            body_source: draft.body_source,
            published: now,
            updated: now,
        }
    }

    /// Apply an edit. The slug and publication time are left alone.
    pub fn revise(&mut self, draft: EntryDraft) {
        self.revise_at(draft, Utc::now());
    }

    pub fn revise_at(&mut self, draft: EntryDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.html = draft.body_source.clone();
        self.body_source = draft.body_source;
        self.updated = now;
    }

    /// Path of the entry's permalink.
    pub fn permalink(&self) -> String {
        format!("/entry/{}", self.slug)
    }
}
