//! Slug generation - URL-safe, collision-free identifiers derived from titles.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::error::RepoError;
use crate::ports::EntryRepository;

/// Slug used when a title has no ASCII word characters at all.
pub const FALLBACK_SLUG: &str = "entry";

/// Appended to a slug each time it collides with another entry.
pub const COLLISION_SUFFIX: &str = "-2";

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("static regex is valid"));

/// Normalize a title into a slug without consulting the store.
///
/// The title is NFKD-decomposed, stripped of non-ASCII characters, and every
/// run of non-word characters becomes a single hyphen.
pub fn slugify(title: &str) -> String {
    let ascii: String = title.nfkd().filter(char::is_ascii).collect();
    let spaced = NON_WORD.replace_all(&ascii, " ").to_lowercase();
    let slug = spaced.split_whitespace().collect::<Vec<_>>().join("-");

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Derive a slug for `title` that no other entry uses.
///
/// `editing` is the entry the slug is for, if it already exists; its own slug
/// does not count as a collision. The probe and the later insert are not
/// atomic, so concurrent writers can still collide.
pub async fn unique_slug(
    entries: &dyn EntryRepository,
    title: &str,
    editing: Option<Uuid>,
) -> Result<String, RepoError> {
    let mut slug = slugify(title);

    loop {
        match entries.find_by_slug(&slug).await? {
            Some(existing) if Some(existing.id) != editing => slug.push_str(COLLISION_SUFFIX),
            _ => return Ok(slug),
        }
    }
}
