//! Greeting records and the pure logic around them.
//!
//! A greeting is a name plus an uploaded photo, reachable at a unique slug.
//! Storage itself is an external service; [`GreetingStore`] is the seam and
//! [`MemoryStore`] a local implementation.

use serde::{Deserialize, Serialize};

use crate::error::ConfettiError;

/// Prefix of the blob-store path photos are uploaded under.
pub const PHOTO_PREFIX: &str = "ucapan-foto";

/// Path segment the greeting pages are served under.
pub const GREETING_ROUTE: &str = "ucapan";

/// Message shown on the greeting page when no record matches the slug.
pub const NOT_FOUND_MESSAGE: &str =
    "Greeting not found. The link may be wrong or the greeting was deleted.";

/// A stored greeting, in the document store's field naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreetingRecord {
    pub name: String,
    pub slug: String,
    pub photo_url: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

/// Lowercases a trimmed name and joins its words with `-`.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Slug for a new greeting: the slugified name plus its creation time.
pub fn unique_slug(name: &str, created_at_ms: u64) -> String {
    format!("{}-{created_at_ms}", slugify(name))
}

/// Blob-store path for a greeting's photo.
pub fn photo_storage_path(slug: &str, file_name: &str) -> String {
    format!("{PHOTO_PREFIX}/{slug}-{file_name}")
}

/// Public link to a greeting page.
pub fn share_link(origin: &str, slug: &str) -> String {
    format!("{}/{GREETING_ROUTE}/{slug}", origin.trim_end_matches('/'))
}

/// What the create-greeting form submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub file_name: String,
    /// MIME type reported for the uploaded file.
    pub content_type: String,
}

impl Submission {
    /// Requires a non-blank name and an `image/*` content type.
    pub fn validate(&self) -> Result<(), ConfettiError> {
        if self.name.trim().is_empty() {
            return Err(ConfettiError::EmptyName);
        }
        if !self.content_type.starts_with("image/") {
            return Err(ConfettiError::NotAnImage(self.content_type.clone()));
        }
        Ok(())
    }

    /// Validates and turns the submission into a record.
    ///
    /// `photo_url` is whatever the blob store returned for
    /// [`photo_storage_path`].
    pub fn into_record(
        self,
        photo_url: String,
        created_at_ms: u64,
    ) -> Result<GreetingRecord, ConfettiError> {
        self.validate()?;
        Ok(GreetingRecord {
            slug: unique_slug(&self.name, created_at_ms),
            name: self.name.trim().to_string(),
            photo_url,
            created_at: created_at_ms,
        })
    }
}

/// Document-store operations the greeting pages rely on.
pub trait GreetingStore {
    /// Stores a record. A record with the same slug is replaced.
    fn insert(&mut self, record: GreetingRecord);

    fn find_by_slug(&self, slug: &str) -> Option<GreetingRecord>;

    /// All records, newest first.
    fn list_recent(&self) -> Vec<GreetingRecord>;

    /// Removes a record, returning it if it existed.
    fn delete(&mut self, slug: &str) -> Option<GreetingRecord>;
}

/// In-process [`GreetingStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<GreetingRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl GreetingStore for MemoryStore {
    fn insert(&mut self, record: GreetingRecord) {
        match self.records.iter_mut().find(|r| r.slug == record.slug) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    fn find_by_slug(&self, slug: &str) -> Option<GreetingRecord> {
        self.records.iter().find(|r| r.slug == slug).cloned()
    }

    fn list_recent(&self) -> Vec<GreetingRecord> {
        let mut out = self.records.clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    fn delete(&mut self, slug: &str) -> Option<GreetingRecord> {
        let idx = self.records.iter().position(|r| r.slug == slug)?;
        Some(self.records.remove(idx))
    }
}

/// Outcome of opening a greeting link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreetingPage {
    Found(GreetingRecord),
    /// User-facing explanation; never a hard failure.
    NotFound(&'static str),
}

/// Resolves a slug from a greeting link.
pub fn lookup<G: GreetingStore + ?Sized>(store: &G, slug: &str) -> GreetingPage {
    match store.find_by_slug(slug) {
        Some(record) => GreetingPage::Found(record),
        None => GreetingPage::NotFound(NOT_FOUND_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(slug: &str, created_at: u64) -> GreetingRecord {
        GreetingRecord {
            name: "Ayu".into(),
            slug: slug.into(),
            photo_url: format!("https://cdn.example/{slug}.jpg"),
            created_at,
        }
    }

    fn submission(name: &str, content_type: &str) -> Submission {
        Submission {
            name: name.into(),
            file_name: "cake.png".into(),
            content_type: content_type.into(),
        }
    }

    #[test]
    fn slugify_trims_lowercases_and_joins_words() {
        assert_eq!(slugify("  Budi   Santoso "), "budi-santoso");
        assert_eq!(slugify("ANA\tMaria\nLopez"), "ana-maria-lopez");
        assert_eq!(slugify("solo"), "solo");
    }

    #[test]
    fn unique_slug_appends_timestamp() {
        assert_eq!(
            unique_slug("Budi Santoso", 1_700_000_000_123),
            "budi-santoso-1700000000123"
        );
    }

    #[test]
    fn photo_path_and_share_link() {
        assert_eq!(
            photo_storage_path("ayu-1", "me.jpg"),
            "ucapan-foto/ayu-1-me.jpg"
        );
        assert_eq!(
            share_link("https://hbd.example/", "ayu-1"),
            "https://hbd.example/ucapan/ayu-1"
        );
        assert_eq!(
            share_link("http://localhost:3000", "x"),
            "http://localhost:3000/ucapan/x"
        );
    }

    #[test]
    fn submission_requires_name() {
        assert!(matches!(
            submission("   ", "image/png").validate(),
            Err(ConfettiError::EmptyName)
        ));
    }

    #[test]
    fn submission_requires_image() {
        assert!(matches!(
            submission("Ayu", "application/pdf").validate(),
            Err(ConfettiError::NotAnImage(t)) if t == "application/pdf"
        ));
        assert!(submission("Ayu", "image/jpeg").validate().is_ok());
    }

    #[test]
    fn into_record_trims_name_and_builds_slug() {
        let r = submission(" Ayu Lestari ", "image/png")
            .into_record("https://cdn.example/a.png".into(), 42)
            .unwrap();
        assert_eq!(r.name, "Ayu Lestari");
        assert_eq!(r.slug, "ayu-lestari-42");
        assert_eq!(r.created_at, 42);
    }

    #[test]
    fn record_serializes_camel_case() {
        let v = serde_json::to_value(record("a-1", 5)).unwrap();
        assert_eq!(v["photoUrl"], "https://cdn.example/a-1.jpg");
        assert_eq!(v["createdAt"], 5);
    }

    #[test]
    fn store_insert_is_last_write_wins() {
        let mut store = MemoryStore::new();
        store.insert(record("a-1", 1));
        let mut newer = record("a-1", 1);
        newer.name = "Ayu L".into();
        store.insert(newer.clone());
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_slug("a-1"), Some(newer));
    }

    #[test]
    fn list_recent_is_newest_first() {
        let mut store = MemoryStore::new();
        store.insert(record("a", 10));
        store.insert(record("b", 30));
        store.insert(record("c", 20));
        let slugs: Vec<String> = store.list_recent().into_iter().map(|r| r.slug).collect();
        assert_eq!(slugs, vec!["b", "c", "a"]);
    }

    #[test]
    fn delete_removes_and_returns() {
        let mut store = MemoryStore::new();
        store.insert(record("a", 1));
        assert_eq!(store.delete("a").map(|r| r.slug), Some("a".to_string()));
        assert!(store.delete("a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn lookup_missing_slug_is_a_message_not_an_error() {
        let mut store = MemoryStore::new();
        assert_eq!(
            lookup(&store, "ghost"),
            GreetingPage::NotFound(NOT_FOUND_MESSAGE)
        );
        store.insert(record("ayu-1", 1));
        assert_eq!(
            lookup(&store, "ayu-1"),
            GreetingPage::Found(record("ayu-1", 1))
        );
    }
}
