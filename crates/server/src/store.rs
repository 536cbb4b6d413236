//! Persistence backends.
//!
//! Two independent stores are written after every successful summarization:
//! the summaries store keeps the short record that clients look up by id, the
//! archive keeps the full source text. Either may be missing or failing
//! without affecting the computed result.

use std::borrow::Borrow;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tersa_core::SummaryRecord;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::StorageError;

/// A summary row as clients see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSummary {
    pub id: Uuid,
    pub url: Option<String>,
    pub title: Option<String>,
    pub summary: String,
    pub translation: Option<String>,
    pub word_count: i64,
    pub key_topics: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl StoredSummary {
    pub fn from_record(id: Uuid, created_at: OffsetDateTime, record: &SummaryRecord) -> Self {
        Self {
            id,
            url: record.source_url.clone(),
            title: record.title.clone(),
            summary: record.summary.clone(),
            translation: record.translation.clone(),
            word_count: record.word_count as i64,
            key_topics: record.key_topics.clone(),
            created_at,
        }
    }
}

/// Full source text kept alongside a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedSource {
    /// [`archive_key`] of the source.
    pub key: String,
    /// Summary most recently produced from this source.
    pub summary_id: Uuid,
    pub url: Option<String>,
    pub title: Option<String>,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub archived_at: OffsetDateTime,
}

impl ArchivedSource {
    pub fn from_record(summary_id: Uuid, archived_at: OffsetDateTime, record: &SummaryRecord) -> Self {
        Self {
            key: archive_key(record.source_url.as_deref(), &record.source_text),
            summary_id,
            url: record.source_url.clone(),
            title: record.title.clone(),
            text: record.source_text.clone(),
            archived_at,
        }
    }
}

/// Hex SHA-256 of the URL, or of the text when there is no URL.
///
/// The same URL always maps to the same key, so re-archiving a page replaces
/// the previous copy.
pub fn archive_key(url: Option<&str>, text: &str) -> String {
    let digest = Sha256::digest(url.unwrap_or(text).as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    async fn insert(&self, summary: &StoredSummary) -> Result<(), StorageError>;

    async fn get(&self, id: Uuid) -> Result<Option<StoredSummary>, StorageError>;
}

#[async_trait]
pub trait ArchiveStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// Inserts or replaces the entry with the same key.
    async fn archive(&self, source: &ArchivedSource) -> Result<(), StorageError>;

    async fn load(&self, key: &str) -> Result<Option<ArchivedSource>, StorageError>;
}

/// Entries each [`MemoryStore`] map holds unless configured otherwise.
pub const DEFAULT_MEMORY_CAPACITY: usize = 1000;

/// Map that forgets its oldest keys once it grows past a capacity.
#[derive(Debug)]
struct Bounded<K, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V> Bounded<K, V> {
    fn new() -> Self {
        Self { entries: HashMap::new(), order: VecDeque::new() }
    }

    /// Replacing a key keeps its original age.
    fn insert(&mut self, key: K, value: V, capacity: usize) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }
        while self.entries.len() > capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// In-process store for both summaries and archived sources.
///
/// Each map keeps at most `capacity` entries and evicts the oldest first.
#[derive(Debug)]
pub struct MemoryStore {
    capacity: usize,
    summaries: RwLock<Bounded<Uuid, StoredSummary>>,
    archive: RwLock<Bounded<String, ArchivedSource>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            summaries: RwLock::new(Bounded::new()),
            archive: RwLock::new(Bounded::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn summary_count(&self) -> usize {
        self.summaries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn archive_count(&self) -> usize {
        self.archive.read().map(|m| m.len()).unwrap_or(0)
    }
}

fn poisoned() -> StorageError {
    StorageError::Io(std::io::Error::other("memory store lock poisoned"))
}

#[async_trait]
impl SummaryStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, summary: &StoredSummary) -> Result<(), StorageError> {
        let mut map = self.summaries.write().map_err(|_| poisoned())?;
        map.insert(summary.id, summary.clone(), self.capacity);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredSummary>, StorageError> {
        let map = self.summaries.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }
}

#[async_trait]
impl ArchiveStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn archive(&self, source: &ArchivedSource) -> Result<(), StorageError> {
        let mut map = self.archive.write().map_err(|_| poisoned())?;
        map.insert(source.key.clone(), source.clone(), self.capacity);
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<ArchivedSource>, StorageError> {
        let map = self.archive.read().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }
}

/// One JSON file per archived source, named `<key>.json`.
#[derive(Debug, Clone)]
pub struct FsArchiveStore {
    dir: PathBuf,
}

impl FsArchiveStore {
    /// Uses `dir`, creating it if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl ArchiveStore for FsArchiveStore {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    async fn archive(&self, source: &ArchivedSource) -> Result<(), StorageError> {
        let path = self.path_for(&source.key);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(source)?;

        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<ArchivedSource>, StorageError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(url: Option<&str>, text: &str) -> SummaryRecord {
        SummaryRecord {
            source_text: text.to_string(),
            title: Some("Title".to_string()),
            source_url: url.map(str::to_string),
            summary: "Summary.".to_string(),
            translation: Some("خلاصہ۔".to_string()),
            translator: Some("lexicon".to_string()),
            key_topics: vec!["summary".to_string()],
            word_count: 2,
            summary_word_count: 1,
            sentence_count: 0,
        }
    }

    #[test]
    fn test_archive_key() {
        let by_url = archive_key(Some("https://example.com"), "text one");
        assert_eq!(by_url, archive_key(Some("https://example.com"), "text two"));
        assert_eq!(by_url.len(), 64);
        assert_ne!(archive_key(None, "text one"), archive_key(None, "text two"));
        assert_eq!(
            archive_key(None, ""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[tokio::test]
    async fn test_memory_summary_round_trip() {
        let store = MemoryStore::new();
        let summary = StoredSummary::from_record(Uuid::new_v4(), OffsetDateTime::now_utc(), &record(None, "Body."));

        store.insert(&summary).await.unwrap();
        assert_eq!(store.get(summary.id).await.unwrap(), Some(summary));
        assert_eq!(store.get(Uuid::new_v4()).await.unwrap(), None);
        assert_eq!(store.summary_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_archive_upserts_by_url() {
        let store = MemoryStore::new();
        let now = OffsetDateTime::now_utc();
        let first = ArchivedSource::from_record(Uuid::new_v4(), now, &record(Some("https://a.test"), "old"));
        let second = ArchivedSource::from_record(Uuid::new_v4(), now, &record(Some("https://a.test"), "new"));

        store.archive(&first).await.unwrap();
        store.archive(&second).await.unwrap();

        assert_eq!(store.archive_count(), 1);
        assert_eq!(store.load(&first.key).await.unwrap().unwrap().text, "new");
    }

    #[tokio::test]
    async fn test_memory_store_evicts_oldest_past_capacity() {
        let store = MemoryStore::with_capacity(2);
        let now = OffsetDateTime::now_utc();
        let summaries: Vec<_> = ["one", "two", "three"]
            .iter()
            .map(|text| StoredSummary::from_record(Uuid::new_v4(), now, &record(None, text)))
            .collect();

        for summary in &summaries {
            store.insert(summary).await.unwrap();
        }

        assert_eq!(store.summary_count(), 2);
        assert_eq!(store.get(summaries[0].id).await.unwrap(), None);
        assert!(store.get(summaries[2].id).await.unwrap().is_some());

        for text in ["one", "two", "three"] {
            let source = ArchivedSource::from_record(Uuid::new_v4(), now, &record(None, text));
            store.archive(&source).await.unwrap();
        }

        assert_eq!(store.archive_count(), 2);
        assert!(store.load(&archive_key(None, "one")).await.unwrap().is_none());
        assert!(store.load(&archive_key(None, "three")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_memory_upsert_does_not_evict() {
        let store = MemoryStore::with_capacity(1);
        let now = OffsetDateTime::now_utc();
        for _ in 0..3 {
            let source = ArchivedSource::from_record(Uuid::new_v4(), now, &record(Some("https://c.test"), "same"));
            store.archive(&source).await.unwrap();
        }
        assert_eq!(store.archive_count(), 1);
        assert_eq!(MemoryStore::with_capacity(0).capacity(), 1);
    }

    #[tokio::test]
    async fn test_fs_archive_round_trip_and_overwrite() {
        let tmp = TempDir::new().unwrap();
        let store = FsArchiveStore::open(tmp.path().join("archive")).await.unwrap();
        let now = OffsetDateTime::now_utc();

        let first = ArchivedSource::from_record(Uuid::new_v4(), now, &record(Some("https://b.test"), "v1"));
        store.archive(&first).await.unwrap();
        let second = ArchivedSource::from_record(Uuid::new_v4(), now, &record(Some("https://b.test"), "v2"));
        store.archive(&second).await.unwrap();

        let loaded = store.load(&first.key).await.unwrap().unwrap();
        assert_eq!(loaded.text, "v2");
        assert_eq!(loaded.summary_id, second.summary_id);

        let files: Vec<_> = std::fs::read_dir(store.dir()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_fs_archive_missing_key() {
        let tmp = TempDir::new().unwrap();
        let store = FsArchiveStore::open(tmp.path()).await.unwrap();
        assert!(store.load("0000").await.unwrap().is_none());
    }
}
