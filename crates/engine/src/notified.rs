//! Notified set: the durable record of channel ids already alerted on.
//!
//! Stored as a JSON array of id strings. The set only grows. An id is
//! recorded right after its alert is delivered and persisted immediately,
//! so a crash can cause at most a repeated alert, never a lost one.
//!
//! Loading never fails: a missing file is the first-run state, and an
//! unreadable or corrupt file is treated the same way (logged at warn).

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sentinel_common::error::AppError;

/// In-memory set of alerted channel ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifiedSet {
    ids: BTreeSet<String>,
}

impl NotifiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Insert an id. Returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for NotifiedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// File-backed storage for the notified set.
#[derive(Debug, Clone)]
pub struct NotifiedStore {
    path: PathBuf,
}

impl NotifiedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the set from disk. Any read or parse failure yields an empty set.
    pub async fn load(&self) -> NotifiedSet {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No notified-channel file yet");
                return NotifiedSet::new();
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read notified-channel file, starting from empty set"
                );
                return NotifiedSet::new();
            }
        };

        match serde_json::from_slice::<Vec<String>>(&bytes) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Notified-channel file is corrupt, starting from empty set"
                );
                NotifiedSet::new()
            }
        }
    }

    /// Overwrite the file with the JSON array form of `set`.
    ///
    /// Writes a sibling temp file, then renames it over the target.
    pub async fn save(&self, set: &NotifiedSet) -> Result<(), AppError> {
        let ids: Vec<&str> = set.iter().collect();
        let json = serde_json::to_vec(&ids)?;

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), ids = ids.len(), "Saved notified set");
        Ok(())
    }

    /// Add `id` to `set` and persist immediately.
    pub async fn record(&self, set: &mut NotifiedSet, id: &str) -> Result<(), AppError> {
        if set.insert(id) {
            self.save(set).await?;
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "notified_channels.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> NotifiedStore {
        NotifiedStore::new(dir.path().join("notified_channels.json"))
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), b"{not json").await.unwrap();
        assert!(store.load().await.is_empty());

        tokio::fs::write(store.path(), br#"{"ids": ["1"]}"#).await.unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_reads_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), br#"["b","a","b"]"#).await.unwrap();

        let set = store.load().await;
        assert_eq!(set.len(), 2);
        assert!(set.contains("a"));
        assert!(set.contains("b"));
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), br#"["zeta","alpha","mid"]"#).await.unwrap();

        let loaded = store.load().await;
        store.save(&loaded).await.unwrap();
        let reloaded = store.load().await;
        assert_eq!(loaded, reloaded);

        let raw: Vec<String> =
            serde_json::from_slice(&tokio::fs::read(store.path()).await.unwrap()).unwrap();
        assert_eq!(raw, vec!["alpha", "mid", "zeta"]);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_record_persists_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut set = store.load().await;

        store.record(&mut set, "2").await.unwrap();
        assert!(set.contains("2"));
        assert!(store.load().await.contains("2"));

        // Re-recording is a no-op.
        store.record(&mut set, "2").await.unwrap();
        assert_eq!(store.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = NotifiedStore::new(dir.path().join("nope").join("seen.json"));
        let set: NotifiedSet = ["1"].into_iter().collect();
        let err = store.save(&set).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
