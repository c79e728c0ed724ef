use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Longest file stem written as-is; longer keys are shortened and suffixed with a hash
const MAX_FILE_STEM: usize = 180;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    key: String,
    /// Epoch seconds
    stored_at: i64,
    body: serde_json::Value,
}

/// Catalog responses memoised on disk for a bounded window.
///
/// One JSON file per request key. Expired, unreadable and corrupt entries are
/// all treated as misses; the caller then goes to the catalog and stores the
/// fresh body.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl_seconds: i64,
    enabled: bool,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, ttl_seconds: u64) -> Self {
        Self {
            dir: dir.into(),
            ttl_seconds: i64::try_from(ttl_seconds).unwrap_or(i64::MAX),
            enabled: true,
        }
    }

    /// Every lookup misses and nothing is written
    pub fn disabled(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl_seconds: 0,
            enabled: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_at(key, Utc::now())
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.put_at(key, value, Utc::now())
    }

    fn get_at<T: DeserializeOwned>(&self, key: &str, now: DateTime<Utc>) -> Option<T> {
        if !self.enabled {
            return None;
        }

        let path = self.entry_path(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                debug!("Response cache miss: {}", key);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Corrupt response cache entry for {}: {}. Deleting it.", key, e);
                if let Err(rm_err) = std::fs::remove_file(&path) {
                    warn!("Failed to delete corrupt cache entry: {}", rm_err);
                }
                return None;
            }
        };

        if entry.key != key {
            debug!("Response cache entry at {} belongs to {}", path.display(), entry.key);
            return None;
        }

        let age = now.timestamp().saturating_sub(entry.stored_at);
        if age >= self.ttl_seconds {
            debug!("Response cache entry for {} expired ({}s old)", key, age);
            return None;
        }

        match serde_json::from_value(entry.body) {
            Ok(value) => {
                debug!("Response cache hit: {} ({}s old)", key, age);
                Some(value)
            }
            Err(e) => {
                warn!("Cached body for {} no longer matches its type: {}", key, e);
                None
            }
        }
    }

    fn put_at<T: Serialize>(&self, key: &str, value: &T, now: DateTime<Utc>) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        std::fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry {
            key: key.to_string(),
            stored_at: now.timestamp(),
            body: serde_json::to_value(value)?,
        };
        std::fs::write(self.entry_path(key), serde_json::to_string(&entry)?)?;
        debug!("Response cached: {}", key);
        Ok(())
    }

    /// Delete every entry. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Percent-encoded key, so distinct keys never share a file
    fn entry_path(&self, key: &str) -> PathBuf {
        let encoded = urlencoding::encode(key);
        if encoded.len() <= MAX_FILE_STEM {
            return self.dir.join(format!("{}.json", encoded));
        }

        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        self.dir.join(format!("{}-{:016x}.json", &encoded[..MAX_FILE_STEM - 17], hasher.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_fresh_entry_is_a_hit() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path(), 300);

        cache.put("es-MX/movie/550", &vec![1u64, 2, 3]).unwrap();

        let hit: Option<Vec<u64>> = cache.get("es-MX/movie/550");
        assert_eq!(hit, Some(vec![1, 2, 3]));
        assert!(dir.path().join("es-MX%2Fmovie%2F550.json").exists());
    }

    #[test]
    fn test_similar_keys_do_not_share_entries() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path(), 300);

        cache.put("es-MX/search/amélie/1", &"results for amélie").unwrap();

        assert_eq!(cache.get::<String>("es-MX/search/amálie/1"), None);
        assert_eq!(cache.get::<String>("es-MX/search/am lie/1"), None);
        assert_eq!(cache.get::<String>("es-MX/search/am_lie/1"), None);
        assert_eq!(cache.get::<String>("es-MX/search/東京/1"), None);
        assert_eq!(
            cache.get::<String>("es-MX/search/amélie/1"),
            Some("results for amélie".to_string())
        );
    }

    #[test]
    fn test_long_keys_are_checked_on_read() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path(), 300);
        let query = "東京".repeat(40);
        let key = format!("es-MX/search/{}/1", query);

        cache.put(&key, &7u32).unwrap();
        assert_eq!(cache.get::<u32>(&key), Some(7));
        assert_eq!(cache.get::<u32>(&format!("es-MX/search/{}/2", query)), None);

        let name = cache.entry_path(&key);
        let name = name.file_name().unwrap().to_str().unwrap();
        assert!(name.len() <= MAX_FILE_STEM + ".json".len());
    }

    #[test]
    fn test_entry_older_than_ttl_misses() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path(), 300);
        let now = Utc::now();

        cache.put_at("trending", &"old", now - Duration::seconds(301)).unwrap();
        assert_eq!(cache.get_at::<String>("trending", now), None);

        cache.put_at("trending", &"recent", now - Duration::seconds(299)).unwrap();
        assert_eq!(cache.get_at::<String>("trending", now), Some("recent".to_string()));
    }

    #[test]
    fn test_corrupt_entry_misses_and_is_removed() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path(), 300);
        let path = dir.path().join("genres.json");
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(cache.get::<Vec<u64>>("genres"), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_disabled_cache_never_stores() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::disabled(dir.path());

        cache.put("popular", &42u32).unwrap();
        assert_eq!(cache.get::<u32>("popular"), None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_clear_removes_entries() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().join("responses"), 300);
        assert_eq!(cache.clear().unwrap(), 0);

        cache.put("a", &1u32).unwrap();
        cache.put("b", &2u32).unwrap();

        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.get::<u32>("a"), None);
    }
}
