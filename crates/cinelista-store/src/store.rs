use crate::backend::{FileStorage, StorageBackend};
use crate::error::{StorageError, StoreError};
use chrono::{DateTime, Utc};
use cinelista_models::{ContentKind, ContentReference, ContentSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// The two independent saved lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    WatchLater,
    Favorites,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::WatchLater, Collection::Favorites];

    /// Fixed storage key. `myList` predates favorites and is kept for existing data.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Collection::WatchLater => "myList",
            Collection::Favorites => "favorites",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::WatchLater => "Watch later",
            Collection::Favorites => "Favorites",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::WatchLater => write!(f, "watch-later"),
            Collection::Favorites => write!(f, "favorites"),
        }
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "watch-later" | "watch_later" | "mylist" | "my-list" => Ok(Collection::WatchLater),
            "favorites" | "favourites" | "favs" => Ok(Collection::Favorites),
            _ => Err(format!("Invalid collection: {}. Use 'watch-later' or 'favorites'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// `(id, kind)` was already saved; the existing entry is untouched
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
}

/// Badge state of one title across both collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Membership {
    pub watch_later: bool,
    pub favorite: bool,
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Saved-content store over a persistent key-value substrate.
///
/// Construct one per session and hand it to whatever needs it. Reads are
/// best-effort: `list` and `contains` never fail and treat missing or corrupt
/// data as an empty collection. Mutations rewrite the stored array with only
/// the affected entry changed, and report write failures.
pub struct SavedContentStore<B: StorageBackend> {
    backend: B,
    clock: Box<dyn Clock>,
}

impl SavedContentStore<FileStorage> {
    /// File-backed store keeping one JSON file per collection in `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStorage::new(dir))
    }
}

impl<B: StorageBackend> SavedContentStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_clock(backend, Box::new(SystemClock))
    }

    pub fn with_clock(backend: B, clock: Box<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Full collection in insertion order. Unreadable storage yields an empty list.
    pub fn list(&self, collection: Collection) -> Vec<ContentReference> {
        match self.backend.read(collection.storage_key()) {
            Ok(Some(raw)) => decode_collection(collection, &raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read {} collection, treating it as empty: {}", collection, e);
                Vec::new()
            }
        }
    }

    pub fn contains(&self, collection: Collection, id: u64, kind: ContentKind) -> bool {
        self.list(collection).iter().any(|r| r.matches(id, kind))
    }

    /// Save `snapshot` with the current time, unless `(id, kind)` is already in the collection
    pub fn add(&self, collection: Collection, snapshot: ContentSnapshot) -> Result<AddOutcome, StoreError> {
        let mut entries = self.load_for_update(collection)?;
        let (id, kind) = (snapshot.id(), snapshot.kind());

        if entries.iter().any(|entry| entry_key(entry) == Some((id, kind))) {
            debug!("{} {} already in {}, leaving it in place", kind, id, collection);
            return Ok(AddOutcome::AlreadyPresent);
        }

        let reference = ContentReference::new(&snapshot, self.clock.now())?;
        entries.push(serde_json::to_value(reference)?);
        self.persist(collection, &entries)?;

        info!("Added {} {} to {} ({} entries)", kind, id, collection, entries.len());
        Ok(AddOutcome::Added)
    }

    pub fn remove(&self, collection: Collection, id: u64, kind: ContentKind) -> Result<RemoveOutcome, StoreError> {
        let mut entries = self.load_for_update(collection)?;
        let before = entries.len();
        entries.retain(|entry| entry_key(entry) != Some((id, kind)));

        if entries.len() == before {
            debug!("{} {} not in {}, nothing to remove", kind, id, collection);
            return Ok(RemoveOutcome::NotPresent);
        }

        self.persist(collection, &entries)?;

        info!("Removed {} {} from {} ({} entries)", kind, id, collection, entries.len());
        Ok(RemoveOutcome::Removed)
    }

    /// Remove the title when saved, save it otherwise. Returns whether it is saved afterwards.
    pub fn toggle(&self, collection: Collection, snapshot: ContentSnapshot) -> Result<bool, StoreError> {
        if self.contains(collection, snapshot.id(), snapshot.kind()) {
            self.remove(collection, snapshot.id(), snapshot.kind())?;
            Ok(false)
        } else {
            self.add(collection, snapshot)?;
            Ok(true)
        }
    }

    pub fn membership(&self, id: u64, kind: ContentKind) -> Membership {
        Membership {
            watch_later: self.contains(Collection::WatchLater, id, kind),
            favorite: self.contains(Collection::Favorites, id, kind),
        }
    }

    pub fn add_to_watch_later(&self, snapshot: ContentSnapshot) -> Result<AddOutcome, StoreError> {
        self.add(Collection::WatchLater, snapshot)
    }

    pub fn remove_from_watch_later(&self, id: u64, kind: ContentKind) -> Result<RemoveOutcome, StoreError> {
        self.remove(Collection::WatchLater, id, kind)
    }

    pub fn is_in_watch_later(&self, id: u64, kind: ContentKind) -> bool {
        self.contains(Collection::WatchLater, id, kind)
    }

    pub fn watch_later(&self) -> Vec<ContentReference> {
        self.list(Collection::WatchLater)
    }

    pub fn add_to_favorites(&self, snapshot: ContentSnapshot) -> Result<AddOutcome, StoreError> {
        self.add(Collection::Favorites, snapshot)
    }

    pub fn remove_from_favorites(&self, id: u64, kind: ContentKind) -> Result<RemoveOutcome, StoreError> {
        self.remove(Collection::Favorites, id, kind)
    }

    pub fn is_in_favorites(&self, id: u64, kind: ContentKind) -> bool {
        self.contains(Collection::Favorites, id, kind)
    }

    pub fn favorites(&self) -> Vec<ContentReference> {
        self.list(Collection::Favorites)
    }

    /// Stored entries ahead of a mutation, as raw values. Every element of a
    /// stored array is carried over untouched, including ones `list` skips. A
    /// value that is not an array is discarded, but an unreachable substrate
    /// aborts the mutation so a transient read error cannot clobber the stored list.
    fn load_for_update(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        let raw = match self.backend.read(collection.storage_key())? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("Saved {} data is corrupt, replacing it: {}", collection, e);
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, collection: Collection, entries: &[Value]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(entries)?;
        self.backend.write(collection.storage_key(), &encoded)?;
        Ok(())
    }
}

/// `(id, kind)` of a stored entry that `list` would show. Entries it skips never match.
fn entry_key(entry: &Value) -> Option<(u64, ContentKind)> {
    ContentReference::deserialize(entry)
        .ok()
        .map(|reference| (reference.id, reference.kind))
}

/// Decode a stored collection, keeping every well-formed entry.
///
/// A value that is not a JSON array is discarded as a whole. Entries without a
/// readable `id`, `type` or `addedAt` and repeated `(id, kind)` keys are skipped;
/// the first occurrence wins. Snapshots are not decoded here.
fn decode_collection(collection: Collection, raw: &str) -> Vec<ContentReference> {
    let values: Vec<Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("Saved {} data is corrupt, treating it as empty: {}", collection, e);
            return Vec::new();
        }
    };

    let mut entries: Vec<ContentReference> = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<ContentReference>(value) {
            Ok(reference) => {
                if entries.iter().any(|r| r.matches(reference.id, reference.kind)) {
                    warn!("Skipping duplicate {} {} in {}", reference.kind, reference.id, collection);
                    continue;
                }
                entries.push(reference);
            }
            Err(e) => warn!("Skipping malformed entry in {}: {}", collection, e),
        }
    }
    entries
}
