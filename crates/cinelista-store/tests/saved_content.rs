use chrono::{DateTime, Duration, TimeZone, Utc};
use cinelista_models::{ContentKind, ContentSnapshot, Movie, TvShow};
use cinelista_store::{
    AddOutcome, Clock, Collection, FileStorage, MemoryStorage, Membership, RemoveOutcome,
    SavedContentStore, StoreError,
};
use std::sync::Mutex;
use tempfile::TempDir;

/// Clock that advances one second per call so insertion times are distinct
struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    fn starting_at(start: DateTime<Utc>) -> Self {
        Self { next: Mutex::new(start) }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn store(storage: &MemoryStorage) -> SavedContentStore<&MemoryStorage> {
    SavedContentStore::with_clock(storage, Box::new(SteppingClock::starting_at(start_time())))
}

fn movie(id: u64, title: &str) -> ContentSnapshot {
    ContentSnapshot::Movie(Movie {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/poster-{}.jpg", id)),
        backdrop_path: None,
        overview: String::new(),
        release_date: "1999-10-15".to_string(),
        vote_average: 8.4,
        genre_ids: vec![18],
    })
}

fn series(id: u64, name: &str) -> ContentSnapshot {
    ContentSnapshot::Series(TvShow {
        id,
        name: name.to_string(),
        poster_path: None,
        backdrop_path: None,
        overview: String::new(),
        first_air_date: "2008-01-20".to_string(),
        vote_average: 8.9,
        genre_ids: vec![],
    })
}

fn keys(store: &SavedContentStore<&MemoryStorage>, collection: Collection) -> Vec<(u64, ContentKind)> {
    store.list(collection).iter().map(|r| (r.id, r.kind)).collect()
}

#[test]
fn test_watch_later_scenario() {
    let storage = MemoryStorage::new();
    let store = store(&storage);

    assert!(store.watch_later().is_empty());

    assert_eq!(store.add_to_watch_later(movie(550, "Fight Club")).unwrap(), AddOutcome::Added);
    assert!(store.is_in_watch_later(550, ContentKind::Movie));

    assert_eq!(
        store.add_to_watch_later(movie(550, "Fight Club")).unwrap(),
        AddOutcome::AlreadyPresent
    );
    assert_eq!(store.watch_later().len(), 1);

    assert_eq!(
        store.remove_from_watch_later(550, ContentKind::Movie).unwrap(),
        RemoveOutcome::Removed
    );
    assert!(!store.is_in_watch_later(550, ContentKind::Movie));
    assert!(store.watch_later().is_empty());
}

#[test]
fn test_duplicate_add_keeps_original_entry() {
    let storage = MemoryStorage::new();
    let store = store(&storage);

    store.add(Collection::WatchLater, movie(550, "Fight Club")).unwrap();
    store.add(Collection::WatchLater, movie(13, "Forrest Gump")).unwrap();
    let before = store.list(Collection::WatchLater);

    // A re-add with a different snapshot must not overwrite, reorder or re-stamp
    store.add(Collection::WatchLater, movie(550, "Fight Club (renamed)")).unwrap();
    let after = store.list(Collection::WatchLater);

    assert_eq!(before, after);
    assert_eq!(after[0].title(), Some("Fight Club"));
    assert_eq!(after[0].saved_at, start_time());
}

#[test]
fn test_remove_absent_entry_is_a_no_op() {
    let storage = MemoryStorage::new();
    let store = store(&storage);
    store.add(Collection::Favorites, movie(550, "Fight Club")).unwrap();
    let raw_before = storage.raw("favorites");

    assert_eq!(
        store.remove(Collection::Favorites, 680, ContentKind::Movie).unwrap(),
        RemoveOutcome::NotPresent
    );
    assert_eq!(
        store.remove(Collection::Favorites, 550, ContentKind::Series).unwrap(),
        RemoveOutcome::NotPresent
    );
    assert_eq!(storage.raw("favorites"), raw_before);

    // Removing from a collection that was never written succeeds too
    assert_eq!(
        store.remove(Collection::WatchLater, 550, ContentKind::Movie).unwrap(),
        RemoveOutcome::NotPresent
    );
}

#[test]
fn test_list_keeps_insertion_order_across_adds_and_removes() {
    let storage = MemoryStorage::new();
    let store = store(&storage);

    store.add(Collection::WatchLater, movie(1, "A")).unwrap();
    store.add(Collection::WatchLater, series(2, "B")).unwrap();
    store.add(Collection::WatchLater, movie(3, "C")).unwrap();
    store.remove(Collection::WatchLater, 2, ContentKind::Series).unwrap();
    store.add(Collection::WatchLater, movie(4, "D")).unwrap();
    store.add(Collection::WatchLater, series(2, "B")).unwrap();
    store.add(Collection::WatchLater, movie(1, "A")).unwrap();

    assert_eq!(
        keys(&store, Collection::WatchLater),
        vec![
            (1, ContentKind::Movie),
            (3, ContentKind::Movie),
            (4, ContentKind::Movie),
            (2, ContentKind::Series),
        ]
    );

    let saved_at: Vec<_> = store.list(Collection::WatchLater).iter().map(|r| r.saved_at).collect();
    let mut sorted = saved_at.clone();
    sorted.sort();
    assert_eq!(saved_at, sorted);
}

#[test]
fn test_movie_and_series_with_same_id_coexist() {
    let storage = MemoryStorage::new();
    let store = store(&storage);

    store.add(Collection::WatchLater, movie(5, "Four Rooms")).unwrap();
    store.add(Collection::WatchLater, series(5, "Some Show")).unwrap();

    assert_eq!(
        keys(&store, Collection::WatchLater),
        vec![(5, ContentKind::Movie), (5, ContentKind::Series)]
    );

    store.remove(Collection::WatchLater, 5, ContentKind::Movie).unwrap();
    assert!(!store.contains(Collection::WatchLater, 5, ContentKind::Movie));
    assert!(store.contains(Collection::WatchLater, 5, ContentKind::Series));
}

#[test]
fn test_collections_are_isolated() {
    let storage = MemoryStorage::new();
    let store = store(&storage);

    store.add(Collection::WatchLater, movie(550, "Fight Club")).unwrap();
    store.add(Collection::Favorites, movie(550, "Fight Club")).unwrap();
    store.add(Collection::Favorites, series(1396, "Breaking Bad")).unwrap();

    assert_eq!(keys(&store, Collection::WatchLater), vec![(550, ContentKind::Movie)]);

    store.remove(Collection::Favorites, 550, ContentKind::Movie).unwrap();
    assert!(store.is_in_watch_later(550, ContentKind::Movie));
    assert!(!store.is_in_favorites(550, ContentKind::Movie));
    assert_eq!(store.favorites().len(), 1);
}

#[test]
fn test_corrupt_data_reads_as_empty() {
    let storage = MemoryStorage::new();
    storage.insert_raw("myList", "{not json");
    storage.insert_raw("favorites", r#"{"id": 550}"#);
    let store = store(&storage);

    assert!(store.list(Collection::WatchLater).is_empty());
    assert!(!store.contains(Collection::WatchLater, 550, ContentKind::Movie));
    assert!(store.list(Collection::Favorites).is_empty());
    assert!(!store.contains(Collection::Favorites, 550, ContentKind::Movie));
}

#[test]
fn test_unreadable_storage_reads_as_empty() {
    let storage = MemoryStorage::new();
    let store = store(&storage);
    store.add(Collection::WatchLater, movie(550, "Fight Club")).unwrap();

    storage.set_fail_reads(true);
    assert!(store.list(Collection::WatchLater).is_empty());
    assert!(!store.contains(Collection::WatchLater, 550, ContentKind::Movie));

    // A mutation must not overwrite data it could not read
    assert!(matches!(
        store.add(Collection::WatchLater, movie(13, "Forrest Gump")),
        Err(StoreError::Storage(_))
    ));

    storage.set_fail_reads(false);
    assert_eq!(keys(&store, Collection::WatchLater), vec![(550, ContentKind::Movie)]);
}

#[test]
fn test_malformed_entries_are_skipped() {
    let storage = MemoryStorage::new();
    storage.insert_raw(
        "myList",
        r#"[
            {"id": 550, "type": "movie", "data": {"id": 550, "title": "Fight Club"}, "addedAt": 1700000000000},
            {"id": 9, "type": "podcast", "data": {}, "addedAt": 1700000000001},
            {"id": 550, "type": "movie", "data": {"id": 550, "title": "Duplicate"}, "addedAt": 1700000000002},
            {"id": 1396, "type": "tv", "data": {"id": 1396, "name": "Breaking Bad"}, "addedAt": 1700000000003}
        ]"#,
    );
    let store = store(&storage);

    let entries = store.list(Collection::WatchLater);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title(), Some("Fight Club"));
    assert_eq!(entries[1].kind, ContentKind::Series);
}

#[test]
fn test_mutations_leave_other_entries_untouched() {
    let storage = MemoryStorage::new();
    storage.insert_raw(
        "myList",
        r#"[
            {"id": 1, "type": "movie", "data": {"id": 1, "title": "A", "overview": null}, "addedAt": 1700000000000},
            {"id": 2, "type": "movie", "data": {"id": 2, "title": "B", "runtime": 139, "genres": [{"id": 18, "name": "Drama"}], "tagline": "Mischief."}, "addedAt": 1700000000001},
            {"id": 9, "type": "podcast", "data": {}, "addedAt": 1700000000002}
        ]"#,
    );
    let seeded: Vec<serde_json::Value> = serde_json::from_str(&storage.raw("myList").unwrap()).unwrap();
    let store = store(&storage);

    assert_eq!(
        keys(&store, Collection::WatchLater),
        vec![(1, ContentKind::Movie), (2, ContentKind::Movie)]
    );
    assert_eq!(store.list(Collection::WatchLater)[1].data, seeded[1]["data"]);

    store.add(Collection::WatchLater, movie(3, "C")).unwrap();
    let after: Vec<serde_json::Value> = serde_json::from_str(&storage.raw("myList").unwrap()).unwrap();
    assert_eq!(after.len(), 4);
    assert_eq!(&after[..3], &seeded[..]);
    assert_eq!(after[3]["id"], 3);

    store.remove(Collection::WatchLater, 1, ContentKind::Movie).unwrap();
    let after: Vec<serde_json::Value> = serde_json::from_str(&storage.raw("myList").unwrap()).unwrap();
    assert_eq!(&after[..2], &seeded[1..]);
    assert_eq!(
        keys(&store, Collection::WatchLater),
        vec![(2, ContentKind::Movie), (3, ContentKind::Movie)]
    );
}

#[test]
fn test_add_over_corrupt_data_starts_fresh() {
    let storage = MemoryStorage::new();
    storage.insert_raw("myList", "garbage");
    let store = store(&storage);

    store.add(Collection::WatchLater, movie(550, "Fight Club")).unwrap();
    assert_eq!(keys(&store, Collection::WatchLater), vec![(550, ContentKind::Movie)]);
}

#[test]
fn test_write_failure_is_reported_and_state_unchanged() {
    let storage = MemoryStorage::new();
    let store = store(&storage);
    store.add(Collection::Favorites, movie(550, "Fight Club")).unwrap();
    let raw_before = storage.raw("favorites");

    storage.set_fail_writes(true);
    let err = store.add(Collection::Favorites, movie(13, "Forrest Gump")).unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    assert!(store.remove(Collection::Favorites, 550, ContentKind::Movie).is_err());

    // Duplicate adds and absent removes never touch storage, so they still succeed
    assert_eq!(
        store.add(Collection::Favorites, movie(550, "Fight Club")).unwrap(),
        AddOutcome::AlreadyPresent
    );

    assert_eq!(storage.raw("favorites"), raw_before);
    assert_eq!(keys(&store, Collection::Favorites), vec![(550, ContentKind::Movie)]);
}

#[test]
fn test_toggle_and_membership() {
    let storage = MemoryStorage::new();
    let store = store(&storage);

    assert!(store.toggle(Collection::Favorites, series(1396, "Breaking Bad")).unwrap());
    let membership = store.membership(1396, ContentKind::Series);
    assert!(membership.favorite);
    assert!(!membership.watch_later);

    assert!(!store.toggle(Collection::Favorites, series(1396, "Breaking Bad")).unwrap());
    assert_eq!(store.membership(1396, ContentKind::Series), Membership::default());
}

#[test]
fn test_persisted_layout_uses_fixed_keys() {
    let storage = MemoryStorage::new();
    let store = store(&storage);
    store.add(Collection::WatchLater, movie(550, "Fight Club")).unwrap();
    store.add(Collection::Favorites, series(1396, "Breaking Bad")).unwrap();

    let my_list: serde_json::Value = serde_json::from_str(&storage.raw("myList").unwrap()).unwrap();
    assert_eq!(my_list[0]["id"], 550);
    assert_eq!(my_list[0]["type"], "movie");
    assert_eq!(my_list[0]["addedAt"], start_time().timestamp_millis());
    assert_eq!(my_list[0]["data"]["title"], "Fight Club");

    let favorites: serde_json::Value = serde_json::from_str(&storage.raw("favorites").unwrap()).unwrap();
    assert_eq!(favorites[0]["type"], "tv");
    assert_eq!(favorites[0]["data"]["name"], "Breaking Bad");
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let saved_dir = dir.path().join("saved");

    {
        let store = SavedContentStore::open(&saved_dir);
        store.add_to_watch_later(movie(550, "Fight Club")).unwrap();
        store.add_to_favorites(series(1396, "Breaking Bad")).unwrap();
    }

    let reopened = SavedContentStore::new(FileStorage::new(&saved_dir));
    assert!(reopened.is_in_watch_later(550, ContentKind::Movie));
    assert!(reopened.is_in_favorites(1396, ContentKind::Series));
    assert!(saved_dir.join("myList.json").exists());
    assert!(saved_dir.join("favorites.json").exists());
}

#[test]
fn test_file_store_masks_corrupt_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("myList.json"), "\u{0}\u{1}binary").unwrap();

    let store = SavedContentStore::open(dir.path());
    assert!(store.watch_later().is_empty());
    assert!(!store.is_in_watch_later(550, ContentKind::Movie));
}

#[test]
fn test_collection_names() {
    assert_eq!("watch-later".parse::<Collection>().unwrap(), Collection::WatchLater);
    assert_eq!("favorites".parse::<Collection>().unwrap(), Collection::Favorites);
    assert!("history".parse::<Collection>().is_err());
    assert_eq!(Collection::WatchLater.storage_key(), "myList");
    assert_eq!(Collection::Favorites.to_string(), "favorites");
}
