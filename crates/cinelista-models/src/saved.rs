use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::media::ContentKind;
use crate::snapshot::ContentSnapshot;

/// A saved pointer to a catalog title plus the metadata captured when it was saved.
///
/// Persisted as `{"id", "type", "data", "addedAt"}` with `addedAt` in epoch
/// milliseconds, so lists written by earlier front ends load unchanged. `data`
/// is kept exactly as stored; [`ContentReference::snapshot`] is a typed view of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(into = "StoredReference", try_from = "StoredReference")]
pub struct ContentReference {
    pub id: u64,
    pub kind: ContentKind,
    pub data: serde_json::Value,
    pub saved_at: DateTime<Utc>,
}

impl ContentReference {
    pub fn new(snapshot: &ContentSnapshot, saved_at: DateTime<Utc>) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: snapshot.id(),
            kind: snapshot.kind(),
            data: serde_json::to_value(snapshot)?,
            saved_at,
        })
    }

    pub fn matches(&self, id: u64, kind: ContentKind) -> bool {
        self.id == id && self.kind == kind
    }

    /// Typed view of `data`, or `None` when it does not describe this entry's title
    pub fn snapshot(&self) -> Option<ContentSnapshot> {
        ContentSnapshot::from_value(self.kind, self.data.clone())
            .ok()
            .filter(|snapshot| snapshot.id() == self.id)
    }

    /// Display title read straight from `data`, so it survives snapshots that do not decode
    pub fn title(&self) -> Option<&str> {
        let field = match self.kind {
            ContentKind::Movie => "title",
            ContentKind::Series => "name",
        };
        self.data.get(field).and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredReference {
    id: u64,
    #[serde(rename = "type")]
    kind: ContentKind,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(rename = "addedAt")]
    added_at: i64,
}

impl From<ContentReference> for StoredReference {
    fn from(reference: ContentReference) -> Self {
        Self {
            id: reference.id,
            kind: reference.kind,
            data: reference.data,
            added_at: reference.saved_at.timestamp_millis(),
        }
    }
}

impl TryFrom<StoredReference> for ContentReference {
    type Error = String;

    fn try_from(stored: StoredReference) -> Result<Self, Self::Error> {
        let saved_at = DateTime::<Utc>::from_timestamp_millis(stored.added_at)
            .ok_or_else(|| format!("addedAt out of range: {}", stored.added_at))?;

        Ok(Self {
            id: stored.id,
            kind: stored.kind,
            data: stored.data,
            saved_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Movie, TvShow};
    use chrono::TimeZone;

    fn fight_club() -> Movie {
        Movie {
            id: 550,
            title: "Fight Club".to_string(),
            poster_path: Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string()),
            backdrop_path: None,
            overview: String::new(),
            release_date: "1999-10-15".to_string(),
            vote_average: 8.4,
            genre_ids: vec![18],
        }
    }

    #[test]
    fn test_persisted_layout() {
        let saved_at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let reference = ContentReference::new(&ContentSnapshot::from(fight_club()), saved_at).unwrap();

        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(json["id"], 550);
        assert_eq!(json["type"], "movie");
        assert_eq!(json["addedAt"], 1_700_000_000_123i64);
        assert_eq!(json["data"]["title"], "Fight Club");
        assert!(json["data"].get("media_type").is_none());
    }

    #[test]
    fn test_loads_entry_written_by_web_front_end() {
        let json = r#"{
            "id": 1396,
            "type": "tv",
            "data": {"id": 1396, "name": "Breaking Bad", "poster_path": null, "vote_average": 8.9},
            "addedAt": 1699999999000
        }"#;

        let reference: ContentReference = serde_json::from_str(json).unwrap();
        assert_eq!(reference.kind, ContentKind::Series);
        assert_eq!(reference.title(), Some("Breaking Bad"));
        assert_eq!(reference.saved_at.timestamp_millis(), 1_699_999_999_000);
        assert!(matches!(reference.snapshot(), Some(ContentSnapshot::Series(TvShow { id: 1396, .. }))));
    }

    #[test]
    fn test_data_is_written_back_unchanged() {
        let json = r#"{"id": 550, "type": "movie", "data": {"id": 550, "title": "Fight Club", "overview": null, "runtime": 139, "tagline": "Mischief. Mayhem. Soap."}, "addedAt": 0}"#;

        let reference: ContentReference = serde_json::from_str(json).unwrap();
        let written = serde_json::to_value(&reference).unwrap();
        let stored: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(written, stored);

        let snapshot = reference.snapshot().unwrap();
        assert_eq!(snapshot.title(), "Fight Club");
    }

    #[test]
    fn test_undecodable_data_keeps_the_entry() {
        let json = r#"{"id": 1, "type": "movie", "data": "not an object", "addedAt": 0}"#;
        let reference: ContentReference = serde_json::from_str(json).unwrap();
        assert_eq!(reference.snapshot(), None);
        assert_eq!(reference.title(), None);

        let json = r#"{"id": 1, "type": "movie", "data": {"id": 2, "title": "Other"}, "addedAt": 0}"#;
        let reference: ContentReference = serde_json::from_str(json).unwrap();
        assert_eq!(reference.snapshot(), None);
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let json = r#"{"id": 1, "type": "podcast", "data": {}, "addedAt": 0}"#;
        assert!(serde_json::from_str::<ContentReference>(json).is_err());
    }
}
