use super::TrackId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title used when the catalog record has none
pub const UNKNOWN_TITLE: &str = "Unknown title";

/// Artist used when the catalog record has none
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

/// A playable track
///
/// Immutable once fetched. The full set is replaced wholesale on each
/// catalog refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable unique identifier
    pub id: TrackId,
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Media URL handed to the audio device
    pub audio_url: String,
    /// Cover art URL (optional)
    pub cover_url: Option<String>,
}

impl Track {
    /// Case-insensitive substring match on title or artist
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.artist.to_lowercase().contains(needle)
    }
}

/// Catalog record identifier as stored remotely (numeric or text)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTrackId {
    /// Numeric primary key
    Number(i64),
    /// Text key (uuid, slug)
    Text(String),
}

/// Track record as returned by the catalog, before defaults are applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct RawTrack {
    pub id: RawTrackId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub audio_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cover_url: Option<String>,
}

/// Scalars become text; arrays, objects and null become `None`
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

impl From<RawTrackId> for TrackId {
    fn from(raw: RawTrackId) -> Self {
        match raw {
            RawTrackId::Number(n) => TrackId::new(n.to_string()),
            RawTrackId::Text(s) => TrackId::new(s),
        }
    }
}

impl From<RawTrack> for Track {
    fn from(raw: RawTrack) -> Self {
        Self {
            id: TrackId::from(raw.id),
            title: raw.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artist: raw.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            audio_url: raw.audio_url.unwrap_or_default(),
            cover_url: raw.cover_url,
        }
    }
}
