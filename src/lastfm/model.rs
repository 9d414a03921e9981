//! Soundtrack response shape plus the raw Last.fm wire types.
//!
//! Last.fm's JSON is converted from XML server-side, so single-element lists
//! arrive as bare objects and numbers sometimes arrive as strings. The raw
//! types absorb both shapes.

use serde::{Deserialize, Serialize};

/// A movie soundtrack: album metadata plus track list.
///
/// Also produced by the LLM fallback (with `source: "openai"` and no album
/// URL), so every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Soundtrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Soundtrack {
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlbumSearchResponse {
    #[serde(default)]
    pub results: Option<SearchResults>,
}

impl AlbumSearchResponse {
    pub(crate) fn into_first_album(self) -> Option<AlbumMatch> {
        self.results?.albummatches.album.into_iter().next()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResults {
    #[serde(default)]
    pub albummatches: AlbumMatches,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AlbumMatches {
    #[serde(default)]
    pub album: Vec<AlbumMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlbumMatch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlbumInfoResponse {
    #[serde(default)]
    pub album: Option<AlbumInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlbumInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Vec<ImageEntry>,
    #[serde(default)]
    pub tracks: Option<TrackContainer>,
}

impl AlbumInfo {
    pub(crate) fn into_soundtrack(self) -> Soundtrack {
        // Last entry is the largest image size.
        let image = self
            .image
            .last()
            .map(|entry| entry.text.clone())
            .unwrap_or_default();

        let tracks = self
            .tracks
            .map(|container| container.track.into_vec())
            .unwrap_or_default()
            .into_iter()
            .map(|raw| Track {
                name: raw.name,
                duration: raw.duration.and_then(|d| d.seconds()),
                url: raw.url,
                artist: None,
                note: None,
            })
            .collect();

        Soundtrack {
            source: None,
            album: self.name,
            artist: self.artist,
            url: self.url,
            image,
            tracks,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImageEntry {
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TrackContainer {
    #[serde(default)]
    pub track: OneOrMany<RawTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration: Option<DurationField>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Track duration arrives as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum DurationField {
    Seconds(u64),
    Text(String),
}

impl DurationField {
    pub(crate) fn seconds(&self) -> Option<u64> {
        match self {
            DurationField::Seconds(value) => Some(*value),
            DurationField::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Single XML elements flatten to a bare object instead of a one-element list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}
