//! Last.fm soundtrack provider.
//!
//! Resolves a movie title (optionally year-qualified) to an album via
//! `album.search`, then pulls the track list with `album.getinfo`. A missing
//! soundtrack is a normal value with an empty track list, not an error; the
//! gateway decides whether to fall back to generated content.

pub mod error;
pub mod model;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::LastfmError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSoundtrackProvider;
pub use model::{Soundtrack, Track};

use async_trait::async_trait;
use tracing::debug;

use model::{AlbumInfoResponse, AlbumSearchResponse};

/// Default Last.fm API endpoint.
pub const LASTFM_BASE_URL: &str = "http://ws.audioscrobbler.com/2.0/";

/// Soundtrack lookups required by the gateway.
#[async_trait]
pub trait SoundtrackProvider: Send + Sync {
    async fn movie_soundtrack(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Soundtrack, LastfmError>;
}

/// Last.fm REST client.
#[derive(Debug, Clone)]
pub struct LastfmClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl LastfmClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: LASTFM_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (integration tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_key(&self) -> Result<&str, LastfmError> {
        self.api_key.as_deref().ok_or(LastfmError::MissingApiKey)
    }

    /// Album search for `term`; resolves the top hit to a full soundtrack.
    async fn lookup(&self, term: &str) -> Result<Option<Soundtrack>, LastfmError> {
        let response: AlbumSearchResponse = self
            .http
            .get(&self.base_url)
            .query(&[
                ("method", "album.search"),
                ("album", term),
                ("api_key", self.api_key()?),
                ("format", "json"),
                ("limit", "5"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(top) = response.into_first_album() else {
            debug!(term, "no Last.fm album match");
            return Ok(None);
        };

        let soundtrack = self.album_tracks(&top.artist, &top.name).await?;
        Ok(Some(soundtrack))
    }

    async fn album_tracks(&self, artist: &str, album: &str) -> Result<Soundtrack, LastfmError> {
        let response: AlbumInfoResponse = self
            .http
            .get(&self.base_url)
            .query(&[
                ("method", "album.getinfo"),
                ("artist", artist),
                ("album", album),
                ("api_key", self.api_key()?),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .album
            .map(|info| info.into_soundtrack())
            .unwrap_or_default())
    }
}

#[async_trait]
impl SoundtrackProvider for LastfmClient {
    async fn movie_soundtrack(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Soundtrack, LastfmError> {
        if let Some(year) = year {
            let qualified = format!("{title} soundtrack {year}");
            if let Some(soundtrack) = self.lookup(&qualified).await? {
                if soundtrack.has_tracks() {
                    return Ok(soundtrack);
                }
            }
            debug!(title, year, "year-qualified search was empty, retrying without year");
        }

        let term = format!("{title} soundtrack");
        Ok(self.lookup(&term).await?.unwrap_or_default())
    }
}
