use thiserror::Error;

#[derive(Debug, Error)]
pub enum LastfmError {
    #[error("Last.fm API key is not configured")]
    MissingApiKey,

    #[error("Last.fm request failed: {0}")]
    Http(#[from] reqwest::Error),
}
