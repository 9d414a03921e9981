use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("TMDb request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDb returned an unexpected response: {reason}")]
    UnexpectedResponse { reason: String },
}
