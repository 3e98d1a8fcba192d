use thiserror::Error;

/// Errors from the TMDB client.
///
/// All of these are recoverable at the pipeline level: a failed secondary
/// lookup only costs one resolution step, never the batch.
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error: status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    Parse(String),
}
