use thiserror::Error;

#[derive(Debug, Error)]
pub enum AntError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error: status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("service is in maintenance mode")]
    Maintenance,

    #[error("unexpected response shape: {0}")]
    Parse(String),
}

impl AntError {
    /// Whether this error must abort the whole batch run.
    ///
    /// A malformed-but-successful payload only loses one search step; every
    /// transport, status, or maintenance failure means nothing was actually
    /// checked, and a half-written result table would mislead the user.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AntError::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_recoverable() {
        assert!(!AntError::Parse("missing field".into()).is_fatal());
    }

    #[test]
    fn everything_else_is_fatal() {
        assert!(AntError::Maintenance.is_fatal());
        assert!(AntError::Api {
            status: 403,
            message: "Forbidden".into()
        }
        .is_fatal());
    }
}
