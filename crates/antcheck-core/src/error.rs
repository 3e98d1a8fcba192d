use thiserror::Error;

#[derive(Debug, Error)]
pub enum AntCheckError {
    #[error("config error: {0}")]
    Config(String),

    #[error("scan failed: {0}")]
    Scan(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] antcheck_api::AntError),

    #[error("ledger error: {0}")]
    Ledger(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
