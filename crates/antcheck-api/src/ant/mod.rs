pub mod client;
pub mod error;
pub mod types;

pub use client::AntClient;
pub use error::AntError;
pub use types::{AttachedFile, SearchResponse, TorrentCandidate};
