//! HTTP clients for the external catalogs antcheck talks to.
//!
//! `ant` is the primary tracker search API; `tmdb` is the optional
//! secondary metadata source used to cross-reference titles the primary
//! search cannot find. Both clients share the rate gate in [`limit`] and
//! the retry helper in [`retry`].

pub mod ant;
pub mod limit;
pub mod retry;
pub mod tmdb;
pub mod traits;

pub use ant::{AntClient, AntError, AttachedFile, TorrentCandidate};
pub use limit::RateGate;
pub use retry::RetryConfig;
pub use tmdb::{MovieHit, TmdbClient, TmdbError};
pub use traits::{CatalogSearch, MetadataLookup};
