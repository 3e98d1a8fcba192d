//! Service traits at the seam between the pipeline and the network.
//!
//! The pipeline is generic over these so tests can drive it with scripted
//! responses instead of live endpoints.

use std::future::Future;

use crate::ant::{AntError, TorrentCandidate};
use crate::tmdb::{MovieHit, TmdbError};

/// Search operations against the primary catalog.
pub trait CatalogSearch {
    /// Searches the catalog for uploads matching a title.
    fn search_title(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<TorrentCandidate>, AntError>> + Send;

    /// Searches the catalog by external metadata identifier.
    fn search_tmdb_id(
        &self,
        tmdb_id: u64,
    ) -> impl Future<Output = Result<Vec<TorrentCandidate>, AntError>> + Send;
}

/// Secondary metadata source used to cross-reference titles the primary
/// search cannot find.
pub trait MetadataLookup {
    /// Searches for a movie by title, optionally pinned to a release year.
    fn search_movie(
        &self,
        title: &str,
        year: Option<u32>,
    ) -> impl Future<Output = Result<Vec<MovieHit>, TmdbError>> + Send;
}
