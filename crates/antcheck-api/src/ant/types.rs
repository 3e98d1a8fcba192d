use serde::Deserialize;

/// JSON envelope returned by the search endpoint.
///
/// The hit count lives under `response.total`; the uploads themselves are a
/// sibling `item` array that is absent when nothing matched.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub response: ResponseMeta,
    #[serde(default)]
    pub item: Vec<TorrentCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMeta {
    pub total: u64,
}

impl SearchResponse {
    /// The candidate list, empty when the catalog reported zero hits.
    pub fn hits(self) -> Vec<TorrentCandidate> {
        if self.response.total > 0 {
            self.item
        } else {
            Vec::new()
        }
    }
}

/// One existing upload known to the catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TorrentCandidate {
    pub guid: Option<String>,
    #[serde(default)]
    pub files: Vec<AttachedFile>,
    pub resolution: Option<String>,
    pub codec: Option<String>,
    /// The catalog calls this attribute `media` on the wire.
    #[serde(rename = "media")]
    pub source: Option<String>,
}

/// A file attached to an existing upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttachedFile {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}
