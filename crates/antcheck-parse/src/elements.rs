use serde::{Deserialize, Serialize};

/// Elements recognized in a release filename.
///
/// Every field is optional: a filename only yields what it actually
/// carries, and downstream code decides how to handle the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elements {
    /// Film title, reconstructed from the tokens that no other pass claimed.
    pub title: Option<String>,
    /// Release year.
    pub year: Option<u32>,
    /// Edition tag such as `Extended` or `Remastered`.
    pub edition: Option<String>,
    /// Canonical resolution label (`720p`, `1080p`, `2160p`, ...).
    pub resolution: Option<String>,
    /// Canonical video codec label (`H264`, `H265`, `XviD`, ...).
    pub codec: Option<String>,
    /// Canonical source label (`Blu-ray`, `Web`, `DVD`, ...).
    pub source: Option<String>,
    /// Release group, from a trailing `-GROUP` suffix or a leading bracket.
    pub release_group: Option<String>,
    /// Episode marker (`S01E02`, `3x07`). Present means this is not a film.
    pub episode: Option<String>,
}

impl Elements {
    /// True when the technical triple (resolution, codec, source) is complete.
    pub fn has_full_properties(&self) -> bool {
        self.resolution.is_some() && self.codec.is_some() && self.source.is_some()
    }
}
