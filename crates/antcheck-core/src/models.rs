use std::path::Path;

use serde::{Deserialize, Serialize};

/// One local film file, as persisted in the result table.
///
/// The serde renames produce the exact CSV column headers; column
/// identity is what [`crate::ledger`] checks for schema compatibility.
/// Empty strings mean "could not be extracted", a normal data state the
/// classifier handles, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmRecord {
    #[serde(rename = "Full file path")]
    pub file_path: String,
    #[serde(rename = "Parsed film title")]
    pub title: String,
    #[serde(rename = "Film size (GB)")]
    pub size_gb: Option<f64>,
    #[serde(rename = "Resolution")]
    pub resolution: String,
    #[serde(rename = "Codec")]
    pub codec: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Release group")]
    pub release_group: String,
    #[serde(rename = "Already on ANT?")]
    pub status: String,

    /// Release year, kept for the TMDB cross-reference; not persisted.
    #[serde(skip)]
    pub year: Option<u32>,
    /// Edition marker stripped from the title; not persisted.
    #[serde(skip)]
    pub edition: String,
    /// Runtime from the media probe; not persisted.
    #[serde(skip)]
    pub runtime_minutes: Option<u32>,
}

impl FilmRecord {
    /// The bare file name, the strongest duplicate signal.
    pub fn file_name(&self) -> &str {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.file_path)
    }

    /// Whether the prior-run status means this record must not be
    /// re-searched. Non-terminal outcomes are re-searched every run
    /// because the catalog's contents grow.
    pub fn is_terminal(&self) -> bool {
        self.status.starts_with("Duplicate") || self.status.starts_with("Banned")
    }

    /// The prior status that exempts this record from the search pass,
    /// when there is one.
    pub fn skip_reason(&self) -> Option<&str> {
        self.is_terminal().then_some(self.status.as_str())
    }
}
