use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub results: Vec<MovieHit>,
}

/// One movie returned by a TMDB search.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieHit {
    pub id: u64,
    pub title: String,
    /// ISO date string (`1995-12-15`). Absent for unreleased entries.
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: f64,
}

impl MovieHit {
    /// Release year parsed from the date prefix.
    pub fn year(&self) -> Option<u32> {
        self.release_date.as_deref()?.get(0..4)?.parse().ok()
    }
}
