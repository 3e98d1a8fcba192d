//! Title comparison against the secondary metadata source.
//!
//! The primary catalog search is near-exact, so when it misses we try to
//! pin the title to a TMDB entry and re-search by identifier. Acceptance
//! is a ladder: exact title+year, then year off by one (premiere-date
//! discrepancies), then popularity-ranked fuzzy matching with a high
//! threshold.

use antcheck_api::MovieHit;
use tracing::{debug, info};

/// How a TMDB candidate was accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum TmdbMatch {
    /// Title and year match exactly.
    Exact { id: u64 },
    /// Title matches, year off by exactly one.
    NearYear { id: u64, year: u32 },
    /// Best fuzzy title match above the threshold.
    Fuzzy { id: u64, score: f64 },
}

impl TmdbMatch {
    pub fn id(&self) -> u64 {
        match self {
            TmdbMatch::Exact { id }
            | TmdbMatch::NearYear { id, .. }
            | TmdbMatch::Fuzzy { id, .. } => *id,
        }
    }
}

/// Pick the TMDB entry for a local title, or `None` when nothing clears
/// the bar. `threshold` and `year_window` are the configured tunables.
pub fn pick_movie(
    title: &str,
    year: Option<u32>,
    hits: &[MovieHit],
    threshold: f64,
    year_window: u32,
) -> Option<TmdbMatch> {
    if hits.is_empty() {
        return None;
    }
    let wanted = normalize_title(title);

    if let Some(local_year) = year {
        for hit in hits {
            if normalize_title(&hit.title) == wanted && hit.year() == Some(local_year) {
                return Some(TmdbMatch::Exact { id: hit.id });
            }
        }
        for hit in hits {
            let Some(hit_year) = hit.year() else { continue };
            if normalize_title(&hit.title) == wanted && hit_year.abs_diff(local_year) == 1 {
                info!(
                    title = %hit.title,
                    local_year,
                    hit_year,
                    "Accepting TMDB match with year off by one"
                );
                return Some(TmdbMatch::NearYear {
                    id: hit.id,
                    year: hit_year,
                });
            }
        }
    } else {
        // Without a local year, exact normalized equality is still the
        // strongest signal; prefer the most popular among equals.
        let mut equals: Vec<&MovieHit> = hits
            .iter()
            .filter(|h| normalize_title(&h.title) == wanted)
            .collect();
        equals.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        if let Some(hit) = equals.first() {
            return Some(TmdbMatch::Exact { id: hit.id });
        }
    }

    // Broaden the year window and fall back to fuzzy matching, ranked by
    // popularity so ties go to the better-known film.
    let mut in_window: Vec<&MovieHit> = hits
        .iter()
        .filter(|h| match (year, h.year()) {
            (Some(local), Some(remote)) => remote.abs_diff(local) <= year_window,
            _ => true,
        })
        .collect();
    in_window.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

    let mut best: Option<(f64, &MovieHit)> = None;
    for hit in in_window {
        let score = similarity(&wanted, &normalize_title(&hit.title));
        debug!(candidate = %hit.title, score, "Fuzzy-scored TMDB candidate");
        if best.map(|(s, _)| score > s).unwrap_or(true) {
            best = Some((score, hit));
        }
    }

    match best {
        Some((score, hit)) if score >= threshold => {
            Some(TmdbMatch::Fuzzy { id: hit.id, score })
        }
        _ => None,
    }
}

/// Case- and punctuation-insensitive comparison form of a title.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(
            ['\'', '\u{2019}', ':', '-', '.', ',', '_', '!', '?'],
            "",
        )
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized Levenshtein similarity (0.0-1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    use rapidfuzz::distance::levenshtein;

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    levenshtein::normalized_similarity(a.chars(), b.chars())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: u64, title: &str, date: Option<&str>, popularity: f64) -> MovieHit {
        MovieHit {
            id,
            title: title.into(),
            release_date: date.map(Into::into),
            popularity,
        }
    }

    #[test]
    fn normalization_strips_case_and_punctuation() {
        assert_eq!(normalize_title("L.A. Confidential"), "la confidential");
        assert_eq!(normalize_title("tick, tick... BOOM!"), "tick tick boom");
        assert_eq!(normalize_title("Heat"), "heat");
    }

    #[test]
    fn exact_title_and_year_wins() {
        let hits = vec![
            hit(1, "Heat", Some("1972-05-01"), 3.0),
            hit(2, "Heat", Some("1995-12-15"), 44.0),
        ];
        let pick = pick_movie("Heat", Some(1995), &hits, 0.85, 1).unwrap();
        assert_eq!(pick, TmdbMatch::Exact { id: 2 });
    }

    #[test]
    fn year_off_by_one_accepted() {
        let hits = vec![hit(7, "Memoria", Some("2022-04-22"), 10.0)];
        let pick = pick_movie("Memoria", Some(2021), &hits, 0.85, 1).unwrap();
        assert_eq!(pick, TmdbMatch::NearYear { id: 7, year: 2022 });
    }

    #[test]
    fn fuzzy_match_needs_threshold() {
        let hits = vec![hit(3, "The Shining", Some("1980-05-23"), 30.0)];
        let pick = pick_movie("Shining", Some(1980), &hits, 0.85, 1);
        // "shining" vs "the shining" scores below 0.85.
        assert!(pick.is_none());

        let pick = pick_movie("The Shinning", Some(1980), &hits, 0.85, 1).unwrap();
        assert!(matches!(pick, TmdbMatch::Fuzzy { id: 3, score } if score >= 0.85));
    }

    #[test]
    fn fuzzy_respects_year_window() {
        let hits = vec![hit(4, "Solaris", Some("2002-11-27"), 20.0)];
        // 1972 vs 2002 is far outside the window; no match.
        assert!(pick_movie("Solariss", Some(1972), &hits, 0.85, 1).is_none());
    }

    #[test]
    fn popularity_ranks_without_local_year() {
        let hits = vec![
            hit(5, "Nosferatu", Some("1922-03-04"), 15.0),
            hit(6, "Nosferatu", Some("2024-12-25"), 90.0),
        ];
        let pick = pick_movie("Nosferatu", None, &hits, 0.85, 1).unwrap();
        assert_eq!(pick.id(), 6);
    }

    #[test]
    fn empty_hits_never_match() {
        assert!(pick_movie("Heat", Some(1995), &[], 0.85, 1).is_none());
    }
}
