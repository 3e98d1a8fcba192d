//! Ordered search-and-fallback chain for one title.
//!
//! The catalog search is near-exact, so a miss on the verbatim title is
//! retried with semantically-equivalent variants: conjunction style,
//! missing time/date punctuation in numeric titles, alternate-title
//! splits, and finally a TMDB cross-reference. The chain stops at the
//! first non-empty result.

use antcheck_api::{AntError, CatalogSearch, MetadataLookup, TorrentCandidate};
use tracing::{info, warn};

use crate::matcher;

/// Tunables for the TMDB step, sourced from `[tmdb]` config.
#[derive(Debug, Clone, Copy)]
pub struct ResolveSettings {
    pub fuzzy_threshold: f64,
    pub year_window: u32,
}

/// One variant transform: title in, candidate queries out. An empty
/// vector means the step does not apply to this title.
type VariantStep = fn(&str) -> Vec<String>;

/// The fixed-priority variant chain, verbatim title first.
fn variant_steps() -> [VariantStep; 5] {
    [
        |title| vec![title.to_string()],
        conjunction_swap,
        time_insertion,
        date_insertion,
        aka_split,
    ]
}

/// Resolve a title to catalog candidates, trying each variant in order.
///
/// Recoverable errors (malformed payloads, any TMDB failure) cost only
/// their step; fatal catalog errors abort the whole run.
pub async fn resolve<C, M>(
    catalog: &C,
    metadata: Option<&M>,
    title: &str,
    year: Option<u32>,
    settings: &ResolveSettings,
) -> Result<Vec<TorrentCandidate>, AntError>
where
    C: CatalogSearch,
    M: MetadataLookup,
{
    for step in variant_steps() {
        for query in step(title) {
            if query != title {
                info!(query = %query, "Searching for variant as well");
            }
            match catalog.search_title(&query).await {
                Ok(hits) if !hits.is_empty() => return Ok(hits),
                Ok(_) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => warn!(query = %query, "Search step failed, continuing: {err}"),
            }
        }
    }

    if let Some(metadata) = metadata {
        if let Some(id) = cross_reference(metadata, title, year, settings).await {
            match catalog.search_tmdb_id(id).await {
                Ok(hits) => return Ok(hits),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => warn!(tmdb_id = id, "Identifier search failed: {err}"),
            }
        }
    }

    info!(title = %title, "Not found on ANT");
    Ok(Vec::new())
}

async fn cross_reference<M: MetadataLookup>(
    metadata: &M,
    title: &str,
    year: Option<u32>,
    settings: &ResolveSettings,
) -> Option<u64> {
    let hits = match metadata.search_movie(title, year).await {
        Ok(hits) => hits,
        Err(err) => {
            warn!(title = %title, "TMDB lookup failed, continuing: {err}");
            return None;
        }
    };
    let pick = matcher::pick_movie(
        title,
        year,
        &hits,
        settings.fuzzy_threshold,
        settings.year_window,
    )?;
    info!(title = %title, tmdb_id = pick.id(), "Cross-referenced via TMDB");
    Some(pick.id())
}

/// `and` <-> `&`, whichever direction applies.
pub fn conjunction_swap(title: &str) -> Vec<String> {
    if let Some(swapped) = swap_delimited(title, "and", " & ") {
        vec![swapped]
    } else if let Some(swapped) = swap_delimited(title, "&", " and ") {
        vec![swapped]
    } else {
        Vec::new()
    }
}

fn swap_delimited(title: &str, word: &str, replacement: &str) -> Option<String> {
    let words: Vec<&str> = title.split(' ').collect();
    if !words.iter().any(|w| w.eq_ignore_ascii_case(word)) {
        return None;
    }
    let mut out = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        // Only an interior occurrence has the surrounding spaces the
        // substitution replaces.
        if i > 0 && i + 1 < words.len() && words[i].eq_ignore_ascii_case(word) {
            let joined = format!("{}{replacement}{}", out.pop().unwrap_or_default(), words[i + 1]);
            out.push(joined);
            i += 2;
        } else {
            out.push(words[i].to_string());
            i += 1;
        }
    }
    let swapped = out.join(" ");
    (swapped != title).then_some(swapped)
}

/// A 4-digit run is an unpunctuated time: `1208` -> `12:08`.
pub fn time_insertion(title: &str) -> Vec<String> {
    insert_in_digit_runs(title, |len| (len == 4).then_some((2, ':')))
}

/// A 2- or 3-digit run is an unpunctuated date: `15` -> `1/5`,
/// `123` -> `1/23`. Runs of four or more never fire here; those are the
/// time rule's territory.
pub fn date_insertion(title: &str) -> Vec<String> {
    insert_in_digit_runs(title, |len| (len == 2 || len == 3).then_some((1, '/')))
}

/// Applies `rule` to every word-bounded digit run: given the run length
/// it returns the split offset and separator, or `None` to leave the run
/// alone. Returns the rewritten title only when something changed.
fn insert_in_digit_runs(
    title: &str,
    rule: impl Fn(usize) -> Option<(usize, char)>,
) -> Vec<String> {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let chars: Vec<char> = title.chars().collect();
    let mut out = String::with_capacity(chars.len() + 2);
    let mut changed = false;
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let run = &chars[start..i];
            let bounded = (start == 0 || !is_word(chars[start - 1]))
                && (i == chars.len() || !is_word(chars[i]));
            if let Some((offset, sep)) = bounded.then(|| rule(run.len())).flatten() {
                out.extend(&run[..offset]);
                out.push(sep);
                out.extend(&run[offset..]);
                changed = true;
            } else {
                out.extend(run);
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    if changed {
        vec![out]
    } else {
        Vec::new()
    }
}

/// `X aka Y` means two candidate titles; search each in turn.
pub fn aka_split(title: &str) -> Vec<String> {
    let words: Vec<&str> = title.split(' ').collect();
    if !words.iter().any(|w| w.eq_ignore_ascii_case("aka")) {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut current = Vec::new();
    for word in words {
        if word.eq_ignore_ascii_case("aka") {
            if !current.is_empty() {
                parts.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(word);
        }
    }
    if !current.is_empty() {
        parts.push(current.join(" "));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use antcheck_api::{MovieHit, TmdbError};

    #[test]
    fn conjunction_round_trip() {
        let original = "The Old Man and the Gun";
        let swapped = conjunction_swap(original);
        assert_eq!(swapped, vec!["The Old Man & the Gun".to_string()]);
        let back = conjunction_swap(&swapped[0]);
        assert_eq!(back, vec![original.to_string()]);
    }

    #[test]
    fn conjunction_is_word_delimited() {
        // "Sand" contains "and" but is not the conjunction.
        assert!(conjunction_swap("Sand Castle").is_empty());
    }

    #[test]
    fn time_fires_on_four_digit_runs_only() {
        assert_eq!(
            time_insertion("1208 East of Bucharest"),
            vec!["12:08 East of Bucharest".to_string()]
        );
        assert!(time_insertion("Apollo 13").is_empty());
        assert!(time_insertion("24601 Prisoner").is_empty());
    }

    #[test]
    fn date_fires_on_two_or_three_digit_runs_only() {
        assert_eq!(date_insertion("Apollo 13"), vec!["Apollo 1/3".to_string()]);
        assert_eq!(date_insertion("The 411"), vec!["The 4/11".to_string()]);
        // The 4-digit boundary belongs to the time rule.
        assert!(date_insertion("1208 East of Bucharest").is_empty());
        assert!(date_insertion("24601 Prisoner").is_empty());
    }

    #[test]
    fn aka_splits_into_each_side() {
        assert_eq!(
            aka_split("Azor aka The Quiet Banker"),
            vec!["Azor".to_string(), "The Quiet Banker".to_string()]
        );
        assert!(aka_split("Akira").is_empty());
    }

    struct FakeCatalog {
        by_query: HashMap<String, Vec<TorrentCandidate>>,
        queries: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn new(entries: &[(&str, &str)]) -> Self {
            let by_query = entries
                .iter()
                .map(|(q, guid)| {
                    (
                        q.to_string(),
                        vec![TorrentCandidate {
                            guid: Some(guid.to_string()),
                            ..Default::default()
                        }],
                    )
                })
                .collect();
            Self {
                by_query,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl CatalogSearch for FakeCatalog {
        async fn search_title(&self, title: &str) -> Result<Vec<TorrentCandidate>, AntError> {
            self.queries.lock().unwrap().push(title.to_string());
            Ok(self.by_query.get(title).cloned().unwrap_or_default())
        }

        async fn search_tmdb_id(&self, tmdb_id: u64) -> Result<Vec<TorrentCandidate>, AntError> {
            self.search_title(&format!("tmdb:{tmdb_id}")).await
        }
    }

    struct FakeTmdb(Vec<MovieHit>);

    impl MetadataLookup for FakeTmdb {
        async fn search_movie(
            &self,
            _title: &str,
            _year: Option<u32>,
        ) -> Result<Vec<MovieHit>, TmdbError> {
            Ok(self.0.clone())
        }
    }

    const SETTINGS: ResolveSettings = ResolveSettings {
        fuzzy_threshold: 0.85,
        year_window: 1,
    };

    #[tokio::test]
    async fn verbatim_hit_stops_the_chain() {
        let catalog = FakeCatalog::new(&[("Heat", "guid-1")]);
        let hits = resolve::<_, FakeTmdb>(&catalog, None, "Heat", Some(1995), &SETTINGS)
            .await
            .unwrap();
        assert_eq!(hits[0].guid.as_deref(), Some("guid-1"));
        assert_eq!(*catalog.queries.lock().unwrap(), vec!["Heat"]);
    }

    #[tokio::test]
    async fn falls_through_to_time_variant() {
        let catalog = FakeCatalog::new(&[("12:08 East of Bucharest", "guid-2")]);
        let hits = resolve::<_, FakeTmdb>(
            &catalog,
            None,
            "1208 East of Bucharest",
            Some(2006),
            &SETTINGS,
        )
        .await
        .unwrap();
        assert_eq!(hits[0].guid.as_deref(), Some("guid-2"));
    }

    #[tokio::test]
    async fn aka_sides_searched_in_turn() {
        let catalog = FakeCatalog::new(&[("The Quiet Banker", "guid-3")]);
        let hits = resolve::<_, FakeTmdb>(
            &catalog,
            None,
            "Azor aka The Quiet Banker",
            None,
            &SETTINGS,
        )
        .await
        .unwrap();
        assert_eq!(hits[0].guid.as_deref(), Some("guid-3"));
    }

    #[tokio::test]
    async fn tmdb_cross_reference_drives_id_search() {
        let catalog = FakeCatalog::new(&[("tmdb:949", "guid-4")]);
        let tmdb = FakeTmdb(vec![MovieHit {
            id: 949,
            title: "Heat".into(),
            release_date: Some("1995-12-15".into()),
            popularity: 44.0,
        }]);
        let hits = resolve(&catalog, Some(&tmdb), "Heat", Some(1995), &SETTINGS)
            .await
            .unwrap();
        assert_eq!(hits[0].guid.as_deref(), Some("guid-4"));
    }

    #[tokio::test]
    async fn unmatched_title_yields_empty() {
        let catalog = FakeCatalog::new(&[]);
        let hits = resolve::<_, FakeTmdb>(&catalog, None, "Obscure Film", None, &SETTINGS)
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    struct FatalCatalog;

    impl CatalogSearch for FatalCatalog {
        async fn search_title(&self, _title: &str) -> Result<Vec<TorrentCandidate>, AntError> {
            Err(AntError::Maintenance)
        }

        async fn search_tmdb_id(&self, _id: u64) -> Result<Vec<TorrentCandidate>, AntError> {
            Err(AntError::Maintenance)
        }
    }

    #[tokio::test]
    async fn fatal_catalog_error_aborts() {
        let result =
            resolve::<_, FakeTmdb>(&FatalCatalog, None, "Heat", Some(1995), &SETTINGS).await;
        assert!(matches!(result, Err(AntError::Maintenance)));
    }
}
