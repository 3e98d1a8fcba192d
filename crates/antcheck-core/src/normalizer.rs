//! Builds a [`FilmRecord`] identity from one file path.
//!
//! Parsing proper lives in `antcheck-parse`; this module owns the
//! pre- and post-processing around it: alternate-title stripping, edition
//! markers, acronym repair, and the canonical attribute spellings the
//! catalog compares against.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::media::{MediaInspector, MediaProbe};
use crate::models::FilmRecord;

static AKA_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bAKA\b").expect("static regex compiles"));

static EDITION_CUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(theatrical|extended)\scut\s").expect("static regex compiles"));

/// Normalize one file into a record. Returns `None` for files that are
/// not films (episode markers in the name), which are logged and dropped.
pub fn normalize_file<I: MediaInspector>(path: &Path, inspector: &I) -> Option<FilmRecord> {
    let file_name = path.file_name()?.to_string_lossy();
    let cleaned = preprocess_file_name(&file_name);
    let mut elements = antcheck_parse::parse(&cleaned);

    if let Some(marker) = &elements.episode {
        info!(
            path = %path.display(),
            marker = %marker,
            "Dropping file, not parsed as a film"
        );
        return None;
    }

    let raw_title = elements
        .title
        .take()
        .unwrap_or_else(|| stem_of(&cleaned).to_string());
    let title = repair_acronyms(&strip_edition_cut(&raw_title));

    let probe = inspector.inspect(path);
    Some(assemble(path, title, elements, probe))
}

fn assemble(
    path: &Path,
    title: String,
    elements: antcheck_parse::Elements,
    probe: MediaProbe,
) -> FilmRecord {
    // Resolution prefers the media probe; the filename is the fallback.
    // Codec, source, and group only ever come from the filename.
    let resolution = probe
        .resolution
        .or(elements.resolution)
        .unwrap_or_default();

    FilmRecord {
        file_path: path.to_string_lossy().into_owned(),
        title,
        size_gb: probe.size_gb,
        resolution,
        codec: elements.codec.unwrap_or_default(),
        source: normalize_source(elements.source),
        release_group: elements
            .release_group
            .map(|g| g.to_lowercase())
            .unwrap_or_default(),
        status: String::new(),
        year: elements.year,
        edition: elements.edition.unwrap_or_default(),
        runtime_minutes: probe.runtime_minutes,
    }
}

/// When a filename carries both an original and an alternate title
/// (`Original AKA English Title`), keep the last segment; it is the one
/// the catalog stores.
pub fn preprocess_file_name(file_name: &str) -> String {
    AKA_SPLIT
        .split(file_name)
        .last()
        .unwrap_or(file_name)
        .trim_start()
        .to_string()
}

/// `Theatrical Cut` / `Extended Cut` are edition markers, not title words.
pub fn strip_edition_cut(title: &str) -> String {
    EDITION_CUT.replace_all(title, "").into_owned()
}

/// The catalog does not distinguish the UHD tier in this attribute.
fn normalize_source(source: Option<String>) -> String {
    match source.as_deref() {
        Some("Ultra HD Blu-ray") => "Blu-ray".to_string(),
        _ => source.unwrap_or_default(),
    }
}

fn stem_of(file_name: &str) -> &str {
    file_name
        .rfind('.')
        .map(|pos| &file_name[..pos])
        .unwrap_or(file_name)
}

/// Filename parsing under-punctuates single-letter-word acronyms
/// (`S W A T` for `S.W.A.T.`). Three passes restore the periods:
/// spaces inside a single-letter run become dots, an acronym followed by
/// more words gets a period plus space, and an acronym ending the title
/// gets its trailing period.
pub fn repair_acronyms(title: &str) -> String {
    let collapsed = collapse_acronym_spaces(title);
    let suffixed = dot_space_after_acronym(&collapsed);
    close_trailing_acronym(suffixed)
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A space flanked by single-letter words on both sides becomes a period:
/// `L A Confidential` -> `L.A Confidential`.
fn collapse_acronym_spaces(title: &str) -> String {
    let chars: Vec<char> = title.chars().collect();
    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        let single_before = i >= 1
            && chars[i - 1].is_ascii_alphabetic()
            && (i < 2 || !is_word(chars[i - 2]));
        let single_after = i + 1 < chars.len()
            && chars[i + 1].is_ascii_alphabetic()
            && (i + 2 >= chars.len() || !is_word(chars[i + 2]));
        if c == ' ' && single_before && single_after {
            out.push('.');
        } else {
            out.push(c);
        }
    }
    out
}

/// A space after a dotted letter, before further text, becomes a period
/// and space: `L.A Confidential` -> `L.A. Confidential`.
fn dot_space_after_acronym(title: &str) -> String {
    let chars: Vec<char> = title.chars().collect();
    let mut out = String::with_capacity(chars.len() + 2);
    for (i, &c) in chars.iter().enumerate() {
        if c == ' '
            && i >= 2
            && chars[i - 2] == '.'
            && chars[i - 1].is_ascii_alphabetic()
            && i + 1 < chars.len()
            && !chars[i + 1].is_whitespace()
        {
            out.push('.');
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// A title ending in `.X` has no following token to trigger the previous
/// pass, so the final period is added here: `S.W.A.T` -> `S.W.A.T.`.
fn close_trailing_acronym(mut title: String) -> String {
    let mut rev = title.chars().rev();
    if let (Some(last), Some(prev)) = (rev.next(), rev.next()) {
        if last.is_ascii_alphabetic() && prev == '.' {
            title.push('.');
        }
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::FsInspector;

    struct StubInspector(MediaProbe);

    impl MediaInspector for StubInspector {
        fn inspect(&self, _path: &Path) -> MediaProbe {
            self.0.clone()
        }
    }

    #[test]
    fn acronym_repair_table() {
        for (input, expected) in [
            ("L A Confidential", "L.A. Confidential"),
            ("T E S Test film", "T.E.S. Test film"),
            ("T E.S.T Test film", "T.E.S.T. Test film"),
            ("S W A T", "S.W.A.T."),
            ("X: First Class", "X: First Class"),
            ("Da 5 Bloods", "Da 5 Bloods"),
            ("tick tick BOOM!", "tick tick BOOM!"),
            ("Short term 12", "Short term 12"),
        ] {
            assert_eq!(repair_acronyms(input), expected, "{input}");
        }
    }

    #[test]
    fn acronym_repair_is_idempotent() {
        for already_correct in ["S.W.A.T.", "L.A. Confidential", "E.T. the Extra-Terrestrial"] {
            assert_eq!(repair_acronyms(already_correct), already_correct);
        }
    }

    #[test]
    fn aka_keeps_last_segment() {
        assert_eq!(
            preprocess_file_name("Politist adjectiv AKA Police Adjective.2009.mkv"),
            "Police Adjective.2009.mkv"
        );
        assert_eq!(preprocess_file_name("Heat.1995.mkv"), "Heat.1995.mkv");
    }

    #[test]
    fn edition_cut_stripped_from_title() {
        assert_eq!(
            strip_edition_cut("Film Theatrical Cut Continues"),
            "Film Continues"
        );
        assert_eq!(
            strip_edition_cut("Film extended cut Continues"),
            "Film Continues"
        );
        assert_eq!(strip_edition_cut("Plain Title"), "Plain Title");
    }

    #[test]
    fn builds_record_from_scene_name() {
        let inspector = StubInspector(MediaProbe {
            size_gb: Some(8.5),
            resolution: None,
            runtime_minutes: None,
        });
        let record = normalize_file(
            Path::new("/films/Heat.1995.1080p.BluRay.x264-CRUELTY.mkv"),
            &inspector,
        )
        .unwrap();

        assert_eq!(record.title, "Heat");
        assert_eq!(record.year, Some(1995));
        assert_eq!(record.resolution, "1080p");
        assert_eq!(record.codec, "H264");
        assert_eq!(record.source, "Blu-ray");
        assert_eq!(record.release_group, "cruelty");
        assert_eq!(record.size_gb, Some(8.5));
        assert!(record.status.is_empty());
    }

    #[test]
    fn probe_resolution_wins_over_filename() {
        let inspector = StubInspector(MediaProbe {
            size_gb: None,
            resolution: Some("2160p".into()),
            runtime_minutes: None,
        });
        let record = normalize_file(
            Path::new("/films/Film.2020.1080p.WEB-DL.mkv"),
            &inspector,
        )
        .unwrap();
        assert_eq!(record.resolution, "2160p");
    }

    #[test]
    fn uhd_source_normalized_to_bluray() {
        let record = normalize_file(
            Path::new("/films/Dune.2021.2160p.UHD.BluRay.x265-GRP.mkv"),
            &FsInspector,
        )
        .unwrap();
        assert_eq!(record.source, "Blu-ray");
        assert_eq!(record.resolution, "2160p");
    }

    #[test]
    fn episode_files_are_dropped() {
        let record = normalize_file(
            Path::new("/tv/Show.S01E04.720p.HDTV.x264-TLA.mkv"),
            &FsInspector,
        );
        assert!(record.is_none());
    }

    #[test]
    fn missing_attributes_are_empty_strings() {
        let record = normalize_file(Path::new("/films/Atlantique.mkv"), &FsInspector).unwrap();
        assert_eq!(record.title, "Atlantique");
        assert!(record.resolution.is_empty());
        assert!(record.codec.is_empty());
        assert!(record.source.is_empty());
        assert!(record.release_group.is_empty());
    }
}
