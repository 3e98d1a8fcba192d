//! Tiered duplicate classification.
//!
//! Given the catalog candidates for a title and the local file's
//! attributes, assigns exactly one outcome. Priority order: banned
//! release group, empty candidate list, exact filename match, then
//! property comparison over whatever subset of {resolution, codec,
//! source} the filename actually yielded.

use std::fmt;

use antcheck_api::TorrentCandidate;

/// Rendered when a candidate arrives without an identifier.
pub const GUID_MISSING: &str = "(Failed to extract URL from API response)";

/// Classification outcome. The `Display` form is the status string
/// persisted in the result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DupeStatus {
    /// Release-group policy is absolute; no catalog hit required.
    Banned { group: String },
    NotFound,
    /// A candidate lists a file with exactly the local file's name.
    ExactFilename { guid: String },
    /// All three properties missing locally; no dupe check possible.
    Unverifiable { guid: String },
    /// Every available property matched, but some could not be checked.
    PartialDuplicate {
        available: String,
        missing: String,
        guid: String,
    },
    /// Full property match.
    Duplicate { available: String, guid: String },
    /// No candidate matches the available properties; safe to upload.
    NotDuplicate { available: String, guid: String },
}

impl fmt::Display for DupeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DupeStatus::Banned { group } => {
                write!(f, "Banned: release group '{group}' is banned from ANT - do not upload")
            }
            DupeStatus::NotFound => write!(f, "NOT FOUND"),
            DupeStatus::ExactFilename { guid } => {
                write!(f, "Duplicate: exact filename already exists: {guid}")
            }
            DupeStatus::Unverifiable { guid } => write!(
                f,
                "On ANT, but could not dupe check (could not extract \
                 resolution/codec/source from filename). {guid}"
            ),
            DupeStatus::PartialDuplicate {
                available,
                missing,
                guid,
            } => write!(
                f,
                "Partial duplicate: a film with {available} already exists. \
                 Could not extract and check {missing} from filename. {guid}"
            ),
            DupeStatus::Duplicate { available, guid } => {
                write!(f, "Duplicate: a film with {available} already exists: {guid}")
            }
            DupeStatus::NotDuplicate { available, guid } => write!(
                f,
                "Not a duplicate: a film with {available} does not already exist. {guid}"
            ),
        }
    }
}

/// Classify one file against its catalog candidates.
pub fn classify(
    file_name: &str,
    resolution: &str,
    codec: &str,
    source: &str,
    release_group: &str,
    banned_groups: &[String],
    candidates: &[TorrentCandidate],
) -> DupeStatus {
    if !release_group.is_empty()
        && banned_groups
            .iter()
            .any(|g| g.eq_ignore_ascii_case(release_group))
    {
        return DupeStatus::Banned {
            group: release_group.to_string(),
        };
    }

    if candidates.is_empty() {
        return DupeStatus::NotFound;
    }

    // Filename equality short-circuits all property comparisons.
    for candidate in candidates {
        if candidate.files.iter().any(|f| f.name == file_name) {
            return DupeStatus::ExactFilename {
                guid: guid_of(candidate),
            };
        }
    }

    check_properties(resolution, codec, source, candidates)
}

fn check_properties(
    resolution: &str,
    codec: &str,
    source: &str,
    candidates: &[TorrentCandidate],
) -> DupeStatus {
    let properties = [
        ("resolution", resolution),
        ("codec", codec),
        ("source", source),
    ];
    let available: Vec<(&str, &str)> = properties
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .copied()
        .collect();
    let missing: Vec<&str> = properties
        .iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| *k)
        .collect();

    if available.is_empty() {
        return DupeStatus::Unverifiable {
            guid: guid_of(&candidates[0]),
        };
    }

    let available_str = available
        .iter()
        .map(|(_, v)| *v)
        .collect::<Vec<_>>()
        .join("/");

    // First property match in catalog order wins; exact equality is rare
    // enough that a globally-best search would buy nothing.
    for candidate in candidates {
        let matches_all = available
            .iter()
            .all(|(key, value)| candidate_property(candidate, key)
                .map(|have| have.eq_ignore_ascii_case(value))
                .unwrap_or(false));
        if matches_all {
            return if missing.is_empty() {
                DupeStatus::Duplicate {
                    available: available_str,
                    guid: guid_of(candidate),
                }
            } else {
                DupeStatus::PartialDuplicate {
                    available: available_str,
                    missing: missing.join("/"),
                    guid: guid_of(candidate),
                }
            };
        }
    }

    DupeStatus::NotDuplicate {
        available: available_str,
        guid: guid_of(&candidates[0]),
    }
}

fn candidate_property<'a>(candidate: &'a TorrentCandidate, key: &str) -> Option<&'a str> {
    match key {
        "resolution" => candidate.resolution.as_deref(),
        "codec" => candidate.codec.as_deref(),
        "source" => candidate.source.as_deref(),
        _ => None,
    }
}

fn guid_of(candidate: &TorrentCandidate) -> String {
    candidate
        .guid
        .clone()
        .unwrap_or_else(|| GUID_MISSING.to_string())
}
