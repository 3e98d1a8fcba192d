//! Seam for container-level technical metadata.
//!
//! Real media parsing is out of scope; the pipeline only consumes a
//! per-file mapping of attribute name to value. [`FsInspector`] is the
//! stock implementation and reads what the filesystem alone can supply.

use std::path::Path;

/// Technical metadata for one file. Absent values are normal, not errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaProbe {
    pub size_gb: Option<f64>,
    pub resolution: Option<String>,
    pub runtime_minutes: Option<u32>,
}

/// Extracts a [`MediaProbe`] for a file path.
pub trait MediaInspector {
    fn inspect(&self, path: &Path) -> MediaProbe;
}

/// Filesystem-backed inspector: supplies the file size and nothing else.
/// Resolution and runtime need a container parser, which richer
/// implementations can plug in behind the same trait.
#[derive(Debug, Default)]
pub struct FsInspector;

impl MediaInspector for FsInspector {
    fn inspect(&self, path: &Path) -> MediaProbe {
        MediaProbe {
            size_gb: std::fs::metadata(path).ok().map(|m| bytes_to_gb(m.len())),
            resolution: None,
            runtime_minutes: None,
        }
    }
}

/// Bytes to gigabytes, rounded to two decimal places for the table.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    (bytes as f64 / 1_073_741_824.0 * 100.0).round() / 100.0
}

/// Frame width to the usual resolution label.
pub fn resolution_label(width: u32) -> Option<&'static str> {
    match width {
        3840 => Some("2160p"),
        1920 => Some("1080p"),
        1280 => Some("720p"),
        720 => Some("480p"),
        _ => None,
    }
}
