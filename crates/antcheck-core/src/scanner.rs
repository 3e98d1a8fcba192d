//! Input folder scanner.
//!
//! Walks the configured folders for video files, drops bonus content and
//! unopenable paths, and hands a sorted path list to the normalizer.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::AntCheckError;

/// Windows MAX_PATH; paths beyond it are a common cause of open failures.
const PATH_LENGTH_HINT: usize = 260;

/// Scan every input folder for film files.
///
/// Files under a parent directory literally named `Extras` are bonus
/// content and excluded before normalization. Unopenable paths are warned
/// about and dropped; an empty overall result is fatal because a run with
/// nothing to check is a misconfiguration, not a valid outcome.
pub fn scan_film_paths(input_folders: &[String]) -> Result<Vec<PathBuf>, AntCheckError> {
    let mut paths = Vec::new();

    for folder in input_folders {
        let folder_path = Path::new(folder);
        if !folder_path.is_dir() {
            warn!(path = %folder, "Input folder does not exist, skipping");
            continue;
        }
        info!(path = %folder, "Scanning input folder");

        for entry in WalkDir::new(folder_path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !has_video_extension(path) || in_extras_folder(path) {
                continue;
            }
            if !is_openable(path) {
                continue;
            }
            paths.push(path.to_path_buf());
        }
    }

    if paths.is_empty() {
        return Err(AntCheckError::Scan(
            "No films were found, check the input folders in the config file".into(),
        ));
    }

    paths.sort();
    info!(count = paths.len(), "Found film files");
    Ok(paths)
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            antcheck_parse::tokenizer::EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn in_extras_folder(path: &Path) -> bool {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|name| name == "Extras")
        .unwrap_or(false)
}

fn is_openable(path: &Path) -> bool {
    if std::fs::File::open(path).is_ok() {
        return true;
    }
    let mut message = format!(
        "{} could not be opened or does not exist, skipping.",
        path.display()
    );
    if path.as_os_str().len() > PATH_LENGTH_HINT {
        message.push_str(
            " This may be caused by a file path exceeding 260 characters. \
             Try shortening the folder or file name.",
        );
    }
    warn!("{message}");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn finds_video_files_sorted() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "Zodiac.2007.mkv");
        create_file(dir.path(), "Heat.1995.mkv");
        create_file(dir.path(), "notes.txt");

        let paths = scan_film_paths(&[dir.path().to_string_lossy().into_owned()]).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Heat.1995.mkv", "Zodiac.2007.mkv"]);
    }

    #[test]
    fn excludes_extras_folders() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "Film.2020.mkv");
        let extras = dir.path().join("Extras");
        std::fs::create_dir(&extras).unwrap();
        create_file(&extras, "Deleted.Scenes.mkv");

        let paths = scan_film_paths(&[dir.path().to_string_lossy().into_owned()]).unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("Film.2020.mkv"));
    }

    #[test]
    fn empty_result_is_fatal() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "notes.txt");

        let result = scan_film_paths(&[dir.path().to_string_lossy().into_owned()]);
        assert!(matches!(result, Err(AntCheckError::Scan(_))));
    }

    #[test]
    fn missing_folder_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "Film.2020.mkv");

        let paths = scan_film_paths(&[
            "/nonexistent/folder".into(),
            dir.path().to_string_lossy().into_owned(),
        ])
        .unwrap();
        assert_eq!(paths.len(), 1);
    }
}
