//! The persisted result table.
//!
//! One CSV, read once at run start and written once at run end. Column
//! identity decides schema compatibility: a table from an older version
//! is copied aside as a backup and ignored rather than risk
//! misinterpreting columns whose meaning changed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::AntCheckError;
use crate::models::FilmRecord;

pub const FILE_NAME: &str = "Film list.csv";
pub const BACKUP_FILE_NAME: &str = "Film list old version backup.csv";

/// The exact column set this version reads and writes.
pub const HEADERS: [&str; 8] = [
    "Full file path",
    "Parsed film title",
    "Film size (GB)",
    "Resolution",
    "Codec",
    "Source",
    "Release group",
    "Already on ANT?",
];

pub struct Ledger {
    csv_path: PathBuf,
    backup_path: PathBuf,
}

impl Ledger {
    pub fn new(output_folder: &Path) -> Self {
        Self {
            csv_path: output_folder.join(FILE_NAME),
            backup_path: output_folder.join(BACKUP_FILE_NAME),
        }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Read the prior run's table. Missing file, schema drift, and
    /// unreadable rows all resolve to "no prior data"; the latter two
    /// leave a backup copy behind.
    pub fn load_prior(&self) -> Vec<FilmRecord> {
        if !self.csv_path.is_file() {
            info!(
                path = %self.csv_path.display(),
                "No existing output file found, processing films from scratch"
            );
            return Vec::new();
        }
        info!(path = %self.csv_path.display(), "Found an existing output file");

        match self.read_records() {
            Ok(Some(records)) => records,
            Ok(None) => {
                self.backup_and_warn("it does not contain the required columns");
                Vec::new()
            }
            Err(err) => {
                self.backup_and_warn(&format!("it could not be read: {err}"));
                Vec::new()
            }
        }
    }

    /// `Ok(None)` means the header set did not match the current schema.
    fn read_records(&self) -> Result<Option<Vec<FilmRecord>>, csv::Error> {
        let mut reader = csv::Reader::from_path(&self.csv_path)?;
        let headers: Vec<&str> = reader.headers()?.iter().collect();
        if headers != HEADERS {
            return Ok(None);
        }
        let records = reader
            .deserialize()
            .collect::<Result<Vec<FilmRecord>, _>>()?;
        Ok(Some(records))
    }

    fn backup_and_warn(&self, reason: &str) {
        warn!(
            "The existing file was created by an old version of antcheck and is \
             being skipped because {reason}. A backup is kept at {}; delete it if \
             you don't need it.",
            self.backup_path.display()
        );
        if let Err(err) = std::fs::copy(&self.csv_path, &self.backup_path) {
            warn!("Could not create backup copy: {err}");
        }
    }

    /// Write the table, sorted by parsed title. An empty table writes
    /// nothing; a missing output directory is created.
    pub fn write(&self, records: &[FilmRecord]) -> Result<(), AntCheckError> {
        if records.is_empty() {
            warn!("The film list is empty, no file is being created");
            return Ok(());
        }

        if let Some(parent) = self.csv_path.parent() {
            if !parent.is_dir() {
                info!(path = %parent.display(), "Output directory not found, creating it");
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut sorted: Vec<&FilmRecord> = records.iter().collect();
        sorted.sort_by(|a, b| a.title.cmp(&b.title));

        info!(path = %self.csv_path.display(), "Writing list of films");
        let mut writer = csv::Writer::from_path(&self.csv_path)?;
        for record in sorted {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Reconcile this run's fresh table with the prior run's, keyed by parsed
/// title. Several local copies of one film collapse to a single row, the
/// last one scanned winning. The fresh row supplies the identity and
/// technical metadata (newly discovered values supersede stale ones); the
/// prior row supplies the status. Rows only the prior table knows are
/// carried over.
pub fn merge(fresh: &[FilmRecord], prior: &[FilmRecord]) -> Vec<FilmRecord> {
    let mut by_title: HashMap<&str, &FilmRecord> = HashMap::new();
    for record in fresh {
        by_title.insert(record.title.as_str(), record);
    }

    let mut merged: Vec<FilmRecord> = by_title
        .values()
        .map(|&record| {
            let mut record = record.clone();
            if record.status.is_empty() {
                if let Some(previous) = prior.iter().find(|p| p.title == record.title) {
                    record.status = previous.status.clone();
                }
            }
            record
        })
        .collect();

    for previous in prior {
        if !by_title.contains_key(previous.title.as_str()) {
            merged.push(previous.clone());
        }
    }

    merged.sort_by(|a, b| a.title.cmp(&b.title));
    merged
}

/// Early-exit predicate: every record is a settled duplicate, so another
/// search pass (and another CSV rewrite) would change nothing.
pub fn all_duplicates(records: &[FilmRecord]) -> bool {
    !records.is_empty() && records.iter().all(|r| r.status.starts_with("Duplicate"))
}
