//! Run state machine.
//!
//! scan -> normalize -> reconcile-with-prior -> early-exit check ->
//! partition (skip vs search) -> search + classify -> persist.
//!
//! Single-threaded by design: the catalog allows one request per two
//! seconds, so a sequential loop is as fast as anything parallel and
//! stays predictable and resumable.

use std::path::Path;

use antcheck_api::{CatalogSearch, MetadataLookup};
use tracing::info;

use crate::classifier;
use crate::config::AppConfig;
use crate::error::AntCheckError;
use crate::ledger::{self, Ledger};
use crate::media::MediaInspector;
use crate::models::FilmRecord;
use crate::normalizer;
use crate::resolver::{self, ResolveSettings};
use crate::scanner;

/// Outcome of one batch run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Every film is already a settled duplicate; nothing was searched
    /// and the persisted table was left untouched.
    AllDuplicates { total: usize },
    /// The table was searched, classified, and written.
    Completed {
        total: usize,
        searched: usize,
        skipped: usize,
    },
}

/// Run the whole batch. Fatal errors (config, catalog transport,
/// maintenance) abort the run with nothing written: a partially-searched
/// table would read as "confirmed not a duplicate" for films that were
/// never actually checked.
pub async fn run_batch<C, M, I>(
    config: &AppConfig,
    catalog: &C,
    metadata: Option<&M>,
    inspector: &I,
) -> Result<RunOutcome, AntCheckError>
where
    C: CatalogSearch,
    M: MetadataLookup,
    I: MediaInspector,
{
    config.validate()?;

    let paths = scanner::scan_film_paths(&config.scan.input_folders)?;
    let fresh: Vec<FilmRecord> = paths
        .iter()
        .filter_map(|path| normalizer::normalize_file(path, inspector))
        .collect();
    info!(count = fresh.len(), "Normalized film files");

    let ledger = Ledger::new(Path::new(&config.scan.output_folder));
    let prior = ledger.load_prior();
    let mut records = ledger::merge(&fresh, &prior);

    if ledger::all_duplicates(&records) {
        info!(
            count = records.len(),
            "All films have already been searched and are duplicates, ending the run early"
        );
        return Ok(RunOutcome::AllDuplicates {
            total: records.len(),
        });
    }

    let settings = ResolveSettings {
        fuzzy_threshold: config.tmdb.fuzzy_threshold,
        year_window: config.tmdb.year_window,
    };

    let mut searched = 0;
    let mut skipped = 0;
    for record in &mut records {
        if let Some(reason) = record.skip_reason() {
            info!(title = %record.title, reason = %reason, "Skipping film settled in a previous run");
            skipped += 1;
            continue;
        }

        info!(title = %record.title, "Searching on ANT");
        let candidates =
            resolver::resolve(catalog, metadata, &record.title, record.year, &settings).await?;
        let status = classifier::classify(
            record.file_name(),
            &record.resolution,
            &record.codec,
            &record.source,
            &record.release_group,
            &config.classifier.banned_groups,
            &candidates,
        );
        info!(title = %record.title, status = %status, "Classified");
        record.status = status.to_string();
        searched += 1;
    }

    if skipped > 0 {
        info!(
            count = skipped,
            "Skipped films already settled in the previous output file"
        );
    }

    ledger.write(&records)?;
    Ok(RunOutcome::Completed {
        total: records.len(),
        searched,
        skipped,
    })
}
