//! Parallel file loading
//!
//! Parses every discovered file on the rayon pool and concatenates the
//! results in file order, so the relative order of orders is stable.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::LoadResult;
use crate::error::AppError;
use crate::source::json::ParsedBatch;

/// Parse `files` in parallel with `parse_file` and merge into one [`LoadResult`].
///
/// The first `Err` from `parse_file` aborts the load.
pub(crate) fn load_files<F>(
    source_name: &str,
    files: &[PathBuf],
    parse_file: F,
) -> Result<LoadResult, AppError>
where
    F: Fn(&Path) -> Result<ParsedBatch, AppError> + Send + Sync,
{
    let load_start = Instant::now();

    if files.is_empty() {
        tracing::warn!(source = source_name, "No order files found");
        return Ok(LoadResult::default());
    }

    tracing::info!(
        source = source_name,
        files = files.len(),
        "Scanning order files"
    );

    let batches = files
        .par_iter()
        .map(|path| parse_file(path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut result = LoadResult::default();
    for batch in batches {
        result.skipped += batch.skipped;
        result.orders.extend(batch.orders);
    }
    result.valid = result.orders.len();
    result.elapsed_ms = load_start.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        valid = result.valid,
        skipped = result.skipped,
        elapsed_ms = result.elapsed_ms,
        "Parsed {} files",
        files.len()
    );

    Ok(result)
}
