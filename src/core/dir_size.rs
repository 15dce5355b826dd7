use crate::core::dir_iter::DirIter;
use crate::core::metadata::{file_size, is_directory};
use crate::core::path::join;
use crate::error::FsResult;
use crate::observability::DiagnosticSink;
use std::path::Path;
use tracing::{debug, warn};

/// Sum of the sizes of the regular files directly inside `directory`.
///
/// Not recursive: subdirectories and other non-regular entries count as 0.
/// A path that is not a directory yields `Ok(0)` and a diagnostic. Only a
/// failure to open the directory is returned as an error; a read error
/// part-way through stops the scan and keeps the partial total.
pub fn calculate_directory_size(
    directory: impl AsRef<Path>,
    diagnostics: &dyn DiagnosticSink,
) -> FsResult<u64> {
    let directory = directory.as_ref();
    if !is_directory(directory) {
        diagnostics.write_diagnostic(&format!("Path is not a directory: {}", directory.display()));
        return Ok(0);
    }

    let mut iter = DirIter::start(directory)?;
    let mut total = 0u64;

    while let Some(name) = iter.entry_name() {
        if name != "." && name != ".." {
            total += file_size(join(directory, name), diagnostics);
        }
        if !iter.advance() {
            break;
        }
    }

    if let Some(e) = iter.take_error() {
        warn!("Directory size of {} may be incomplete: {}", directory.display(), e);
    }
    iter.end();

    debug!("Directory size of {}: {} bytes", directory.display(), total);
    Ok(total)
}
