//! CSV export and import of recorded entries.
//!
//! Files carry a `date,metric,value` header followed by one row per entry
//! in recording order, `\n` terminated.

use crate::core::store::EntryStore;
use crate::error::{Result, TrackerError};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Column names, in file order.
pub const CSV_HEADER: [&str; 3] = ["date", "metric", "value"];

/// Write every entry to `filename`, replacing any existing file.
///
/// Rows are written to a uniquely named temporary file in the target's
/// directory and renamed into place once flushed, so a failed export never
/// leaves a truncated file at `filename`. The temporary file is removed
/// when the export fails.
pub fn export_csv(entries: &EntryStore, filename: impl AsRef<Path>) -> Result<()> {
    let path = filename.as_ref();

    if let Err(e) = write_and_persist(entries, path) {
        tracing::warn!(path = %path.display(), error = %e, "export failed");
        return Err(e);
    }

    tracing::info!(rows = entries.len(), path = %path.display(), "exported entries");
    Ok(())
}

/// Read a file produced by [`export_csv`] into a new store.
///
/// Every row is validated exactly like a manual entry; the first invalid
/// row aborts the import.
pub fn import_csv(filename: impl AsRef<Path>) -> Result<EntryStore> {
    let path = filename.as_ref();
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let headers = reader.headers()?;
    if headers.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(TrackerError::MalformedHeader {
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut entries = EntryStore::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        entries
            .add(&record[0], &record[1], &record[2])
            .map_err(|e| TrackerError::InvalidRecord {
                path: path.to_path_buf(),
                line,
                source: Box::new(e),
            })?;
    }

    tracing::info!(rows = entries.len(), path = %path.display(), "imported entries");
    Ok(entries)
}

fn write_and_persist(entries: &EntryStore, path: &Path) -> Result<()> {
    let mut staging = NamedTempFile::new_in(staging_dir(path)?)?;
    write_rows(entries, &mut staging)?;
    staging.as_file().sync_all()?;

    // Dropping an unpersisted NamedTempFile deletes it.
    staging.persist(path).map_err(|e| TrackerError::Io(e.error))?;
    Ok(())
}

fn write_rows(entries: &EntryStore, out: impl Write) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        writer.write_record([
            entry.date_string(),
            entry.metric().to_string(),
            entry.value().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Directory the staging file is created in: the target's own directory.
fn staging_dir(path: &Path) -> Result<&Path> {
    if path.file_name().is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("export path has no file name: {}", path.display()),
        )
        .into());
    }

    Ok(match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    })
}
