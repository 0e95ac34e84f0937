//! Table layout and whole-file I/O for the text tables.
//!
//! Both tables are CSV with a fixed header row. The items table is only
//! ever replaced as a whole: rows go to a temporary file next to the
//! target, which is synced and then renamed over it. A crash mid-write
//! leaves either the old table or the new one, never a torn mix.

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::codec::Row;
use crate::error::Result;

/// Header of the items table.
pub const ITEM_HEADER: [&str; 5] = ["item_type", "stock_code", "quantity", "price", "brand"];

/// Header of the sales ledger.
pub const SALES_HEADER: [&str; 6] = ["date", "stock_code", "quantity", "price", "brand", "revenue"];

/// Create a header-only table at `path` if nothing is there yet.
///
/// Idempotent. Returns `true` if the file was created by this call.
pub fn ensure_table(path: &Path, header: &[&str]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_table_atomic(path, header, &[])?;
    info!(path = %path.display(), "created table");
    Ok(true)
}

/// Read every record after the header row.
///
/// Records keep whatever number of fields they were stored with; blank
/// lines are skipped. Records that are not valid UTF-8 come back as
/// undecodable rows rather than failing the read. A first line that is not
/// `header` is logged and kept as a record, so a rewrite does not drop it.
pub fn read_table(path: &Path, header: &[&str]) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (index, record) in reader.byte_records().enumerate() {
        let record = record?;
        if index == 0 {
            if record.iter().eq(header.iter().map(|h| h.as_bytes())) {
                continue;
            }
            warn!(
                path = %path.display(),
                found = ?record,
                "unexpected table header, keeping it as a record"
            );
        }

        let row = Row::from(&record);
        if !row.is_utf8() {
            warn!(
                path = %path.display(),
                line = record.position().map(|p| p.line()),
                "record is not valid UTF-8"
            );
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Replace the table at `path` with `header` followed by `rows`.
pub fn write_table_atomic(path: &Path, header: &[&str], rows: &[Row]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(tmp.as_file_mut());
        writer.write_record(header)?;
        for row in rows {
            row.write_to(&mut writer)?;
        }
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    if let Ok(dir) = fs::File::open(dir) {
        let _ = dir.sync_all();
    }
    Ok(())
}
