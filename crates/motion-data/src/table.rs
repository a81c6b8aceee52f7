//! Persisted flat table: `;`-separated, UTF-8 with a byte-order mark.
//!
//! The header is always [`TABLE_COLUMNS`] in that order. Missing numerics
//! are written as empty fields and read back as `None`.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use motion_core::error::{LogError, Result};
use motion_core::models::{FlatRow, TABLE_COLUMNS};
use tracing::debug;

/// Field separator of the persisted table.
pub const DELIMITER: u8 = b';';

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Path the table for `input` is written to: same stem, `.csv` extension.
pub fn table_path_for(input: &Path) -> PathBuf {
    input.with_extension("csv")
}

/// Write `rows` to `path`.
///
/// The table is first written to a sibling `*.csv.tmp` file and then renamed
/// into place, so an interrupted or failed write never leaves a partial table
/// at `path`.
pub fn write_table(path: &Path, rows: &[FlatRow]) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    let write_err = |source: std::io::Error| LogError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let result = File::create(&tmp)
        .and_then(|file| {
            let mut out = BufWriter::new(file);
            write_rows(&mut out, rows).map_err(std::io::Error::from)?;
            out.flush()
        })
        .and_then(|_| std::fs::rename(&tmp, path));

    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Serialise `rows` (BOM, header, one line per row) into `out`.
pub fn write_rows<W: Write>(mut out: W, rows: &[FlatRow]) -> csv::Result<()> {
    out.write_all(UTF8_BOM)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(out);
    writer.write_record(TABLE_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read every row of the table at `path`.
///
/// * absent file              → [`LogError::MissingFile`]
/// * unreadable file          → [`LogError::FileRead`]
/// * bad header / bad value   → [`LogError::MalformedTable`]
///
/// A table holding only the header yields an empty vector.
pub fn read_table(path: &Path) -> Result<Vec<FlatRow>> {
    if !path.is_file() {
        return Err(LogError::MissingFile(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| LogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_rows(bytes.as_slice(), path)?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse table rows from `input`. `path` is only used in error messages.
pub fn read_rows<R: Read>(mut input: R, path: &Path) -> Result<Vec<FlatRow>> {
    let malformed = |reason: String| LogError::MalformedTable {
        path: path.to_path_buf(),
        reason,
    };

    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|source| LogError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_reader(body);

    let headers = reader.headers().map_err(|e| malformed(e.to_string()))?.clone();
    if let Some(missing) = TABLE_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(malformed(format!("missing column \"{}\"", missing)));
    }

    reader
        .deserialize::<FlatRow>()
        .map(|record| record.map_err(|e| malformed(e.to_string())))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
