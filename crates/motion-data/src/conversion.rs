//! JSON → CSV conversion pipeline.
//!
//! Reads one session document, flattens it and writes the table next to the
//! input, returning a [`ConversionReport`] for the shell to show.

use std::path::{Path, PathBuf};

use chrono::Utc;
use motion_core::error::{LogError, Result};
use motion_core::models::{FlatRow, Modality};
use serde::Serialize;
use tracing::info;

use crate::document::read_document;
use crate::flatten::flatten;
use crate::table::{table_path_for, write_table};

/// Outcome of one successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Source JSON document.
    pub input: PathBuf,
    /// Table that was written.
    pub output: PathBuf,
    /// Patient name from the document.
    pub user_name: String,
    /// Total rows written.
    pub rows: usize,
    /// Rows per modality, flexion-extension first.
    pub rows_by_modality: Vec<(Modality, usize)>,
    /// Sessions in the document, including ones with no movements.
    pub sessions: usize,
    /// RFC 3339 timestamp of the conversion.
    pub generated_at: String,
    /// Wall-clock seconds spent reading, flattening and writing.
    pub elapsed_seconds: f64,
}

/// Convert the document at `input` into a table at its `.csv` sibling.
///
/// 1. Read and parse the JSON document.
/// 2. Flatten it (fails with [`LogError::EmptyResult`] when it has no rows).
/// 3. Atomically write the table.
pub fn convert_file(input: &Path) -> Result<ConversionReport> {
    let started = std::time::Instant::now();

    let output = table_path_for(input);
    if output == input {
        return Err(LogError::Config(format!(
            "refusing to overwrite input {} with its table",
            input.display()
        )));
    }

    let document = read_document(input)?;
    let rows = flatten(&document)?;
    write_table(&output, &rows)?;

    let sessions = Modality::ALL
        .iter()
        .map(|m| document.sessions(*m).len())
        .sum();

    let report = ConversionReport {
        input: input.to_path_buf(),
        output,
        user_name: document.user_name.clone(),
        rows: rows.len(),
        rows_by_modality: count_by_modality(&rows),
        sessions,
        generated_at: Utc::now().to_rfc3339(),
        elapsed_seconds: started.elapsed().as_secs_f64(),
    };

    info!(
        "Converted {} → {} ({} rows, {} sessions)",
        report.input.display(),
        report.output.display(),
        report.rows,
        report.sessions
    );
    Ok(report)
}

fn count_by_modality(rows: &[FlatRow]) -> Vec<(Modality, usize)> {
    Modality::ALL
        .iter()
        .map(|m| (*m, rows.iter().filter(|r| r.modality == *m).count()))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
