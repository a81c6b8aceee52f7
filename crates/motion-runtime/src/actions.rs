//! Shell actions: convert, load and chart.
//!
//! Each action takes the [`SessionState`] explicitly and only mutates it after
//! the underlying operation succeeded.

use std::path::{Path, PathBuf};

use motion_core::error::{LogError, Result};
use motion_data::aggregator::ChartBundle;
use motion_data::conversion::{convert_file, ConversionReport};
use motion_data::discovery::expand_inputs;
use motion_data::table::read_table;

use crate::session_state::{SessionState, TableOrigin};

/// Result of loading an existing table.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub path: PathBuf,
    pub rows: usize,
}

/// Result of converting several inputs.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successful conversions in input order.
    pub converted: Vec<ConversionReport>,
    /// Inputs that failed, with the reason.
    pub failed: Vec<(PathBuf, LogError)>,
}

impl BatchOutcome {
    /// `true` when nothing was converted and nothing failed.
    pub fn is_empty(&self) -> bool {
        self.converted.is_empty() && self.failed.is_empty()
    }
}

/// Convert one JSON document and make its table current.
pub fn convert_json(state: &mut SessionState, input: &Path) -> Result<ConversionReport> {
    let report = convert_file(input)?;
    state.set_table(report.output.clone(), TableOrigin::Converted);
    Ok(report)
}

/// Convert every document reachable from `inputs` (files or directories).
///
/// Failures are collected per file and do not stop the batch. The last
/// successful table becomes current.
pub fn convert_batch(state: &mut SessionState, inputs: &[PathBuf]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for input in expand_inputs(inputs) {
        match convert_json(state, &input) {
            Ok(report) => outcome.converted.push(report),
            Err(e) => {
                tracing::warn!("Conversion of {} failed: {}", input.display(), e);
                outcome.failed.push((input, e));
            }
        }
    }
    outcome
}

/// Validate an existing table and make it current.
pub fn load_table(state: &mut SessionState, path: &Path) -> Result<LoadReport> {
    let rows = read_table(path)?;
    state.set_table(path.to_path_buf(), TableOrigin::Loaded);
    tracing::info!("Loaded {} ({} rows)", path.display(), rows.len());
    Ok(LoadReport {
        path: path.to_path_buf(),
        rows: rows.len(),
    })
}

/// Build every chart view from the current table.
pub fn chart(state: &SessionState) -> Result<ChartBundle> {
    chart_table(state.require_table()?)
}

/// Build every chart view from the table at `path`.
pub fn chart_table(path: &Path) -> Result<ChartBundle> {
    let rows = read_table(path)?;
    Ok(ChartBundle::from_rows(&rows))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use motion_core::models::Modality;
    use tempfile::TempDir;

    const DOC: &str = r#"{
        "userName": "ana",
        "flexionExtension": [
            {"assignedGameTime": 60, "totalGameTimeFE": 30, "movements": [
                {"movementType": "flexion", "Angle": 10, "timeStamp": 0.5},
                {"movementType": "extension", "Angle": 20, "timeStamp": 1.2}
            ]}
        ],
        "abduccionAduccion": []
    }"#;

    fn write_doc(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_convert_sets_current_table() {
        let tmp = TempDir::new().unwrap();
        let input = write_doc(tmp.path(), "ana.json", DOC);
        let mut state = SessionState::new();

        let report = convert_json(&mut state, &input).unwrap();

        assert_eq!(state.current_table(), Some(report.output.as_path()));
        assert_eq!(state.origin(), Some(TableOrigin::Converted));
    }

    #[test]
    fn test_failed_convert_keeps_previous_table() {
        let tmp = TempDir::new().unwrap();
        let good = write_doc(tmp.path(), "ana.json", DOC);
        let empty = write_doc(tmp.path(), "empty.json", "{}");
        let mut state = SessionState::new();
        convert_json(&mut state, &good).unwrap();

        let err = convert_json(&mut state, &empty).unwrap_err();

        assert!(matches!(err, LogError::EmptyResult));
        assert_eq!(state.current_table(), Some(tmp.path().join("ana.csv").as_path()));
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn test_chart_without_table_is_no_table_loaded() {
        let state = SessionState::new();
        let err = chart(&state).unwrap_err();
        assert!(matches!(err, LogError::NoTableLoaded));
        assert!(err.is_warning());
    }

    #[test]
    fn test_chart_after_table_deleted_is_missing_file() {
        let tmp = TempDir::new().unwrap();
        let input = write_doc(tmp.path(), "ana.json", DOC);
        let mut state = SessionState::new();
        let report = convert_json(&mut state, &input).unwrap();
        std::fs::remove_file(&report.output).unwrap();

        let err = chart(&state).unwrap_err();
        assert!(matches!(err, LogError::MissingFile(_)));
    }

    #[test]
    fn test_convert_then_chart() {
        let tmp = TempDir::new().unwrap();
        let input = write_doc(tmp.path(), "ana.json", DOC);
        let mut state = SessionState::new();
        convert_json(&mut state, &input).unwrap();

        let bundle = chart(&state).unwrap();

        assert_eq!(bundle.movements_by_type.len(), 1);
        assert_eq!(bundle.movements_by_type[0].modality, Modality::FlexionExtension);
        assert_eq!(bundle.movements_by_type[0].count, 2);
        assert_eq!(bundle.movements_by_type[0].time, Some(30.0));
        assert_eq!(bundle.times[0].assigned, Some(60.0));
        assert_eq!(bundle.timelines.len(), 1);
    }

    #[test]
    fn test_load_table_validates_and_sets_state() {
        let tmp = TempDir::new().unwrap();
        let input = write_doc(tmp.path(), "ana.json", DOC);
        let mut scratch = SessionState::new();
        let table = convert_json(&mut scratch, &input).unwrap().output;

        let mut state = SessionState::new();
        let report = load_table(&mut state, &table).unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(state.origin(), Some(TableOrigin::Loaded));
    }

    #[test]
    fn test_load_missing_table_leaves_state_empty() {
        let tmp = TempDir::new().unwrap();
        let mut state = SessionState::new();
        let err = load_table(&mut state, &tmp.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LogError::MissingFile(_)));
        assert!(state.current_table().is_none());
    }

    #[test]
    fn test_load_malformed_table_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_doc(tmp.path(), "bad.csv", "a;b\n1;2\n");
        let mut state = SessionState::new();
        let err = load_table(&mut state, &path).unwrap_err();
        assert!(matches!(err, LogError::MalformedTable { .. }));
        assert!(state.current_table().is_none());
    }

    #[test]
    fn test_convert_batch_collects_failures() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("batch");
        std::fs::create_dir_all(&dir).unwrap();
        write_doc(&dir, "a.json", DOC);
        write_doc(&dir, "b.json", "{\"flexionExtension\": [{}]}");
        write_doc(&dir, "c.json", DOC);
        let mut state = SessionState::new();

        let outcome = convert_batch(&mut state, &[dir.clone()]);

        assert_eq!(outcome.converted.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, dir.join("b.json"));
        assert!(matches!(outcome.failed[0].1, LogError::MalformedInput(_)));
        assert_eq!(state.current_table(), Some(dir.join("c.csv").as_path()));
    }

    #[test]
    fn test_convert_batch_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let mut state = SessionState::new();
        let outcome = convert_batch(&mut state, &[tmp.path().to_path_buf()]);
        assert!(outcome.is_empty());
        assert!(state.current_table().is_none());
    }
}
