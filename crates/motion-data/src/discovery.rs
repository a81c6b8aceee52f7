//! Input discovery for batch conversion.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Find all `.json` files recursively under `dir`, sorted by path.
pub fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Input path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_json(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Expand `inputs` into the list of documents to convert.
///
/// Directories contribute every `.json` file beneath them; any other path is
/// kept as given (so a missing file still surfaces as a read error later).
/// Order follows `inputs`, duplicates are dropped.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::new();
    for input in inputs {
        let found = if input.is_dir() {
            find_json_files(input)
        } else {
            vec![input.clone()]
        };
        for path in found {
            if !out.contains(&path) {
                out.push(path);
            }
        }
    }
    out
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_json_files_recursive_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("luis");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join("b_2024-05-03-0900.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("a_2024-05-02-1030.JSON"), "{}").unwrap();
        std::fs::write(nested.join("luis_2024-05-01-0800.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "").unwrap();
        std::fs::write(tmp.path().join("a_2024-05-02-1030.csv"), "").unwrap();

        let files = find_json_files(tmp.path());

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "a_2024-05-02-1030.JSON",
                "b_2024-05-03-0900.json",
                "luis_2024-05-01-0800.json",
            ]
        );
    }

    #[test]
    fn test_find_json_files_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(find_json_files(&tmp.path().join("absent")).is_empty());
    }

    #[test]
    fn test_expand_inputs_mixes_files_and_dirs() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("batch");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("x.json"), "{}").unwrap();
        let single = tmp.path().join("single.json");
        std::fs::write(&single, "{}").unwrap();

        let expanded = expand_inputs(&[single.clone(), dir.clone(), dir.join("x.json")]);

        assert_eq!(expanded, vec![single, dir.join("x.json")]);
    }

    #[test]
    fn test_expand_inputs_keeps_missing_file() {
        let missing = PathBuf::from("/definitely/not/here.json");
        assert_eq!(expand_inputs(&[missing.clone()]), vec![missing]);
    }
}
