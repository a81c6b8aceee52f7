use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the motion log tools.
#[derive(Error, Debug)]
pub enum LogError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be created, written or moved into place.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The session document is not valid JSON or lacks a required structure.
    #[error("Malformed session document: {0}")]
    MalformedInput(String),

    /// Flattening produced no rows, so there is no header to write.
    #[error("The session document contains no movements")]
    EmptyResult,

    /// The referenced table does not exist on disk.
    #[error("Table not found: {0}")]
    MissingFile(PathBuf),

    /// A chart was requested before any table was converted or loaded.
    #[error("No table loaded; convert a JSON file or load a CSV first")]
    NoTableLoaded,

    /// The persisted table has a bad header or a non-numeric value where a
    /// number is expected.
    #[error("Malformed table {path}: {reason}")]
    MalformedTable { path: PathBuf, reason: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LogError {
    /// `true` for failures the shell reports as a warning instead of an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, LogError::MissingFile(_) | LogError::NoTableLoaded)
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::MalformedInput(err.to_string())
    }
}

/// Convenience alias used throughout the motion crates.
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = LogError::FileRead {
            path: PathBuf::from("/some/ana_2024-05-02-1030.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("ana_2024-05-02-1030.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_file_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = LogError::FileWrite {
            path: PathBuf::from("/ro/out.csv"),
            source: io_err,
        };
        assert_eq!(err.to_string(), "Failed to write file /ro/out.csv: read-only");
    }

    #[test]
    fn test_error_display_empty_result() {
        assert_eq!(
            LogError::EmptyResult.to_string(),
            "The session document contains no movements"
        );
    }

    #[test]
    fn test_error_display_missing_file() {
        let err = LogError::MissingFile(PathBuf::from("/gone/table.csv"));
        assert_eq!(err.to_string(), "Table not found: /gone/table.csv");
    }

    #[test]
    fn test_error_display_malformed_table() {
        let err = LogError::MalformedTable {
            path: PathBuf::from("t.csv"),
            reason: "row 3: invalid float literal".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed table t.csv: row 3: invalid float literal"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = LogError::Config("unknown view".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown view");
    }

    #[test]
    fn test_warning_classification() {
        assert!(LogError::NoTableLoaded.is_warning());
        assert!(LogError::MissingFile(PathBuf::from("x.csv")).is_warning());
        assert!(!LogError::EmptyResult.is_warning());
        assert!(!LogError::MalformedInput("bad".into()).is_warning());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LogError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: LogError = json_err.into();
        assert!(matches!(err, LogError::MalformedInput(_)));
        assert!(err.to_string().starts_with("Malformed session document"));
    }
}
