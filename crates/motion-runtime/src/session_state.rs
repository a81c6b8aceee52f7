//! Shell session state.
//!
//! Holds the most recently converted or loaded table. The shell owns one
//! [`SessionState`] for the lifetime of the process and passes it into every
//! action; a successful convert/load replaces the table, a failed one leaves
//! it untouched, and chart actions only read it.

use std::path::{Path, PathBuf};

use motion_core::error::{LogError, Result};

/// How the current table was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOrigin {
    /// Written by converting a JSON document.
    Converted,
    /// An existing table picked by the user.
    Loaded,
}

/// Per-process state threaded through the shell actions.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionState {
    /// Current table and how it was set.
    current: Option<(PathBuf, TableOrigin)>,
    /// Number of successful replacements since startup.
    generation: u64,
}

impl SessionState {
    /// An empty state: no table yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the current table, if any.
    pub fn current_table(&self) -> Option<&Path> {
        self.current.as_ref().map(|(p, _)| p.as_path())
    }

    /// How the current table was set, if any.
    pub fn origin(&self) -> Option<TableOrigin> {
        self.current.as_ref().map(|(_, o)| *o)
    }

    /// Times the table has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Path of the current table, or [`LogError::NoTableLoaded`].
    pub fn require_table(&self) -> Result<&Path> {
        self.current_table().ok_or(LogError::NoTableLoaded)
    }

    /// Replace the current table. Last write wins.
    pub fn set_table(&mut self, path: PathBuf, origin: TableOrigin) {
        tracing::debug!(path = %path.display(), ?origin, "current table replaced");
        self.current = Some((path, origin));
        self.generation += 1;
    }
}
