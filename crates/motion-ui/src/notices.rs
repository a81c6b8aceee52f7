use std::fmt;

use motion_core::error::LogError;

// ── NoticeLevel ──────────────────────────────────────────────────────────────

/// Severity of a message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Ok,
    Warning,
    Error,
}

impl NoticeLevel {
    /// Bracketed tag printed before the message.
    pub fn tag(self) -> &'static str {
        match self {
            NoticeLevel::Ok => "[ok]",
            NoticeLevel::Warning => "[warning]",
            NoticeLevel::Error => "[error]",
        }
    }
}

// ── Notice ───────────────────────────────────────────────────────────────────

/// One-line user-facing message with a severity tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Ok,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Notice for a failed action. Missing files and "nothing loaded yet"
    /// are warnings; everything else is an error.
    pub fn from_error(err: &LogError) -> Self {
        if err.is_warning() {
            Self::warning(err.to_string())
        } else {
            Self::error(err.to_string())
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.tag(), self.message)
    }
}
