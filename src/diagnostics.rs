//! Diagnostics returned alongside parse results.
//!
//! The engine does not log. Notable events (fallbacks taken, empty
//! articles, skipped images) are collected here and handed back to the
//! caller, which decides whether to log them.

use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Fine-grained detail, such as each image URL discovered.
    Debug,
    /// Expected but noteworthy outcome, such as an article with no apps.
    Info,
    /// Suspicious input that was handled anyway.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
        })
    }
}

/// One diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub level: Level,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Creates a debug-level diagnostic.
    pub fn debug(message: impl Into<String>) -> Self {
        Self {
            level: Level::Debug,
            message: message.into(),
        }
    }

    /// Creates an info-level diagnostic.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    /// Creates a warning-level diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    /// Forwards this diagnostic to `tracing` at the matching level.
    pub fn emit(&self) {
        match self.level {
            Level::Debug => tracing::debug!("{}", self.message),
            Level::Info => tracing::info!("{}", self.message),
            Level::Warning => tracing::warn!("{}", self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
