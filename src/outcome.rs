//! Recovered values with diagnostics
//!
//! Normalisation steps never fail. When they substitute a default for
//! unusable input they say so through a [`Diagnostic`] carried alongside the
//! value, and callers decide whether that deserves attention.

use std::fmt;

/// Which step produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Turning user input into a pattern set
    Patterns,
    /// Validating or creating the output directory
    Directory,
    /// Resolving patterns against the filesystem
    Discovery,
    /// Computing destination paths
    Destination,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Patterns => "patterns",
            Stage::Directory => "directory",
            Stage::Discovery => "discovery",
            Stage::Destination => "destination",
        };
        f.write_str(name)
    }
}

/// Explanation of a default that replaced the caller's input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
}

impl Diagnostic {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Diagnostic {
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

/// A value that is always usable, plus notes on how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Normalized<T> {
    /// Wraps a value that needed no recovery
    pub fn clean(value: T) -> Self {
        Normalized {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// Wraps a substituted value together with the reason for it
    pub fn recovered(value: T, diagnostic: Diagnostic) -> Self {
        log::warn!("{diagnostic}");
        Normalized {
            value,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Splits into the value and its diagnostics
    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}
