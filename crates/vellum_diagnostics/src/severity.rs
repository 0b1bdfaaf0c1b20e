//! Warning severities and their fixed presentation.

use ansi_term::Colour;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How important a [`Warning`](crate::Warning) is.
///
/// The set is closed: every match on `Severity` in this workspace is written
/// without a wildcard arm so that adding a variant fails to compile until
/// each presentation site handles it.
///
/// The derived ordering goes from most to least severe, so sorting ascending
/// puts errors first. It carries no other meaning.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    /// A definite defect in the analyzed source.
    Error,
    /// A likely defect that should be reviewed.
    Warning,
    /// Informational only.
    Info,
}

/// A severity name outside the closed set reached the analyzer.
///
/// This is a tooling bug, not a finding about analyzed source, and is kept
/// apart from [`Warning`](crate::Warning) so callers can treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity value - {0} - encountered while printing warning")]
pub struct UnknownSeverity(pub String);

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Returns the lowercase name used in summary lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Returns the terminal colour this severity is painted with.
    pub fn colour(self) -> Colour {
        match self {
            Severity::Error => Colour::Red,
            Severity::Warning => Colour::Yellow,
            Severity::Info => Colour::Green,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = UnknownSeverity;

    fn try_from(s: String) -> Result<Self, UnknownSeverity> {
        s.parse()
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}
