//! Findings about analyzed source, carried as immutable data.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use vellum_source::SourceRange;

/// A finding produced while scanning or resolving a document.
///
/// Warnings are values: they are never thrown and never change after
/// construction. A warning normally points at a [`SourceRange`]; one without
/// a range is a tooling bug and is printed with an internal-error notice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Warning {
    code: String,
    message: String,
    severity: Severity,
    source_range: Option<SourceRange>,
}

impl Warning {
    /// Creates a warning with an explicit severity.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        source_range: Option<SourceRange>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
            source_range,
        }
    }

    /// Creates an [`Severity::Error`] warning at `range`.
    pub fn error(code: impl Into<String>, message: impl Into<String>, range: SourceRange) -> Self {
        Self::new(code, message, Severity::Error, Some(range))
    }

    /// Creates a [`Severity::Warning`] warning at `range`.
    pub fn warning(code: impl Into<String>, message: impl Into<String>, range: SourceRange) -> Self {
        Self::new(code, message, Severity::Warning, Some(range))
    }

    /// Creates an [`Severity::Info`] warning at `range`.
    pub fn info(code: impl Into<String>, message: impl Into<String>, range: SourceRange) -> Self {
        Self::new(code, message, Severity::Info, Some(range))
    }

    /// The short kebab-case code, e.g. `"empty-import-url"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The range the warning points at, if any.
    pub fn source_range(&self) -> Option<&SourceRange> {
        self.source_range.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_source::Position;

    fn range() -> SourceRange {
        SourceRange::new("a.html", Position::new(1, 2), Position::new(1, 5))
    }

    #[test]
    fn constructors_set_severity() {
        assert_eq!(Warning::error("c", "m", range()).severity(), Severity::Error);
        assert_eq!(Warning::warning("c", "m", range()).severity(), Severity::Warning);
        assert_eq!(Warning::info("c", "m", range()).severity(), Severity::Info);
    }

    #[test]
    fn accessors() {
        let w = Warning::warning("unknown-element", "no such element", range());
        assert_eq!(w.code(), "unknown-element");
        assert_eq!(w.message(), "no such element");
        assert_eq!(w.source_range(), Some(&range()));
    }

    #[test]
    fn range_may_be_absent() {
        let w = Warning::new("c", "m", Severity::Info, None);
        assert!(w.source_range().is_none());
    }

    #[test]
    fn json_roundtrip() {
        let w = Warning::error("parse-error", "unexpected '<'", range());
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"severity\":\"error\""));
        let back: Warning = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
