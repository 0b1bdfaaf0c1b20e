//! The seam between per-language scanners and the model.

use crate::document::Document;
use crate::language::DocumentLanguage;
use crate::scanned::ScannedFeature;
use crate::syntax::SyntaxTree;
use std::path::Path;
use vellum_diagnostics::Warning;
use vellum_source::LocationOffset;

/// What one scanner found in one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Scanned features in the order they were found.
    pub features: Vec<ScannedFeature>,
    /// Document-level problems not tied to any one feature.
    pub warnings: Vec<Warning>,
}

impl ScanResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.warnings.is_empty()
    }

    /// Appends `other`, keeping order.
    pub fn extend(&mut self, other: ScanResult) {
        self.features.extend(other.features);
        self.warnings.extend(other.warnings);
    }
}

/// A per-language scanner.
///
/// A scanner owns both halves of reading a language: turning text into a
/// [`SyntaxTree`] and walking that tree for [`ScannedFeature`]s. Scanners are
/// shared across threads and keep no per-document state.
pub trait Scanner: Send + Sync {
    /// Short name used in logs, e.g. `"html-script"`.
    fn name(&self) -> &str;

    /// The language of documents this scanner reads.
    fn language(&self) -> DocumentLanguage;

    /// Parses `contents` into a syntax tree.
    ///
    /// `offset` is set for inline documents; positions in the tree must then
    /// be expressed in the coordinates of the containing file at `url`.
    /// Parse problems are returned as warnings, never as errors.
    fn parse(
        &self,
        url: &Path,
        contents: &str,
        offset: Option<LocationOffset>,
    ) -> (SyntaxTree, Vec<Warning>) {
        let _ = (url, contents, offset);
        (SyntaxTree::new(), Vec::new())
    }

    /// Walks a parsed document and reports what it finds.
    fn scan(&self, document: &Document) -> ScanResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanned::ScannedFunction;
    use vellum_source::{Position, SourceRange};

    struct Nothing;

    impl Scanner for Nothing {
        fn name(&self) -> &str {
            "nothing"
        }

        fn language(&self) -> DocumentLanguage {
            DocumentLanguage::Css
        }

        fn scan(&self, _document: &Document) -> ScanResult {
            ScanResult::new()
        }
    }

    #[test]
    fn default_parse_is_an_empty_tree() {
        let (tree, warnings) = Nothing.parse(Path::new("a.css"), "p {}", None);
        assert!(tree.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn scan_results_extend_in_order() {
        let range = SourceRange::point("a.js", Position::new(0, 0));
        let mut first = ScanResult::new();
        first
            .features
            .push(ScannedFeature::Function(ScannedFunction::new("a", range.clone())));
        let mut second = ScanResult::new();
        second
            .features
            .push(ScannedFeature::Function(ScannedFunction::new("b", range.clone())));
        second.warnings.push(Warning::info("note", "m", range));

        first.extend(second);
        assert_eq!(first.features.len(), 2);
        assert_eq!(first.warnings.len(), 1);
        assert!(!first.is_empty());
        assert!(ScanResult::new().is_empty());
    }
}
