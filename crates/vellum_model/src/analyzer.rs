//! Drives scanning and resolution for documents and their inline documents.

use crate::document::Document;
use crate::feature::InlineDocument;
use crate::ids::DocumentId;
use crate::language::DocumentLanguage;
use crate::resolve::{resolve_all, ResolutionMode};
use crate::scanned::{ScannedDocumentBackreference, ScannedFeature};
use crate::scanner::Scanner;
use crate::syntax::SyntaxTree;
use crate::table::DocumentTable;
use std::path::PathBuf;
use tracing::{debug, trace};
use vellum_common::{InternalError, VellumResult};
use vellum_source::LocationOffset;

/// Runs registered scanners over documents and resolves what they find.
///
/// For each document the analyzer parses the text, lets every scanner for the
/// document's language scan the finished tree, resolves all scanned features
/// against the document, and stores it in a [`DocumentTable`]. Each resolved
/// inline document then becomes a child document of its own, analyzed the
/// same way and linked back to its container.
pub struct Analyzer {
    scanners: Vec<Box<dyn Scanner>>,
    mode: ResolutionMode,
}

impl Analyzer {
    /// Creates an analyzer with no scanners.
    pub fn new(mode: ResolutionMode) -> Self {
        Self {
            scanners: Vec::new(),
            mode,
        }
    }

    /// Registers a scanner. Scanners for one language run in registration
    /// order; the first one registered also parses.
    pub fn register(&mut self, scanner: Box<dyn Scanner>) {
        debug!(scanner = scanner.name(), language = %scanner.language(), "registering scanner");
        self.scanners.push(scanner);
    }

    /// Returns the number of registered scanners.
    pub fn scanner_count(&self) -> usize {
        self.scanners.len()
    }

    /// The resolution mode in use.
    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    /// Analyzes a top-level file and its inline documents into `table`.
    pub fn analyze(
        &self,
        table: &mut DocumentTable,
        url: impl Into<PathBuf>,
        language: DocumentLanguage,
        contents: &str,
    ) -> VellumResult<DocumentId> {
        let document = self.build(url.into(), language, contents, None, Vec::new());
        let inline = inline_documents(&document);
        let id = table.insert(document);
        self.analyze_inline(table, id, inline)?;
        Ok(id)
    }

    /// Re-analyzes the top-level document `id` with new `contents`.
    ///
    /// The document keeps its id; its old inline documents are evicted and
    /// new ones are created from the new contents.
    pub fn reanalyze(
        &self,
        table: &mut DocumentTable,
        id: DocumentId,
        contents: &str,
    ) -> VellumResult<()> {
        let (url, language) = match table.get(id) {
            Some(doc) => (doc.url().to_path_buf(), doc.language()),
            None => {
                return Err(InternalError::new(format!(
                    "cannot re-analyze {id}: no such document"
                )))
            }
        };
        let document = self.build(url, language, contents, None, Vec::new());
        let inline = inline_documents(&document);
        table.replace(id, document)?;
        self.analyze_inline(table, id, inline)
    }

    fn analyze_inline(
        &self,
        table: &mut DocumentTable,
        container: DocumentId,
        inline: Vec<InlineDocument>,
    ) -> VellumResult<()> {
        for child in inline {
            let url = match table.get(container) {
                Some(doc) => doc.url().to_path_buf(),
                None => continue,
            };
            let backreference =
                ScannedFeature::DocumentBackreference(ScannedDocumentBackreference { container });
            let document = self.build(
                url,
                child.language,
                &child.contents,
                Some(child.location_offset),
                vec![backreference],
            );
            let nested = inline_documents(&document);
            let id = table.insert_inline(container, document)?;
            trace!(%container, child = %id, language = %child.language, "added inline document");
            self.analyze_inline(table, id, nested)?;
        }
        Ok(())
    }

    /// Builds a fully resolved document. `leading` scanned features are
    /// resolved ahead of anything the scanners find.
    fn build(
        &self,
        url: PathBuf,
        language: DocumentLanguage,
        contents: &str,
        offset: Option<LocationOffset>,
        leading: Vec<ScannedFeature>,
    ) -> Document {
        let scanners: Vec<&dyn Scanner> = self
            .scanners
            .iter()
            .map(|s| &**s)
            .filter(|s| s.language() == language)
            .collect();

        let (tree, parse_warnings) = match scanners.first() {
            Some(parser) => parser.parse(&url, contents, offset),
            None => (SyntaxTree::new(), Vec::new()),
        };
        let mut document = match offset {
            Some(offset) => Document::inline(url, language, contents, tree, offset),
            None => Document::new(url, language, contents, tree),
        };
        for warning in parse_warnings {
            document.add_warning(warning);
        }

        let mut scanned = leading;
        for scanner in &scanners {
            let result = scanner.scan(&document);
            trace!(
                scanner = scanner.name(),
                features = result.features.len(),
                warnings = result.warnings.len(),
                "scanned document"
            );
            scanned.extend(result.features);
            for warning in result.warnings {
                document.add_warning(warning);
            }
        }

        let outcome = resolve_all(&document, &scanned, self.mode);
        for feature in outcome.features {
            document.add_feature(feature);
        }
        for warning in outcome.warnings {
            document.add_warning(warning);
        }
        debug!(
            url = %document.url().display(),
            %language,
            features = document.feature_count(),
            "analyzed document"
        );
        document
    }
}

fn inline_documents(document: &Document) -> Vec<InlineDocument> {
    document.inline_documents().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::FeatureKind;
    use crate::scanned::{ScannedFunction, ScannedInlineDocument};
    use crate::scanner::ScanResult;
    use vellum_diagnostics::Warning;
    use vellum_source::{Position, SourceRange};

    /// Treats every line of a page starting with `js:` as an inline script.
    struct LineScripts;

    impl Scanner for LineScripts {
        fn name(&self) -> &str {
            "line-scripts"
        }

        fn language(&self) -> DocumentLanguage {
            DocumentLanguage::Html
        }

        fn scan(&self, document: &Document) -> ScanResult {
            let mut result = ScanResult::new();
            for (line, text) in document.contents().lines().enumerate() {
                let line = line as u32;
                if let Some(body) = text.strip_prefix("js:") {
                    let range = SourceRange::new(
                        document.url(),
                        Position::new(line, 3),
                        Position::new(line, text.chars().count() as u32),
                    );
                    result
                        .features
                        .push(ScannedFeature::InlineDocument(ScannedInlineDocument::new(
                            DocumentLanguage::JavaScript,
                            body,
                            LocationOffset::new(line, 3),
                            range,
                        )));
                } else if text.trim().is_empty() {
                    result.warnings.push(Warning::info(
                        "blank-line",
                        "blank line",
                        SourceRange::point(document.url(), Position::new(line, 0)),
                    ));
                }
            }
            result
        }
    }

    /// Reports `name()` calls as functions, in the containing file's coordinates.
    struct Calls;

    impl Scanner for Calls {
        fn name(&self) -> &str {
            "calls"
        }

        fn language(&self) -> DocumentLanguage {
            DocumentLanguage::JavaScript
        }

        fn scan(&self, document: &Document) -> ScanResult {
            let offset = document.location_offset().unwrap_or_default();
            let mut result = ScanResult::new();
            if let Some(name) = document.contents().strip_suffix("()") {
                let start = Position::new(0, 0).offset_by(offset);
                let end = Position::new(0, name.chars().count() as u32).offset_by(offset);
                result.features.push(ScannedFeature::Function(ScannedFunction::new(
                    name,
                    SourceRange::new(document.url(), start, end),
                )));
            }
            result
        }
    }

    fn analyzer() -> Analyzer {
        let mut analyzer = Analyzer::new(ResolutionMode::Sequential);
        analyzer.register(Box::new(LineScripts));
        analyzer.register(Box::new(Calls));
        analyzer
    }

    #[test]
    fn inline_documents_become_children_with_backreference() {
        let mut table = DocumentTable::new();
        let page = analyzer()
            .analyze(&mut table, "page.html", DocumentLanguage::Html, "<p>\njs:go()\n")
            .unwrap();

        let children = table.children_of(page).to_vec();
        assert_eq!(children.len(), 1);
        let child = table.get(children[0]).unwrap();
        assert_eq!(child.url(), table.get(page).unwrap().url());
        assert_eq!(child.location_offset(), Some(LocationOffset::new(1, 3)));

        let first = child.features().next().unwrap();
        assert!(first.has_kind(&FeatureKind::DocumentBackreference));
        assert_eq!(
            child
                .features_of_kind(&FeatureKind::DocumentBackreference)
                .count(),
            1
        );
        assert_eq!(table.container_of(children[0]).unwrap().url(), child.url());

        let go = child.functions().next().unwrap();
        assert_eq!(go.name, "go");
        let range = child.features_with_identifier("go").next().unwrap().source_range();
        assert_eq!(range.unwrap().start, Position::new(1, 3));
    }

    #[test]
    fn scan_warnings_land_on_the_document() {
        let mut table = DocumentTable::new();
        let page = analyzer()
            .analyze(&mut table, "page.html", DocumentLanguage::Html, "a\n\nb")
            .unwrap();
        let codes: Vec<_> = table.get(page).unwrap().warnings().iter().map(|w| w.code()).collect();
        assert_eq!(codes, vec!["blank-line"]);
    }

    #[test]
    fn documents_without_scanners_still_analyze() {
        let mut table = DocumentTable::new();
        let id = analyzer()
            .analyze(&mut table, "a.css", DocumentLanguage::Css, "p {}")
            .unwrap();
        let doc = table.get(id).unwrap();
        assert!(doc.syntax().is_empty());
        assert_eq!(doc.feature_count(), 0);
    }

    #[test]
    fn reanalyze_keeps_id_and_replaces_children() {
        let analyzer = analyzer();
        let mut table = DocumentTable::new();
        let page = analyzer
            .analyze(&mut table, "page.html", DocumentLanguage::Html, "js:a()\n")
            .unwrap();
        let old_child = table.children_of(page)[0];

        analyzer
            .reanalyze(&mut table, page, "js:a()\njs:b()\n")
            .unwrap();
        assert!(!table.contains(old_child));
        assert_eq!(table.children_of(page).len(), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn parallel_mode_gives_the_same_features() {
        let contents = "js:a()\njs:b()\njs:c()\n";
        let mut sequential = DocumentTable::new();
        analyzer()
            .analyze(&mut sequential, "p.html", DocumentLanguage::Html, contents)
            .unwrap();

        let mut parallel_analyzer = Analyzer::new(ResolutionMode::Parallel);
        parallel_analyzer.register(Box::new(LineScripts));
        parallel_analyzer.register(Box::new(Calls));
        let mut parallel = DocumentTable::new();
        parallel_analyzer
            .analyze(&mut parallel, "p.html", DocumentLanguage::Html, contents)
            .unwrap();

        let features = |t: &DocumentTable| -> Vec<String> {
            t.iter()
                .flat_map(|(_, d)| d.features().map(|f| f.to_string()).collect::<Vec<_>>())
                .collect()
        };
        assert_eq!(features(&sequential), features(&parallel));
    }
}
