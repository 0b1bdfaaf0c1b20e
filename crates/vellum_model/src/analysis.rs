//! Read-only queries across every document of an analysis.

use crate::document::Document;
use crate::feature::Feature;
use crate::ids::DocumentId;
use crate::kind::FeatureKind;
use crate::table::DocumentTable;
use vellum_diagnostics::Warning;

/// A finished analysis: a [`DocumentTable`] frozen for querying.
///
/// Queries walk documents in id order and each document's features in
/// insertion order, so results are deterministic for a given input.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    table: DocumentTable,
}

impl Analysis {
    /// Freezes `table`.
    pub fn new(table: DocumentTable) -> Self {
        Self { table }
    }

    /// The underlying table.
    pub fn table(&self) -> &DocumentTable {
        &self.table
    }

    /// Unfreezes the table, e.g. to re-analyze a changed file.
    pub fn into_table(self) -> DocumentTable {
        self.table
    }

    /// Returns the document with the given id.
    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.table.get(id)
    }

    /// All live documents, inline ones included, in id order.
    pub fn documents(&self) -> impl Iterator<Item = (DocumentId, &Document)> {
        self.table.iter()
    }

    /// Every feature tagged `kind`, with the id of its document.
    pub fn features_of_kind<'a>(
        &'a self,
        kind: &'a FeatureKind,
    ) -> impl Iterator<Item = (DocumentId, &'a Feature)> + 'a {
        self.table
            .iter()
            .flat_map(move |(id, doc)| doc.features_of_kind(kind).map(move |f| (id, f)))
    }

    /// Every feature carrying `identifier`, with the id of its document.
    pub fn features_with_identifier<'a>(
        &'a self,
        identifier: &'a str,
    ) -> impl Iterator<Item = (DocumentId, &'a Feature)> + 'a {
        self.table.iter().flat_map(move |(id, doc)| {
            doc.features_with_identifier(identifier)
                .map(move |f| (id, f))
        })
    }

    /// Every warning of every document: parse, scan, and resolution warnings
    /// first, then those attached to features.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.table.iter().flat_map(|(_, doc)| doc.all_warnings())
    }

    /// Number of error-severity warnings.
    pub fn error_count(&self) -> usize {
        self.warnings().filter(|w| w.severity().is_error()).count()
    }

    /// Returns `true` if any warning is an error.
    pub fn has_errors(&self) -> bool {
        self.warnings().any(|w| w.severity().is_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::DocumentLanguage;
    use crate::scanned::{ScannedFeature, ScannedFunction};
    use crate::syntax::SyntaxTree;
    use vellum_source::{Position, SourceRange};

    fn js(url: &str, names: &[&str]) -> Document {
        let mut doc = Document::new(url, DocumentLanguage::JavaScript, "", SyntaxTree::new());
        for (line, name) in names.iter().enumerate() {
            let range = SourceRange::point(url, Position::new(line as u32, 0));
            let mut scanned = ScannedFunction::new(*name, range.clone());
            if *name == "bad" {
                scanned.warnings.push(Warning::error("bad-name", "m", range));
            }
            let feature = ScannedFeature::Function(scanned).resolve(&doc).unwrap();
            doc.add_feature(feature);
        }
        doc
    }

    fn analysis() -> (Analysis, DocumentId, DocumentId) {
        let mut table = DocumentTable::new();
        let a = table.insert(js("a.js", &["init", "bad"]));
        let b = table.insert(js("b.js", &["init"]));
        (Analysis::new(table), a, b)
    }

    #[test]
    fn queries_span_documents_in_order() {
        let (analysis, a, b) = analysis();
        let inits: Vec<_> = analysis
            .features_with_identifier("init")
            .map(|(id, _)| id)
            .collect();
        assert_eq!(inits, vec![a, b]);
        assert_eq!(analysis.features_of_kind(&FeatureKind::Function).count(), 3);
        assert_eq!(analysis.features_of_kind(&FeatureKind::Import).count(), 0);
        assert_eq!(analysis.documents().count(), 2);
    }

    #[test]
    fn warnings_and_errors() {
        let (analysis, a, _) = analysis();
        assert_eq!(analysis.warnings().count(), 1);
        assert_eq!(analysis.error_count(), 1);
        assert!(analysis.has_errors());
        let mut table = analysis.into_table();
        table.evict(a);
        let analysis = Analysis::new(table);
        assert!(!analysis.has_errors());
    }
}
