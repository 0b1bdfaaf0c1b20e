//! Documents: the context features are resolved against.

use crate::feature::{DocumentBackreference, Feature, Function, Import, InlineDocument};
use crate::kind::FeatureKind;
use crate::language::DocumentLanguage;
use crate::syntax::SyntaxTree;
use std::path::{Path, PathBuf};
use vellum_common::ContentHash;
use vellum_diagnostics::Warning;
use vellum_source::LocationOffset;

/// One analyzed unit of text: a file, or an inline block inside a file.
///
/// A document owns its syntax tree and the features resolved from it. The
/// feature set is append-only while the document is being analyzed and is
/// read-only once the document is placed in a
/// [`DocumentTable`](crate::DocumentTable).
///
/// Inline documents share their container's `url`; their syntax ranges are
/// already expressed in the container file's coordinates.
#[derive(Debug, Clone)]
pub struct Document {
    url: PathBuf,
    language: DocumentLanguage,
    contents: String,
    content_hash: ContentHash,
    syntax: SyntaxTree,
    location_offset: Option<LocationOffset>,
    features: Vec<Feature>,
    warnings: Vec<Warning>,
}

impl Document {
    /// Creates a top-level document for a file.
    pub fn new(
        url: impl Into<PathBuf>,
        language: DocumentLanguage,
        contents: impl Into<String>,
        syntax: SyntaxTree,
    ) -> Self {
        let contents = contents.into();
        Self {
            url: url.into(),
            language,
            content_hash: ContentHash::of_text(&contents),
            contents,
            syntax,
            location_offset: None,
            features: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a document for text embedded at `offset` inside `url`.
    pub fn inline(
        url: impl Into<PathBuf>,
        language: DocumentLanguage,
        contents: impl Into<String>,
        syntax: SyntaxTree,
        offset: LocationOffset,
    ) -> Self {
        let mut document = Self::new(url, language, contents, syntax);
        document.location_offset = Some(offset);
        document
    }

    /// The file this document's text lives in.
    pub fn url(&self) -> &Path {
        &self.url
    }

    /// The language of the text.
    pub fn language(&self) -> DocumentLanguage {
        self.language
    }

    /// The document's text.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Hash of [`contents`](Self::contents).
    pub fn content_hash(&self) -> ContentHash {
        self.content_hash
    }

    /// The parsed syntax tree.
    pub fn syntax(&self) -> &SyntaxTree {
        &self.syntax
    }

    /// Where an inline document starts inside its container's file.
    pub fn location_offset(&self) -> Option<LocationOffset> {
        self.location_offset
    }

    /// Returns `true` for documents embedded in another document.
    pub fn is_inline(&self) -> bool {
        self.location_offset.is_some()
    }

    /// Appends a resolved feature.
    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Records a document-level warning (parse, scan, or resolution).
    pub fn add_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// All features in insertion order.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Number of features.
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Features tagged `kind`, in insertion order. Empty if none match.
    pub fn features_of_kind<'a>(
        &'a self,
        kind: &'a FeatureKind,
    ) -> impl Iterator<Item = &'a Feature> + 'a {
        self.features.iter().filter(move |f| f.has_kind(kind))
    }

    /// Features carrying `identifier`, in insertion order. Several features
    /// may share one identifier.
    pub fn features_with_identifier<'a>(
        &'a self,
        identifier: &'a str,
    ) -> impl Iterator<Item = &'a Feature> + 'a {
        self.features
            .iter()
            .filter(move |f| f.has_identifier(identifier))
    }

    /// Resolved functions, in insertion order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.features.iter().filter_map(Feature::as_function)
    }

    /// Resolved imports, in insertion order.
    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        self.features.iter().filter_map(Feature::as_import)
    }

    /// Inline documents found in this document, in insertion order.
    pub fn inline_documents(&self) -> impl Iterator<Item = &InlineDocument> {
        self.features.iter().filter_map(Feature::as_inline_document)
    }

    /// The backreference to this document's container, for inline documents.
    pub fn backreference(&self) -> Option<&DocumentBackreference> {
        self.features.iter().find_map(Feature::as_backreference)
    }

    /// Document-level warnings in the order they were recorded.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Every warning attached to this document: document-level warnings
    /// first, then each feature's warnings in feature order.
    pub fn all_warnings(&self) -> impl Iterator<Item = &Warning> {
        self.warnings
            .iter()
            .chain(self.features.iter().flat_map(|f| f.warnings().iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanned::{ScannedFeature, ScannedFunction};
    use vellum_source::{Position, SourceRange};

    fn doc() -> Document {
        Document::new(
            "app.js",
            DocumentLanguage::JavaScript,
            "function a() {}\nfunction b() {}",
            SyntaxTree::new(),
        )
    }

    fn function(name: &str, line: u32) -> ScannedFeature {
        ScannedFeature::Function(ScannedFunction::new(
            name,
            SourceRange::new("app.js", Position::new(line, 0), Position::new(line, 15)),
        ))
    }

    #[test]
    fn queries_keep_insertion_order() {
        let mut d = doc();
        for scanned in [function("b", 1), function("a", 0), function("b", 2)] {
            let feature = scanned.resolve(&d).unwrap();
            d.add_feature(feature);
        }
        let names: Vec<_> = d.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "b"]);

        let b_lines: Vec<_> = d
            .features_with_identifier("b")
            .map(|f| f.source_range().unwrap().start.line)
            .collect();
        assert_eq!(b_lines, vec![1, 2]);
        assert_eq!(d.features_of_kind(&FeatureKind::Function).count(), 3);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let d = doc();
        assert_eq!(d.features_of_kind(&FeatureKind::Import).count(), 0);
        assert_eq!(d.features_with_identifier("nope").count(), 0);
        assert!(d.backreference().is_none());
    }

    #[test]
    fn inline_documents_know_their_offset() {
        let d = Document::inline(
            "page.html",
            DocumentLanguage::JavaScript,
            "console.log('hi')",
            SyntaxTree::new(),
            LocationOffset::new(2, 18),
        );
        assert!(d.is_inline());
        assert_eq!(d.location_offset(), Some(LocationOffset::new(2, 18)));
        assert!(!doc().is_inline());
    }

    #[test]
    fn content_hash_tracks_contents() {
        assert_eq!(doc().content_hash(), doc().content_hash());
        let other = Document::new("app.js", DocumentLanguage::JavaScript, "x", SyntaxTree::new());
        assert_ne!(doc().content_hash(), other.content_hash());
    }

    #[test]
    fn all_warnings_include_feature_warnings() {
        let mut d = doc();
        let range = SourceRange::point("app.js", Position::new(0, 0));
        d.add_warning(Warning::info("doc-level", "m", range.clone()));
        let mut scanned = ScannedFunction::new("a", range.clone());
        scanned.warnings.push(Warning::warning("feature-level", "m", range));
        let feature = ScannedFeature::Function(scanned).resolve(&d).unwrap();
        d.add_feature(feature);

        let codes: Vec<_> = d.all_warnings().map(|w| w.code()).collect();
        assert_eq!(codes, vec!["doc-level", "feature-level"]);
    }
}
