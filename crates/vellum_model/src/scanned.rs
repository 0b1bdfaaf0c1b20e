//! Scanner-authored facts awaiting resolution.

use crate::document::Document;
use crate::feature::{
    DocumentBackreference, Feature, FeaturePayload, Function, Import, InlineDocument, Param,
    ReturnInfo,
};
use crate::ids::{DocumentId, NodeId};
use crate::kind::FeatureKind;
use crate::language::DocumentLanguage;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use vellum_diagnostics::{Severity, Warning};
use vellum_source::{LocationOffset, SourceRange};

/// A fact a scanner found in a document, before resolution.
///
/// Scanned features belong to the scanner that produced them until they are
/// resolved, after which they are discarded. [`resolve`](Self::resolve) is a
/// pure function of the scanned feature and its document: it never touches
/// the document and resolving twice gives equal features.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScannedFeature {
    /// A function declaration.
    Function(ScannedFunction),
    /// A reference to another document.
    Import(ScannedImport),
    /// Text in another language embedded in this document.
    InlineDocument(ScannedInlineDocument),
    /// The link from an inline document back to its container.
    DocumentBackreference(ScannedDocumentBackreference),
    /// A third-party feature with open-ended kinds.
    Extension(ScannedExtension),
}

impl ScannedFeature {
    /// The range this feature was found at. Backreferences have none.
    pub fn source_range(&self) -> Option<&SourceRange> {
        match self {
            ScannedFeature::Function(f) => Some(&f.source_range),
            ScannedFeature::Import(i) => Some(&i.source_range),
            ScannedFeature::InlineDocument(d) => Some(&d.source_range),
            ScannedFeature::DocumentBackreference(_) => None,
            ScannedFeature::Extension(e) => e.source_range.as_ref(),
        }
    }

    /// Warnings recorded while scanning, in scan order.
    pub fn warnings(&self) -> &[Warning] {
        match self {
            ScannedFeature::Function(f) => &f.warnings,
            ScannedFeature::Import(i) => &i.warnings,
            ScannedFeature::InlineDocument(d) => &d.warnings,
            ScannedFeature::DocumentBackreference(_) => &[],
            ScannedFeature::Extension(e) => &e.warnings,
        }
    }

    /// The syntax node this feature was scanned from, if recorded.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            ScannedFeature::Function(f) => f.node,
            ScannedFeature::Import(i) => i.node,
            ScannedFeature::InlineDocument(d) => d.node,
            ScannedFeature::DocumentBackreference(_) | ScannedFeature::Extension(_) => None,
        }
    }

    /// Resolves this feature against the document it was scanned from.
    ///
    /// Returns the resolved feature, or the warning explaining why the
    /// payload could not be resolved. Sibling features may not be resolved
    /// yet; nothing here depends on them.
    ///
    /// `document` must be the document this feature came from. Passing a
    /// different one is a bug and trips a debug assertion.
    pub fn resolve(&self, document: &Document) -> Result<Feature, Warning> {
        if let Some(range) = self.source_range() {
            debug_assert_eq!(
                range.file,
                document.url(),
                "scanned feature resolved against a foreign document"
            );
        }
        match self {
            ScannedFeature::Function(f) => f.resolve(document),
            ScannedFeature::Import(i) => i.resolve(document),
            ScannedFeature::InlineDocument(d) => d.resolve(document),
            ScannedFeature::DocumentBackreference(b) => Ok(b.resolve()),
            ScannedFeature::Extension(e) => e.resolve(),
        }
    }
}

/// A function found by a script scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedFunction {
    /// Declared name.
    pub name: String,
    /// Long description from documentation comments.
    pub description: Option<String>,
    /// One-line summary.
    pub summary: Option<String>,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    /// Documented return value.
    pub returns: Option<ReturnInfo>,
    /// The declaring syntax node.
    pub node: Option<NodeId>,
    /// Range of the declaration.
    pub source_range: SourceRange,
    /// Problems found while scanning the declaration.
    pub warnings: Vec<Warning>,
}

impl ScannedFunction {
    /// Creates a scanned function with no documentation.
    pub fn new(name: impl Into<String>, source_range: SourceRange) -> Self {
        Self {
            name: name.into(),
            description: None,
            summary: None,
            params: Vec::new(),
            returns: None,
            node: None,
            source_range,
            warnings: Vec::new(),
        }
    }

    fn resolve(&self, _document: &Document) -> Result<Feature, Warning> {
        if self.name.trim().is_empty() {
            return Err(Warning::error(
                "invalid-function-name",
                "function declaration has no name",
                self.source_range.clone(),
            ));
        }
        Ok(Feature::new(
            BTreeSet::from([FeatureKind::Function]),
            BTreeSet::from([self.name.clone()]),
            Some(self.source_range.clone()),
            self.warnings.clone(),
            FeaturePayload::Function(Function {
                name: self.name.clone(),
                description: self.description.clone(),
                summary: self.summary.clone(),
                params: self.params.clone(),
                returns: self.returns.clone(),
                node: self.node,
            }),
        ))
    }
}

/// A reference to another document, such as `<script src>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedImport {
    /// The import mechanism, e.g. `"html-script"`. Also becomes a kind tag.
    pub import_type: String,
    /// The url as written (after any `<base href>` adjustment).
    pub url: String,
    /// Range of the url text.
    pub url_range: Option<SourceRange>,
    /// Whether the import is deferred.
    pub lazy: bool,
    /// The importing syntax node.
    pub node: Option<NodeId>,
    /// Range of the importing construct.
    pub source_range: SourceRange,
    /// Problems found while scanning the import.
    pub warnings: Vec<Warning>,
}

impl ScannedImport {
    /// Creates an eager import of `url`.
    pub fn new(
        import_type: impl Into<String>,
        url: impl Into<String>,
        source_range: SourceRange,
    ) -> Self {
        Self {
            import_type: import_type.into(),
            url: url.into(),
            url_range: None,
            lazy: false,
            node: None,
            source_range,
            warnings: Vec::new(),
        }
    }

    fn resolve(&self, document: &Document) -> Result<Feature, Warning> {
        if self.url.trim().is_empty() {
            return Err(Warning::error(
                "empty-import-url",
                format!("{} import has an empty url", self.import_type),
                self.url_range
                    .clone()
                    .unwrap_or_else(|| self.source_range.clone()),
            ));
        }
        Ok(Feature::new(
            BTreeSet::from([
                FeatureKind::Import,
                FeatureKind::from_name(&self.import_type),
            ]),
            BTreeSet::new(),
            Some(self.source_range.clone()),
            self.warnings.clone(),
            FeaturePayload::Import(Import {
                import_type: self.import_type.clone(),
                url: self.url.clone(),
                resolved_url: resolve_url(document.url(), &self.url),
                url_range: self.url_range.clone(),
                lazy: self.lazy,
                node: self.node,
            }),
        ))
    }
}

/// Text in another language embedded in the scanned document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedInlineDocument {
    /// Language of the embedded text.
    pub language: DocumentLanguage,
    /// The embedded text, verbatim.
    pub contents: String,
    /// Where the text begins in the containing file.
    pub location_offset: LocationOffset,
    /// Whether a script was declared `type="module"`.
    pub is_module: bool,
    /// The containing syntax node.
    pub node: Option<NodeId>,
    /// Range of the embedded text.
    pub source_range: SourceRange,
    /// Problems found while scanning the block.
    pub warnings: Vec<Warning>,
}

impl ScannedInlineDocument {
    /// Creates a scanned inline document.
    pub fn new(
        language: DocumentLanguage,
        contents: impl Into<String>,
        location_offset: LocationOffset,
        source_range: SourceRange,
    ) -> Self {
        Self {
            language,
            contents: contents.into(),
            location_offset,
            is_module: false,
            node: None,
            source_range,
            warnings: Vec::new(),
        }
    }

    fn resolve(&self, _document: &Document) -> Result<Feature, Warning> {
        Ok(Feature::new(
            BTreeSet::from([
                FeatureKind::Document,
                FeatureKind::InlineDocument,
                self.language.document_kind(),
            ]),
            BTreeSet::new(),
            Some(self.source_range.clone()),
            self.warnings.clone(),
            FeaturePayload::InlineDocument(InlineDocument {
                language: self.language,
                contents: self.contents.clone(),
                location_offset: self.location_offset,
                is_module: self.is_module,
                node: self.node,
            }),
        ))
    }
}

/// Added to an inline document's scanned features to link it to its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannedDocumentBackreference {
    /// The containing document.
    pub container: DocumentId,
}

impl ScannedDocumentBackreference {
    fn resolve(&self) -> Feature {
        Feature::new(
            BTreeSet::from([FeatureKind::DocumentBackreference]),
            BTreeSet::new(),
            None,
            Vec::new(),
            FeaturePayload::DocumentBackreference(DocumentBackreference {
                container: self.container,
            }),
        )
    }
}

/// A feature kind the model does not know about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScannedExtension {
    /// Kind tags. Resolution fails if this is empty.
    pub kinds: BTreeSet<FeatureKind>,
    /// Lookup names.
    pub identifiers: BTreeSet<String>,
    /// Free-form data carried through to the resolved feature.
    pub attributes: BTreeMap<String, String>,
    /// Range of the feature, if any.
    pub source_range: Option<SourceRange>,
    /// Problems found while scanning the feature.
    pub warnings: Vec<Warning>,
}

impl ScannedExtension {
    fn resolve(&self) -> Result<Feature, Warning> {
        if self.kinds.is_empty() {
            return Err(Warning::new(
                "extension-without-kinds",
                "extension feature was scanned without any kind",
                Severity::Error,
                self.source_range.clone(),
            ));
        }
        Ok(Feature::new(
            self.kinds.clone(),
            self.identifiers.clone(),
            self.source_range.clone(),
            self.warnings.clone(),
            FeaturePayload::Extension(self.attributes.clone()),
        ))
    }
}

/// Resolves `url` against the directory of the importing document.
///
/// Urls with a scheme, root-relative urls, and fragment-only urls are kept as
/// written. `.` and `..` segments are folded lexically.
fn resolve_url(base: &Path, url: &str) -> String {
    if url.contains("://") || url.starts_with('/') || url.starts_with("data:") || url.starts_with('#')
    {
        return url.to_string();
    }
    let base = base.to_string_lossy().replace('\\', "/");
    let dir = match base.rfind('/') {
        Some(idx) => &base[..=idx],
        None => "",
    };
    normalize(&format!("{dir}{url}"))
}

fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}
