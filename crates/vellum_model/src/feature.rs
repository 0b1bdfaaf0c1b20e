//! Resolved, immutable features.

use crate::ids::{DocumentId, NodeId};
use crate::kind::FeatureKind;
use crate::language::DocumentLanguage;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use vellum_diagnostics::Warning;
use vellum_source::{LocationOffset, SourceRange};

/// A resolved fact about a document.
///
/// Every feature carries at least one [`FeatureKind`], the identifiers it can
/// be looked up by, the range it came from, and its own copy of the warnings
/// found while scanning it. The variant-specific data lives in
/// [`FeaturePayload`]. Features are only built by resolution and never change
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    kinds: BTreeSet<FeatureKind>,
    identifiers: BTreeSet<String>,
    source_range: Option<SourceRange>,
    warnings: Vec<Warning>,
    payload: FeaturePayload,
}

/// Variant-specific data of a [`Feature`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeaturePayload {
    /// A function declaration.
    Function(Function),
    /// A reference to another document.
    Import(Import),
    /// A document embedded in this one.
    InlineDocument(InlineDocument),
    /// The link from an inline document to its container.
    DocumentBackreference(DocumentBackreference),
    /// A third-party feature described only by its tags and attributes.
    Extension(BTreeMap<String, String>),
}

impl Feature {
    /// Builds a feature. Callers guarantee `kinds` is non-empty.
    pub(crate) fn new(
        kinds: BTreeSet<FeatureKind>,
        identifiers: BTreeSet<String>,
        source_range: Option<SourceRange>,
        warnings: Vec<Warning>,
        payload: FeaturePayload,
    ) -> Self {
        debug_assert!(!kinds.is_empty(), "resolved features must carry a kind");
        Self {
            kinds,
            identifiers,
            source_range,
            warnings,
            payload,
        }
    }

    /// The kind tags of this feature. Never empty.
    pub fn kinds(&self) -> &BTreeSet<FeatureKind> {
        &self.kinds
    }

    /// Returns `true` if the feature is tagged with `kind`.
    pub fn has_kind(&self, kind: &FeatureKind) -> bool {
        self.kinds.contains(kind)
    }

    /// Names this feature can be looked up by. May be empty.
    pub fn identifiers(&self) -> &BTreeSet<String> {
        &self.identifiers
    }

    /// Returns `true` if `identifier` is one of the feature's identifiers.
    pub fn has_identifier(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// The range the feature was scanned from, if it has one.
    pub fn source_range(&self) -> Option<&SourceRange> {
        self.source_range.as_ref()
    }

    /// Warnings found while scanning this feature, in scan order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The variant-specific data.
    pub fn payload(&self) -> &FeaturePayload {
        &self.payload
    }

    /// Returns the function data if this is a function.
    pub fn as_function(&self) -> Option<&Function> {
        match &self.payload {
            FeaturePayload::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the import data if this is an import.
    pub fn as_import(&self) -> Option<&Import> {
        match &self.payload {
            FeaturePayload::Import(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the inline document data if this is an inline document.
    pub fn as_inline_document(&self) -> Option<&InlineDocument> {
        match &self.payload {
            FeaturePayload::InlineDocument(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the backreference if this is one.
    pub fn as_backreference(&self) -> Option<&DocumentBackreference> {
        match &self.payload {
            FeaturePayload::DocumentBackreference(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            FeaturePayload::Function(func) => write!(f, "<Function id={}>", func.name),
            FeaturePayload::Import(import) => write!(f, "<Import url={}>", import.url),
            FeaturePayload::InlineDocument(doc) => {
                write!(f, "<InlineDocument lang={}>", doc.language)
            }
            FeaturePayload::DocumentBackreference(back) => {
                write!(f, "<DocumentBackreference container={}>", back.container)
            }
            FeaturePayload::Extension(_) => {
                let kinds: Vec<&str> = self.kinds.iter().map(FeatureKind::as_str).collect();
                write!(f, "<Extension kinds={}>", kinds.join(","))
            }
        }
    }
}

/// One declared parameter of a function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Declared type, if documented.
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

/// The documented return value of a function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnInfo {
    /// Declared type, if documented.
    #[serde(rename = "type")]
    pub type_: Option<String>,
    /// Description of the returned value.
    pub desc: String,
}

/// A resolved function declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    /// The function's name. Also its only identifier.
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
}

/// A resolved reference to another document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    /// The import mechanism, e.g. `"html-script"`.
    pub import_type: String,
    /// The url as written in the source.
    pub url: String,
    /// The url resolved against the importing document's location.
    pub resolved_url: String,
    /// Range of the url text itself.
    pub url_range: Option<SourceRange>,
    /// Whether the import is deferred (`async`, `defer`, lazy imports).
    pub lazy: bool,
    /// The importing syntax node.
    pub node: Option<NodeId>,
}

/// A document embedded inside another one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineDocument {
    /// Language of the embedded text.
    pub language: DocumentLanguage,
    /// The embedded text.
    pub contents: String,
    /// Where the embedded text begins in the containing file.
    pub location_offset: LocationOffset,
    /// Whether a script was declared `type="module"`.
    pub is_module: bool,
    /// The containing syntax node.
    pub node: Option<NodeId>,
}

/// Points from an inline document back to the document containing it.
///
/// The container is named by id, so it can be re-analyzed or evicted
/// independently. Look it up through
/// [`DocumentTable::container_of`](crate::DocumentTable::container_of).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentBackreference {
    /// The containing document.
    pub container: DocumentId,
}
