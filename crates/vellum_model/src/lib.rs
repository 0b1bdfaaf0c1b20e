//! The scanned-to-resolved feature model for markup and script documents.
//!
//! Scanners walk a [`Document`]'s syntax tree and emit [`ScannedFeature`]s.
//! Once a document is fully scanned, each scanned feature is resolved against
//! it into an immutable [`Feature`], which the document's feature set answers
//! queries about by [`FeatureKind`] and by identifier.
//!
//! Documents live in a [`DocumentTable`]. Inline documents (a script inside a
//! page) get their own table entry and a [`DocumentBackreference`] feature
//! naming the container by [`DocumentId`], never by owning pointer.

#![warn(missing_docs)]

pub mod analysis;
pub mod analyzer;
pub mod arena;
pub mod document;
pub mod feature;
pub mod ids;
pub mod kind;
pub mod language;
pub mod resolve;
pub mod scanned;
pub mod scanner;
pub mod syntax;
pub mod table;

pub use analysis::Analysis;
pub use analyzer::Analyzer;
pub use arena::{Arena, ArenaId};
pub use document::Document;
pub use feature::{
    DocumentBackreference, Feature, FeaturePayload, Function, Import, InlineDocument, Param,
    ReturnInfo,
};
pub use ids::{DocumentId, NodeId};
pub use kind::FeatureKind;
pub use language::DocumentLanguage;
pub use resolve::{resolve_all, ResolutionMode, ResolutionOutcome};
pub use scanned::{
    ScannedDocumentBackreference, ScannedExtension, ScannedFeature, ScannedFunction,
    ScannedImport, ScannedInlineDocument,
};
pub use scanner::{ScanResult, Scanner};
pub use syntax::{Attribute, SyntaxNode, SyntaxTree};
pub use table::DocumentTable;
