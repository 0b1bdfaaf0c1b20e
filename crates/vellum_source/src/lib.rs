//! Source positions, ranges, and file text access for diagnostics.
//!
//! This crate provides the zero-based [`Position`] and [`SourceRange`] types
//! shared by every other crate, [`SourceFile`] for line indexing, and the
//! [`ContentLoader`] seam through which the renderer fetches file text. The
//! [`SourceDb`] is the default caching loader.

#![warn(missing_docs)]

pub mod loader;
pub mod position;
pub mod range;
pub mod source_db;
pub mod source_file;

pub use loader::{ContentLoader, LoadError};
pub use position::{LocationOffset, Position};
pub use range::SourceRange;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
