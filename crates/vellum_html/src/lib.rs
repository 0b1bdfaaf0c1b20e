//! HTML parsing and the markup scanners.
//!
//! [`parse`] turns markup into a [`SyntaxTree`](vellum_model::SyntaxTree)
//! with zero-based, char-column ranges. [`HtmlScriptScanner`] and
//! [`HtmlStyleScanner`] walk that tree for imports and inline documents.
//! Malformed markup never fails a parse; it is reported as warnings.

#![warn(missing_docs)]

mod base;
/// Tokenizer for HTML markup.
pub mod lexer;
/// Tree construction from lexed markup.
pub mod parser;
mod script;
mod style;

pub use parser::parse;
pub use script::{HtmlScriptScanner, HTML_SCRIPT_IMPORT};
pub use style::{HtmlStyleScanner, HTML_STYLE_IMPORT};

use vellum_model::Analyzer;

/// Registers every HTML scanner with `analyzer`.
pub fn register_scanners(analyzer: &mut Analyzer) {
    analyzer.register(Box::new(HtmlScriptScanner));
    analyzer.register(Box::new(HtmlStyleScanner));
}
