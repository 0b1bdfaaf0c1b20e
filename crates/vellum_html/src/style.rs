//! Finds stylesheets: `<link rel="stylesheet">` and inline `<style>`.

use crate::base::{apply_base, base_href};
use crate::parser::parse;
use std::path::Path;
use vellum_diagnostics::Warning;
use vellum_model::{
    Document, DocumentLanguage, ScanResult, ScannedFeature, ScannedImport, ScannedInlineDocument,
    Scanner, SyntaxNode, SyntaxTree,
};
use vellum_source::LocationOffset;

/// The import type of `<link rel="stylesheet">` imports.
pub const HTML_STYLE_IMPORT: &str = "html-style";

/// Scans HTML documents for stylesheets.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlStyleScanner;

impl Scanner for HtmlStyleScanner {
    fn name(&self) -> &str {
        "html-style"
    }

    fn language(&self) -> DocumentLanguage {
        DocumentLanguage::Html
    }

    fn parse(
        &self,
        url: &Path,
        contents: &str,
        offset: Option<LocationOffset>,
    ) -> (SyntaxTree, Vec<Warning>) {
        parse(url, contents, offset)
    }

    fn scan(&self, document: &Document) -> ScanResult {
        let tree = document.syntax();
        let base = base_href(tree);
        let mut result = ScanResult::new();
        for (id, node) in tree.iter() {
            match node.kind.as_str() {
                "link" if is_stylesheet(node) => {
                    let href = node.attribute("href");
                    let written = href.and_then(|a| a.value.as_deref()).unwrap_or("");
                    let mut import = ScannedImport::new(
                        HTML_STYLE_IMPORT,
                        apply_base(base, written),
                        node.range.clone(),
                    );
                    import.url_range = href.map(|a| a.range.clone());
                    import.node = Some(id);
                    result.features.push(ScannedFeature::Import(import));
                }
                "style" => {
                    let (Some(text), Some(text_range)) = (&node.text, &node.text_range) else {
                        continue;
                    };
                    let mut inline = ScannedInlineDocument::new(
                        DocumentLanguage::Css,
                        text.clone(),
                        LocationOffset::from(text_range.start),
                        text_range.clone(),
                    );
                    inline.node = Some(id);
                    result.features.push(ScannedFeature::InlineDocument(inline));
                }
                _ => {}
            }
        }
        result
    }
}

fn is_stylesheet(node: &SyntaxNode) -> bool {
    node.attribute_value("rel").is_some_and(|rel| {
        rel.split_ascii_whitespace()
            .any(|token| token.eq_ignore_ascii_case("stylesheet"))
    })
}
