//! Finds `<script>` elements: external scripts and inline scripts.

use crate::base::{apply_base, base_href};
use crate::parser::parse;
use std::path::Path;
use tracing::trace;
use vellum_diagnostics::Warning;
use vellum_model::{
    Document, DocumentLanguage, ScanResult, ScannedFeature, ScannedImport, ScannedInlineDocument,
    Scanner, SyntaxNode, SyntaxTree,
};
use vellum_source::LocationOffset;

/// The import type of `<script src>` imports.
pub const HTML_SCRIPT_IMPORT: &str = "html-script";

/// `type` values that mark a classic script.
const JS_MIME_TYPES: &[&str] = &[
    "text/javascript",
    "application/javascript",
    "application/x-javascript",
    "text/ecmascript",
    "application/ecmascript",
];

/// Scans HTML documents for scripts.
///
/// `<script src>` becomes an `html-script` import whose url honours the
/// page's `<base href>`; `async` and `defer` make it lazy. A script without
/// `src` becomes an inline JavaScript document located where its text
/// starts. Scripts with a non-JavaScript `type` (templates, JSON data) are
/// skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlScriptScanner;

impl Scanner for HtmlScriptScanner {
    fn name(&self) -> &str {
        "html-script"
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
        for (id, node) in tree.nodes_of_kind("script") {
            if let Some(src) = node.attribute("src") {
                let written = src.value.as_deref().unwrap_or("");
                let mut import =
                    ScannedImport::new(HTML_SCRIPT_IMPORT, apply_base(base, written), node.range.clone());
                import.url_range = Some(src.range.clone());
                import.lazy = node.has_attribute("async") || node.has_attribute("defer");
                import.node = Some(id);
                if has_content(node) {
                    if let Some(text_range) = &node.text_range {
                        import.warnings.push(Warning::info(
                            "ignored-script-content",
                            "inline content of a script with a src attribute is ignored",
                            text_range.clone(),
                        ));
                    }
                }
                result.features.push(ScannedFeature::Import(import));
                continue;
            }

            let Some(is_module) = script_type(node) else {
                trace!(%id, "skipping non-javascript script");
                continue;
            };
            let (Some(text), Some(text_range)) = (&node.text, &node.text_range) else {
                continue;
            };
            let mut inline = ScannedInlineDocument::new(
                DocumentLanguage::JavaScript,
                text.clone(),
                LocationOffset::from(text_range.start),
                text_range.clone(),
            );
            inline.is_module = is_module;
            inline.node = Some(id);
            result.features.push(ScannedFeature::InlineDocument(inline));
        }
        result
    }
}

/// `Some(is_module)` for JavaScript scripts, `None` for anything else.
fn script_type(node: &SyntaxNode) -> Option<bool> {
    let Some(ty) = node.attribute_value("type") else {
        return Some(false);
    };
    let ty = ty.trim().to_ascii_lowercase();
    if ty.is_empty() || JS_MIME_TYPES.contains(&ty.as_str()) {
        Some(false)
    } else if ty == "module" {
        Some(true)
    } else {
        None
    }
}

fn has_content(node: &SyntaxNode) -> bool {
    node.text.as_deref().is_some_and(|t| !t.trim().is_empty())
}
