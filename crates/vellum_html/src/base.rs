//! `<base href>` handling shared by the markup scanners.

use vellum_model::SyntaxTree;

/// Returns the `href` of the first `<base>` element, if any.
pub(crate) fn base_href(tree: &SyntaxTree) -> Option<&str> {
    tree.nodes_of_kind("base")
        .find_map(|(_, node)| node.attribute_value("href"))
        .filter(|href| !href.trim().is_empty())
}

/// Applies a base href to a url written in the document.
///
/// Absolute urls (with a scheme or a leading `/`), `data:` urls and empty
/// urls are returned unchanged. Relative urls are joined onto the base
/// href's directory.
pub(crate) fn apply_base(base: Option<&str>, url: &str) -> String {
    let Some(base) = base else {
        return url.to_string();
    };
    if url.is_empty() || url.contains("://") || url.starts_with('/') || url.starts_with("data:") {
        return url.to_string();
    }
    match base.rfind('/') {
        Some(idx) => format!("{}{}", &base[..=idx], url),
        None => url.to_string(),
    }
}
