//! A language-neutral syntax tree owned by its document.

use crate::arena::Arena;
use crate::ids::NodeId;
use serde::{Deserialize, Serialize};
use vellum_source::SourceRange;

/// A `name="value"` pair on a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name, lowercased for markup.
    pub name: String,
    /// Attribute value; `None` for bare attributes such as `<script defer>`.
    pub value: Option<String>,
    /// Range of the value text without quotes, or of the name when bare.
    pub range: SourceRange,
}

/// One node of a [`SyntaxTree`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    /// The node kind, e.g. a tag name such as `"script"`.
    pub kind: String,
    /// Range of the whole node, start tag through end tag.
    pub range: SourceRange,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Range of the node's raw text content, if it has any.
    pub text_range: Option<SourceRange>,
    /// The raw text content itself, for elements such as `<script>`.
    pub text: Option<String>,
    /// The enclosing node, or `None` at the root.
    pub parent: Option<NodeId>,
}

impl SyntaxNode {
    /// Returns the attribute called `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns the value of attribute `name`, if present with a value.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(|a| a.value.as_deref())
    }

    /// Returns `true` if the node carries attribute `name`, with or without a value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// The parsed form of a document.
///
/// Nodes are stored in document order. Features point into the tree with
/// [`NodeId`]s, so the tree can be shared read-only by any number of
/// resolvers without anyone holding a borrow into it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SyntaxTree {
    nodes: Arena<NodeId, SyntaxNode>,
}

impl SyntaxTree {
    /// Creates an empty tree (used for languages without a parser).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its id.
    pub fn push(&mut self, node: SyntaxNode) -> NodeId {
        self.nodes.alloc(node)
    }

    /// Returns the node with the given id.
    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id)
    }

    /// Mutable counterpart of [`get`](Self::get), for parsers closing a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SyntaxNode> {
        self.nodes.get_mut(id)
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SyntaxNode)> {
        self.nodes.iter()
    }

    /// Iterates over nodes of the given kind in document order.
    pub fn nodes_of_kind<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = (NodeId, &'a SyntaxNode)> + 'a {
        self.nodes.iter().filter(move |(_, node)| node.kind == kind)
    }

    /// Iterates over the direct children of `parent` in document order.
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = (NodeId, &SyntaxNode)> {
        self.nodes
            .iter()
            .filter(move |(_, node)| node.parent == Some(parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_source::Position;

    fn node(kind: &str, parent: Option<NodeId>) -> SyntaxNode {
        SyntaxNode {
            kind: kind.to_string(),
            range: SourceRange::point("a.html", Position::new(0, 0)),
            attributes: Vec::new(),
            text_range: None,
            text: None,
            parent,
        }
    }

    #[test]
    fn children_and_kinds() {
        let mut tree = SyntaxTree::new();
        let html = tree.push(node("html", None));
        let head = tree.push(node("head", Some(html)));
        tree.push(node("script", Some(head)));
        tree.push(node("script", Some(head)));

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.children(head).count(), 2);
        assert_eq!(tree.children(html).count(), 1);
        assert_eq!(tree.nodes_of_kind("script").count(), 2);
    }

    #[test]
    fn attribute_lookup() {
        let mut n = node("script", None);
        n.attributes.push(Attribute {
            name: "src".to_string(),
            value: Some("foo.js".to_string()),
            range: SourceRange::point("a.html", Position::new(0, 13)),
        });
        n.attributes.push(Attribute {
            name: "defer".to_string(),
            value: None,
            range: SourceRange::point("a.html", Position::new(0, 22)),
        });
        assert_eq!(n.attribute_value("src"), Some("foo.js"));
        assert_eq!(n.attribute_value("defer"), None);
        assert!(n.has_attribute("defer"));
        assert!(!n.has_attribute("type"));
    }

    #[test]
    fn empty_tree() {
        let tree = SyntaxTree::new();
        assert!(tree.is_empty());
        assert!(tree.get(NodeId::from_raw(0)).is_none());
    }
}
