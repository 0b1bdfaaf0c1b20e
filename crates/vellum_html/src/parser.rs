//! Builds a [`SyntaxTree`] from lexed HTML.

use crate::lexer::{lex, ByteSpan, Token, TokenKind};
use std::path::Path;
use tracing::trace;
use vellum_diagnostics::Warning;
use vellum_model::{Attribute, NodeId, SyntaxNode, SyntaxTree};
use vellum_source::{LocationOffset, SourceFile, SourceRange};

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Parses HTML `contents` of the file at `url` into a syntax tree.
///
/// Every start tag becomes a node whose range runs to its end tag (or to the
/// end of the file when the end tag is omitted). Raw-text elements record
/// their body in `text` and `text_range`. When `offset` is given the markup
/// is itself embedded in `url`, and every range is shifted into that file's
/// coordinates. Malformed markup is reported as warnings.
pub fn parse(
    url: &Path,
    contents: &str,
    offset: Option<LocationOffset>,
) -> (SyntaxTree, Vec<Warning>) {
    let (tokens, problems) = lex(contents);
    let mut builder = TreeBuilder {
        locator: Locator {
            file: SourceFile::new(url, contents.to_string()),
            offset,
        },
        contents,
        tree: SyntaxTree::new(),
        open: Vec::new(),
        warnings: Vec::new(),
    };
    for problem in problems {
        let range = builder.locator.range(problem.span);
        builder
            .warnings
            .push(Warning::warning(problem.code, problem.message, range));
    }
    let mut tokens = tokens.into_iter().peekable();
    while let Some(token) = tokens.next() {
        let raw_body = match &token.kind {
            TokenKind::StartTag { self_closing, .. } if !*self_closing => {
                matches!(tokens.peek(), Some(Token { kind: TokenKind::Text, .. }))
            }
            _ => false,
        };
        builder.token(token);
        if raw_body && builder.current_is_raw() {
            if let Some(text) = tokens.next() {
                builder.raw_text(text.span);
            }
        }
    }
    builder.finish()
}

/// Maps byte spans to ranges in the (possibly containing) file.
struct Locator {
    file: SourceFile,
    offset: Option<LocationOffset>,
}

impl Locator {
    fn range(&self, span: ByteSpan) -> SourceRange {
        let mut start = self.file.position_at(span.start);
        let mut end = self.file.position_at(span.end);
        if let Some(offset) = self.offset {
            start = start.offset_by(offset);
            end = end.offset_by(offset);
        }
        SourceRange::new(self.file.path.clone(), start, end)
    }
}

struct TreeBuilder<'a> {
    locator: Locator,
    contents: &'a str,
    tree: SyntaxTree,
    open: Vec<(NodeId, String)>,
    warnings: Vec<Warning>,
}

impl TreeBuilder<'_> {
    fn token(&mut self, token: Token) {
        match token.kind {
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let attributes = attributes
                    .into_iter()
                    .map(|raw| Attribute {
                        range: self.locator.range(raw.value_span.unwrap_or(raw.name_span)),
                        name: raw.name,
                        value: raw.value,
                    })
                    .collect();
                let id = self.tree.push(SyntaxNode {
                    kind: name.clone(),
                    range: self.locator.range(token.span),
                    attributes,
                    text_range: None,
                    text: None,
                    parent: self.open.last().map(|(id, _)| *id),
                });
                if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                    self.open.push((id, name));
                }
            }
            TokenKind::EndTag { name } => self.close(&name, token.span),
            TokenKind::Text | TokenKind::Comment | TokenKind::Doctype => {}
        }
    }

    fn current_is_raw(&self) -> bool {
        matches!(self.open.last(), Some((_, name)) if name == "script" || name == "style")
    }

    fn raw_text(&mut self, span: ByteSpan) {
        let range = self.locator.range(span);
        let text = self.contents[span.start..span.end].to_string();
        if let Some((id, _)) = self.open.last() {
            if let Some(node) = self.tree.get_mut(*id) {
                node.text_range = Some(range);
                node.text = Some(text);
            }
        }
    }

    fn close(&mut self, name: &str, span: ByteSpan) {
        let Some(depth) = self.open.iter().rposition(|(_, open)| open == name) else {
            trace!(tag = name, "ignoring unmatched end tag");
            self.warnings.push(Warning::info(
                "unmatched-end-tag",
                format!("</{name}> has no matching start tag"),
                self.locator.range(span),
            ));
            return;
        };
        let end = self.locator.range(span).end;
        for (id, _) in self.open.drain(depth..) {
            if let Some(node) = self.tree.get_mut(id) {
                node.range.end = end;
            }
        }
    }

    fn finish(mut self) -> (SyntaxTree, Vec<Warning>) {
        let end = self.locator.range(ByteSpan {
            start: self.contents.len(),
            end: self.contents.len(),
        });
        for (id, _) in self.open.drain(..) {
            if let Some(node) = self.tree.get_mut(id) {
                node.range.end = end.end;
            }
        }
        (self.tree, self.warnings)
    }
}
