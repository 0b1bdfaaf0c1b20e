//! Tokenizer for HTML markup.
//!
//! Splits markup into start tags (with attributes), end tags, text, comments
//! and doctypes. The contents of raw-text elements (`<script>`, `<style>`)
//! are emitted as a single [`TokenKind::Text`] token without looking for
//! tags inside them. Spans are byte offsets into the input; malformed
//! markup is recorded as a [`LexProblem`] and lexing carries on.

/// A half-open byte range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteSpan {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl ByteSpan {
    fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// An attribute as written in a start tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAttribute {
    /// Lowercased name.
    pub name: String,
    /// Span of the name.
    pub name_span: ByteSpan,
    /// The value without quotes, if one was given.
    pub value: Option<String>,
    /// Span of the value without quotes.
    pub value_span: Option<ByteSpan>,
}

/// What a token is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name attr=value ...>` or `<name ... />`.
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Attributes in source order.
        attributes: Vec<RawAttribute>,
        /// Whether the tag ended in `/>`.
        self_closing: bool,
    },
    /// `</name>`.
    EndTag {
        /// Lowercased tag name.
        name: String,
    },
    /// Character data, or the whole body of a raw-text element.
    Text,
    /// `<!-- ... -->`.
    Comment,
    /// `<!DOCTYPE ...>` and other `<!...>` or `<?...>` markup declarations.
    Doctype,
}

/// A token with its byte span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// What was lexed.
    pub kind: TokenKind,
    /// Where it was lexed.
    pub span: ByteSpan,
}

/// Malformed markup found while lexing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexProblem {
    /// Warning code, e.g. `"unterminated-comment"`.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
    /// Where the problem starts.
    pub span: ByteSpan,
}

/// Elements whose content is raw text rather than markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Lexes `source` into tokens and problems.
pub fn lex(source: &str) -> (Vec<Token>, Vec<LexProblem>) {
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        pos: 0,
        tokens: Vec::new(),
        problems: Vec::new(),
    };
    lexer.lex_all();
    (lexer.tokens, lexer.problems)
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
    problems: Vec<LexProblem>,
}

impl Lexer<'_> {
    fn lex_all(&mut self) {
        while self.pos < self.bytes.len() {
            if self.starts_with("<!--") {
                self.lex_comment();
            } else if self.peek() == b'<' && matches!(self.peek_at(1), b'!' | b'?') {
                self.lex_declaration();
            } else if self.peek() == b'<'
                && self.peek_at(1) == b'/'
                && self.peek_at(2).is_ascii_alphabetic()
            {
                self.lex_end_tag();
            } else if self.peek() == b'<' && self.peek_at(1).is_ascii_alphabetic() {
                self.lex_start_tag();
            } else {
                self.lex_text();
            }
        }
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.bytes[self.pos..].starts_with(prefix.as_bytes())
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            span: ByteSpan::new(start, self.pos),
        });
    }

    fn problem(&mut self, code: &'static str, message: impl Into<String>, start: usize) {
        self.problems.push(LexProblem {
            code,
            message: message.into(),
            span: ByteSpan::new(start, self.pos),
        });
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && self.peek().is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Advances while `pred` holds and returns the consumed text.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &str {
        let start = self.pos;
        while !self.at_end() && pred(self.peek()) {
            self.pos += 1;
        }
        &self.source[start..self.pos]
    }

    fn lex_text(&mut self) {
        let start = self.pos;
        // always consume at least one byte so a stray '<' makes progress
        self.pos += 1;
        while !self.at_end() && self.peek() != b'<' {
            self.pos += 1;
        }
        // '<' never splits a UTF-8 sequence, so the span stays on a char boundary
        self.push(TokenKind::Text, start);
    }

    fn lex_comment(&mut self) {
        let start = self.pos;
        self.pos += 4;
        match self.source[self.pos..].find("-->") {
            Some(idx) => {
                self.pos += idx + 3;
            }
            None => {
                self.pos = self.bytes.len();
                self.problem("unterminated-comment", "comment is never closed", start);
            }
        }
        self.push(TokenKind::Comment, start);
    }

    fn lex_declaration(&mut self) {
        let start = self.pos;
        while !self.at_end() && self.peek() != b'>' {
            self.pos += 1;
        }
        if !self.at_end() {
            self.pos += 1;
        }
        self.push(TokenKind::Doctype, start);
    }

    fn lex_end_tag(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let name = self
            .take_while(|b| !b.is_ascii_whitespace() && b != b'>')
            .to_ascii_lowercase();
        while !self.at_end() && self.peek() != b'>' {
            self.pos += 1;
        }
        if self.at_end() {
            self.problem("unterminated-tag", format!("end tag </{name}> is never closed"), start);
        } else {
            self.pos += 1;
        }
        self.push(TokenKind::EndTag { name }, start);
    }

    fn lex_start_tag(&mut self) {
        let start = self.pos;
        self.pos += 1;
        let name = self
            .take_while(|b| !b.is_ascii_whitespace() && b != b'>' && b != b'/')
            .to_ascii_lowercase();
        let mut attributes = Vec::new();
        let mut self_closing = false;
        loop {
            self.skip_whitespace();
            if self.at_end() {
                self.problem("unterminated-tag", format!("start tag <{name}> is never closed"), start);
                break;
            }
            if self.peek() == b'>' {
                self.pos += 1;
                break;
            }
            if self.peek() == b'/' {
                self.pos += 1;
                if self.peek() == b'>' {
                    self.pos += 1;
                    self_closing = true;
                    break;
                }
                continue;
            }
            attributes.push(self.lex_attribute());
        }
        let raw = !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str());
        self.push(
            TokenKind::StartTag {
                name: name.clone(),
                attributes,
                self_closing,
            },
            start,
        );
        if raw {
            self.lex_raw_text(&name);
        }
    }

    fn lex_attribute(&mut self) -> RawAttribute {
        let name_start = self.pos;
        let name = self
            .take_while(|b| !b.is_ascii_whitespace() && !matches!(b, b'>' | b'/' | b'='))
            .to_ascii_lowercase();
        if name.is_empty() {
            // lone '=' or similar; skip it
            self.pos += 1;
        }
        let name_span = ByteSpan::new(name_start, self.pos);

        let after_name = self.pos;
        self.skip_whitespace();
        if self.peek() != b'=' {
            self.pos = after_name;
            return RawAttribute {
                name,
                name_span,
                value: None,
                value_span: None,
            };
        }
        self.pos += 1;
        self.skip_whitespace();

        let (value, value_span) = match self.peek() {
            quote @ (b'"' | b'\'') => {
                let open = self.pos;
                self.pos += 1;
                let value_start = self.pos;
                while !self.at_end() && self.peek() != quote {
                    self.pos += 1;
                }
                let value_end = self.pos;
                if self.at_end() {
                    self.problem(
                        "unterminated-attribute",
                        format!("value of attribute `{name}` is never closed"),
                        open,
                    );
                } else {
                    self.pos += 1;
                }
                (
                    self.source[value_start..value_end].to_string(),
                    ByteSpan::new(value_start, value_end),
                )
            }
            _ => {
                let value_start = self.pos;
                let value = self
                    .take_while(|b| !b.is_ascii_whitespace() && b != b'>')
                    .to_string();
                (value, ByteSpan::new(value_start, self.pos))
            }
        };
        RawAttribute {
            name,
            name_span,
            value: Some(value),
            value_span: Some(value_span),
        }
    }

    fn lex_raw_text(&mut self, name: &str) {
        let start = self.pos;
        let closing = format!("</{name}");
        let rest = &self.source[self.pos..];
        let found = rest
            .char_indices()
            .filter(|(_, c)| *c == '<')
            .map(|(idx, _)| idx)
            .find(|&idx| {
                rest.get(idx..idx + closing.len())
                    .is_some_and(|s| s.eq_ignore_ascii_case(&closing))
            });
        match found {
            Some(idx) => {
                self.pos += idx;
                self.push(TokenKind::Text, start);
            }
            None => {
                self.pos = self.bytes.len();
                self.push(TokenKind::Text, start);
                self.problem(
                    "unterminated-raw-text",
                    format!("<{name}> element is never closed"),
                    start,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).0.into_iter().map(|t| t.kind).collect()
    }

    fn start_tag(token: &Token) -> (&str, &[RawAttribute], bool) {
        match &token.kind {
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            } => (name.as_str(), attributes.as_slice(), *self_closing),
            other => panic!("expected a start tag, got {other:?}"),
        }
    }

    #[test]
    fn simple_document() {
        let kinds = kinds("<!doctype html><p>hi</p><!-- c -->");
        assert_eq!(kinds.len(), 5);
        assert_eq!(kinds[0], TokenKind::Doctype);
        assert_eq!(kinds[2], TokenKind::Text);
        assert_eq!(kinds[3], TokenKind::EndTag { name: "p".to_string() });
        assert_eq!(kinds[4], TokenKind::Comment);
    }

    #[test]
    fn attribute_forms() {
        let source = r#"<SCRIPT src="a.js" type='module' defer data-x=1></script>"#;
        let (tokens, problems) = lex(source);
        assert!(problems.is_empty(), "unexpected problems: {problems:?}");
        let (name, attrs, self_closing) = start_tag(&tokens[0]);
        assert_eq!(name, "script");
        assert!(!self_closing);
        let names: Vec<_> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["src", "type", "defer", "data-x"]);
        assert_eq!(attrs[0].value.as_deref(), Some("a.js"));
        let span = attrs[0].value_span.unwrap();
        assert_eq!(&source[span.start..span.end], "a.js");
        assert_eq!(attrs[1].value.as_deref(), Some("module"));
        assert_eq!(attrs[2].value, None);
        assert_eq!(&source[attrs[2].name_span.start..attrs[2].name_span.end], "defer");
        assert_eq!(attrs[3].value.as_deref(), Some("1"));
    }

    #[test]
    fn spaces_around_equals() {
        let (tokens, _) = lex("<base href = \"/x/\">");
        let (_, attrs, _) = start_tag(&tokens[0]);
        assert_eq!(attrs[0].name, "href");
        assert_eq!(attrs[0].value.as_deref(), Some("/x/"));
    }

    #[test]
    fn self_closing_tags() {
        let (tokens, _) = lex("<br/><img src=a.png />");
        assert!(start_tag(&tokens[0]).2);
        let (name, attrs, self_closing) = start_tag(&tokens[1]);
        assert_eq!(name, "img");
        assert!(self_closing);
        assert_eq!(attrs[0].value.as_deref(), Some("a.png"));
    }

    #[test]
    fn script_body_is_raw_text() {
        let source = "<script>if (a < b && c > d) { x('</p>'); }</script>";
        let (tokens, problems) = lex(source);
        assert!(problems.is_empty());
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Text);
        let body = &source[tokens[1].span.start..tokens[1].span.end];
        assert_eq!(body, "if (a < b && c > d) { x('</p>'); }");
        assert_eq!(tokens[2].kind, TokenKind::EndTag { name: "script".to_string() });
    }

    #[test]
    fn empty_script_still_has_a_text_token() {
        let (tokens, _) = lex("<script src=a.js></SCRIPT>");
        assert_eq!(tokens[1].kind, TokenKind::Text);
        assert_eq!(tokens[1].span.start, tokens[1].span.end);
    }

    #[test]
    fn unterminated_script() {
        let (tokens, problems) = lex("<script>let x = 1;");
        assert_eq!(tokens.len(), 2);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].code, "unterminated-raw-text");
        assert_eq!(problems[0].span.start, 8);
    }

    #[test]
    fn unterminated_comment_and_attribute() {
        let (_, problems) = lex("<!-- never");
        assert_eq!(problems[0].code, "unterminated-comment");
        let (_, problems) = lex("<a href=\"x>");
        let codes: Vec<_> = problems.iter().map(|p| p.code).collect();
        assert_eq!(codes, vec!["unterminated-attribute", "unterminated-tag"]);
    }

    #[test]
    fn stray_angle_bracket_is_text() {
        let kinds = kinds("a < b <p>");
        assert_eq!(kinds[0], TokenKind::Text);
        assert_eq!(kinds[1], TokenKind::Text);
        assert!(matches!(kinds[2], TokenKind::StartTag { .. }));
    }

    #[test]
    fn multibyte_text_keeps_boundaries() {
        let source = "<p>héllo ✓</p>";
        let (tokens, _) = lex(source);
        let text = &source[tokens[1].span.start..tokens[1].span.end];
        assert_eq!(text, "héllo ✓");
    }
}
