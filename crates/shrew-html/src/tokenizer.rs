//! The lexical scanner: raw markup text to a flat token stream.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! A single forward pass with no backtracking. The scanner never fails:
//! anything it cannot make sense of degrades to a [`TokenKind::Text`]
//! token and the tree builder's recovery rules take it from there. Unlike
//! a browser tokenizer it does not assemble whole tag tokens — the tree
//! builder wants the syntactic pieces (`<name`, attribute name, `=value`,
//! `>`) individually so it can repair malformed tags one token at a time.

use crate::config::HtmlConfig;
use crate::token::{Token, TokenKind};

/// Tokenize `input` using `config` to recognize raw-content elements.
///
/// The body of a raw-content element (`script`, `style`) is captured as
/// one verbatim `Text` token up to the matching close tag, per
/// [§ 13.1.2 Raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements).
#[must_use]
pub fn tokenize(input: &str, config: &HtmlConfig) -> Vec<Token> {
    Tokenizer::new(input, config).run()
}

/// The scanner state: a position over the input plus the token sink.
struct Tokenizer<'a> {
    input: &'a str,
    config: &'a HtmlConfig,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str, config: &'a HtmlConfig) -> Self {
        Self {
            input,
            config,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.input.len() {
            if self.byte() == Some(b'<') {
                self.scan_markup();
            } else {
                self.scan_text();
            }
        }
        self.tokens
    }

    fn byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    fn starts_with_ci(&self, prefix: &str) -> bool {
        self.input
            .as_bytes()
            .get(self.pos..self.pos + prefix.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(prefix.as_bytes()))
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token::new(kind, &self.input[start..end]));
    }

    /// Character data up to the next `<` (or the end of input).
    fn scan_text(&mut self) {
        let start = self.pos;
        self.pos = self.find_byte(b'<', self.pos + 1).unwrap_or(self.input.len());
        self.emit(TokenKind::Text, start, self.pos);
    }

    /// Dispatch on what follows a `<`.
    fn scan_markup(&mut self) {
        if self.starts_with_ci("</") {
            self.scan_close_tag();
        } else if self.starts_with_ci("<!--") {
            self.scan_delimited(TokenKind::Comment, "-->");
        } else if self.starts_with_ci("<![CDATA[") {
            self.scan_delimited(TokenKind::Cdata, "]]>");
        } else if self.starts_with_ci("<!DOCTYPE") {
            self.scan_delimited(TokenKind::Doctype, ">");
        } else if self.starts_with_ci("<!") {
            // Bogus markup declaration; keep it around as a comment.
            self.scan_delimited(TokenKind::Comment, ">");
        } else if self.byte_at(1).is_some_and(|b| b.is_ascii_alphabetic()) {
            self.scan_open_tag();
        } else {
            // A `<` that opens nothing is character data.
            self.scan_text();
        }
    }

    /// A construct running from the current `<` to `terminator`, emitted
    /// verbatim including both delimiters. Unterminated constructs take
    /// the rest of the input.
    fn scan_delimited(&mut self, kind: TokenKind, terminator: &str) {
        let start = self.pos;
        let end = self
            .find_str(terminator, start + 1)
            .map_or(self.input.len(), |idx| idx + terminator.len());
        self.pos = end;
        self.emit(kind, start, end);
    }

    /// `</name ...>`, emitted as one token with its delimiters.
    fn scan_close_tag(&mut self) {
        let start = self.pos;
        let end = self
            .find_byte(b'>', start)
            .map_or(self.input.len(), |idx| idx + 1);
        self.pos = end;
        self.emit(TokenKind::TagClose, start, end);
    }

    /// `<name`, then the attribute tokens, then `>` or `/>`.
    fn scan_open_tag(&mut self) {
        let start = self.pos;
        let mut end = self.pos + 1;
        while self
            .input
            .as_bytes()
            .get(end)
            .is_some_and(|&b| is_tag_name_byte(b))
        {
            end += 1;
        }
        let name = self.input[start + 1..end].to_string();
        self.emit(TokenKind::TagOpenStart, start, end);
        self.pos = end;
        self.scan_tag_interior(&name);
    }

    /// Everything between `<name` and the tag terminator.
    fn scan_tag_interior(&mut self, name: &str) {
        loop {
            self.skip_whitespace();
            match self.byte() {
                None => return,
                Some(b'>') => {
                    self.emit(TokenKind::TagOpenEnd, self.pos, self.pos + 1);
                    self.pos += 1;
                    if self.config.elements.is_raw(name) {
                        self.scan_raw_content(name);
                    }
                    return;
                }
                Some(b'/') if self.byte_at(1) == Some(b'>') => {
                    self.emit(TokenKind::TagSelfClose, self.pos, self.pos + 2);
                    self.pos += 2;
                    return;
                }
                Some(b'/') => {
                    // A stray slash before the terminator carries nothing.
                    self.pos += 1;
                }
                Some(b'<') => {
                    // The tag was never terminated; let the next construct
                    // start fresh and the builder repair the nesting.
                    return;
                }
                Some(b'=') => self.scan_attribute_value(),
                Some(_) => self.scan_attribute_name(),
            }
        }
    }

    /// A run of name characters, emitted bare; a following `=` starts the
    /// value token.
    fn scan_attribute_name(&mut self) {
        let start = self.pos;
        while self
            .byte()
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'/' | b'>' | b'<'))
        {
            self.pos += 1;
        }
        self.emit(TokenKind::AttributeName, start, self.pos);
        let checkpoint = self.pos;
        self.skip_whitespace();
        if self.byte() == Some(b'=') {
            self.scan_attribute_value();
        } else {
            // No value; rewind so interior whitespace handling stays uniform.
            self.pos = checkpoint;
        }
    }

    /// `=`, optional whitespace, then a quoted or unquoted value. The
    /// token keeps the `=`, the whitespace and the quotes as written.
    fn scan_attribute_value(&mut self) {
        let start = self.pos;
        self.pos += 1;
        self.skip_whitespace();
        match self.byte() {
            Some(quote @ (b'"' | b'\'')) => {
                let end = self
                    .find_byte(quote, self.pos + 1)
                    .map_or(self.input.len(), |idx| idx + 1);
                self.pos = end;
            }
            _ => {
                while self
                    .byte()
                    .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'>' | b'<'))
                {
                    self.pos += 1;
                }
            }
        }
        self.emit(TokenKind::AttributeValue, start, self.pos);
    }

    /// [§ 13.1.2 Raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
    ///
    /// Capture everything up to `</name` as one verbatim text token, then
    /// the close tag itself. Runs right after the raw element's `>`.
    fn scan_raw_content(&mut self, name: &str) {
        let needle = format!("</{name}");
        match self.find_str_ci(&needle, self.pos) {
            Some(idx) => {
                if idx > self.pos {
                    self.emit(TokenKind::Text, self.pos, idx);
                }
                let end = self
                    .find_byte(b'>', idx)
                    .map_or(self.input.len(), |gt| gt + 1);
                self.emit(TokenKind::TagClose, idx, end);
                self.pos = end;
            }
            None => {
                // Unterminated raw content runs to the end of input.
                if self.pos < self.input.len() {
                    self.emit(TokenKind::Text, self.pos, self.input.len());
                }
                self.pos = self.input.len();
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.byte().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn find_byte(&self, needle: u8, from: usize) -> Option<usize> {
        self.input
            .as_bytes()
            .get(from..)
            .and_then(|haystack| haystack.iter().position(|&b| b == needle))
            .map(|idx| from + idx)
    }

    fn find_str(&self, needle: &str, from: usize) -> Option<usize> {
        self.input
            .get(from..)
            .and_then(|haystack| haystack.find(needle))
            .map(|idx| from + idx)
    }

    fn find_str_ci(&self, needle: &str, from: usize) -> Option<usize> {
        let haystack = self.input.as_bytes().get(from..)?;
        let needle = needle.as_bytes();
        if needle.is_empty() || haystack.len() < needle.len() {
            return None;
        }
        (0..=haystack.len() - needle.len())
            .find(|&idx| haystack[idx..idx + needle.len()].eq_ignore_ascii_case(needle))
            .map(|idx| from + idx)
    }
}

/// Tag names: ASCII alphanumerics plus the separators custom elements and
/// namespaced names use.
const fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':')
}
