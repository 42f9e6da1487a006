//! Lexical tokens and the rewindable cursor the tree builder consumes.

use core::fmt;

use strum_macros::Display;

/// The kind of a lexical token.
///
/// [§ 13.1 Writing HTML documents](https://html.spec.whatwg.org/multipage/syntax.html#writing)
/// The scanner splits markup along the syntactic seams of a tag rather
/// than into fully-assembled tag tokens: attribute names and values are
/// separate tokens so the tree builder can resolve oddities (duplicate
/// names, values without names) itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    /// A doctype declaration, e.g. `<!DOCTYPE html>`.
    Doctype,
    /// The start of an open tag including the name, e.g. `<div`.
    TagOpenStart,
    /// A bare attribute name inside an open tag.
    AttributeName,
    /// An attribute value including the `=` and any quotes, e.g. `="x"`.
    AttributeValue,
    /// The plain `>` terminating an open tag.
    TagOpenEnd,
    /// The `/>` self-closing terminator.
    TagSelfClose,
    /// A complete close tag, e.g. `</div>`.
    TagClose,
    /// A run of character data.
    Text,
    /// A CDATA section including its delimiters.
    Cdata,
    /// A comment including its delimiters.
    Comment,
}

/// One lexical token: a kind plus the raw source slice it covers.
///
/// Values are kept verbatim — `TagOpenStart` keeps its `<`, `TagClose`
/// its delimiters, `AttributeValue` its `=` and quotes — so the builder
/// and serializer can reproduce the source faithfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What this token is.
    pub kind: TokenKind,
    /// The raw text of the token.
    pub value: String,
}

impl Token {
    /// Create a token from a kind and its raw text.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.value)
    }
}

/// A movable position over a token slice with single-step rewind.
///
/// The cursor is the tree builder's only time-travel primitive: a level
/// that reads a token it cannot handle rewinds exactly one slot and
/// returns, and its caller re-reads the same token at its own level.
/// Each parse invocation owns its cursor; it is never shared.
#[derive(Debug)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    index: usize,
}

impl<'t> TokenCursor<'t> {
    /// Create a cursor positioned on the first token.
    #[must_use]
    pub const fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    /// The token under the cursor, `None` once the stream is exhausted.
    #[must_use]
    pub fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.index)
    }

    /// Step forward and return the new current token, `None` at the end.
    pub fn advance(&mut self) -> Option<&'t Token> {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        self.tokens.get(self.index)
    }

    /// Step back exactly one slot.
    ///
    /// The position is exactly restorable: a `rewind` followed by an
    /// `advance` yields the same token again.
    pub fn rewind(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Current index into the underlying slice.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.index
    }
}
