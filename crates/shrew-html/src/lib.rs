//! HTML tokenizer, tree builder, minifier and serializer.
//!
//! # Scope
//!
//! This crate implements the core of the shrew toolkit:
//!
//! - **Tokenizer** — a single-pass lexical scanner producing the flat
//!   token stream the tree builder consumes (tag fragments, attribute
//!   names and values, character data, comments, CDATA, doctypes)
//! - **Tree Builder** — a recursive, backtracking automaton that
//!   reconstructs proper nesting from the token stream using one token of
//!   lookahead and a single-step rewind, emulating HTML5's optional-tag
//!   and void-element rules ([§ 13.1.2](https://html.spec.whatwg.org/multipage/syntax.html#elements-2))
//!   without a validating grammar
//! - **Minification Engine** — table-driven, lossless-intent rewriting of
//!   attributes, singleton notation and closing-tag presence
//! - **Serializer** — markup output with configurable quoting, escaping
//!   and closing-tag policy
//! - **Document facade** — ties the tree to its shared configuration and
//!   exposes parse/minify/find/text/serialize in one place
//!
//! # Not implemented
//!
//! - Markup validation: malformed input is repaired, never rejected
//! - Full CSS selectors: querying supports the fixed grammar of
//!   [`shrew_select`]
//! - Streaming: the whole tree is materialized before any other operation

/// The tree builder: token stream to document tree.
pub mod builder;
/// Element categories, attribute tables and minify options.
pub mod config;
/// The document facade and debugging helpers.
pub mod document;
/// Character reference decoding and attribute-value escaping.
pub mod entities;
/// The minification engine.
pub mod minify;
/// The serializer and its options.
pub mod serialize;
/// Lexical tokens and the rewindable cursor.
pub mod token;
/// The lexical scanner.
pub mod tokenizer;

pub use builder::build;
pub use config::{
    AttributeMinify, AttributeTables, DefaultValue, ElementCategories, HtmlConfig, MinifyOptions,
    Scheme, UrlContext, UrlMinify,
};
pub use document::{Document, dump_tree};
pub use minify::minify;
pub use serialize::{QuoteStyle, SerializeOptions, serialize, serialize_node};
pub use token::{Token, TokenCursor, TokenKind};
pub use tokenizer::tokenize;
