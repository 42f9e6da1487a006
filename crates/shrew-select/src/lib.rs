//! CSS-style selector parsing and matching.
//!
//! This crate implements the small fixed selector grammar the minifier's
//! query API supports — a subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/): type, universal,
//! id, class and attribute predicates, the `:first-child`/`:last-child`
//! pseudo-classes, and the descendant and child combinators.
//!
//! A selector is a flat list of [`Segment`]s. Segments without a leading
//! combinator are compound continuations evaluated against the same
//! element; a combinator hands the remaining suffix down to child
//! elements. Matching accumulates results in pre-order and performs no
//! deduplication.

use shrew_dom::{NodeId, Tree};
use thiserror::Error;

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two compound
    /// selectors."
    Descendant,
    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A child combinator is a greater-than sign (>)... an element B that
    /// is a direct child of element A."
    Child,
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// The comparison operator of an attribute test with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOp {
    /// `[attr=value]` — "whose value is exactly 'val'"
    Exact,
    /// `[attr^=value]` — "whose value begins with the prefix 'val'"
    Prefix,
    /// `[attr*=value]` — "whose value contains at least one instance of
    /// the substring 'val'"
    Substring,
    /// `[attr$=value]` — "whose value ends with the suffix 'val'"
    Suffix,
}

/// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
///
/// Structural pseudo-classes supported by the query engine. Positioning
/// counts element siblings only; text and comment nodes are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    /// [§ 4.12 :first-child](https://www.w3.org/TR/selectors-4/#the-first-child-pseudo)
    /// "an element that is first among its inclusive siblings"
    FirstChild,
    /// [§ 4.12 :last-child](https://www.w3.org/TR/selectors-4/#the-last-child-pseudo)
    /// "an element that is last among its inclusive siblings"
    LastChild,
}

/// The single condition a [`Segment`] places on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// Tag name comparison, ASCII case-insensitive.
    Tag(String),
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// `*` — matches any element.
    Universal,
    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// `#value` — the id attribute equals the value.
    Id(String),
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// `.value` — the class attribute contains the value as a
    /// whitespace-separated token.
    Class(String),
    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    /// `[name]` existence, or `[name<op>value]` comparison.
    Attribute {
        /// The attribute key to look up.
        name: String,
        /// `None` for a bare existence test, otherwise the comparison.
        test: Option<(AttributeOp, String)>,
    },
    /// A structural pseudo-class test.
    Pseudo(PseudoClass),
}

/// One step of a selector: an optional leading combinator and exactly one
/// predicate.
///
/// The first segment of a selector usually has no combinator; a leading
/// child combinator (`> p`) restricts the whole search to the direct
/// children of the starting element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Relationship to the previous segment, `None` for a compound
    /// continuation on the same element.
    pub combinator: Option<Combinator>,
    /// The condition tested by this segment.
    pub predicate: Predicate,
}

/// A parsed, non-empty selector ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    segments: Vec<Segment>,
}

/// Caller-misuse errors from selector parsing.
///
/// Distinct from "no match": a selector that parses but matches nothing
/// returns an empty result list, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The input contained no segments at all.
    #[error("selector is empty")]
    Empty,
    /// A `:name` pseudo-class outside the supported set.
    #[error("unknown pseudo-class `:{0}`")]
    UnknownPseudoClass(String),
    /// `#`, `.`, `:` or `[` was not followed by an identifier.
    #[error("expected an identifier at byte {pos}")]
    ExpectedIdentifier {
        /// Byte offset of the offending position in the input.
        pos: usize,
    },
    /// A character with no meaning in the selector grammar.
    #[error("unexpected character `{ch}` at byte {pos}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset of the character in the input.
        pos: usize,
    },
    /// An attribute test was missing its closing bracket or quote.
    #[error("unterminated attribute test")]
    UnterminatedAttribute,
    /// `^`, `$` or `*` inside an attribute test without a following `=`.
    #[error("expected `=` after comparison operator at byte {pos}")]
    ExpectedEquals {
        /// Byte offset of the position after the operator character.
        pos: usize,
    },
    /// The selector ended right after a combinator.
    #[error("dangling combinator at end of selector")]
    DanglingCombinator,
}

impl Selector {
    /// Parse a selector string into segments.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] describing the first syntax problem;
    /// see the variant docs for the conditions.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut segments = Vec::new();
        let mut pending: Option<Combinator> = None;
        let mut chars = input.char_indices().peekable();

        while let Some(&(pos, ch)) = chars.peek() {
            match ch {
                c if c.is_ascii_whitespace() => {
                    let _ = chars.next();
                    // Whitespace is the descendant combinator, unless a `>`
                    // upgrades it or no segment has been produced yet.
                    if !segments.is_empty() && pending.is_none() {
                        pending = Some(Combinator::Descendant);
                    }
                }
                '>' => {
                    let _ = chars.next();
                    pending = Some(Combinator::Child);
                }
                '*' => {
                    let _ = chars.next();
                    segments.push(Segment {
                        combinator: pending.take(),
                        predicate: Predicate::Universal,
                    });
                }
                '#' => {
                    let _ = chars.next();
                    let name = read_identifier(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::ExpectedIdentifier { pos });
                    }
                    segments.push(Segment {
                        combinator: pending.take(),
                        predicate: Predicate::Id(name),
                    });
                }
                '.' => {
                    let _ = chars.next();
                    let name = read_identifier(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::ExpectedIdentifier { pos });
                    }
                    segments.push(Segment {
                        combinator: pending.take(),
                        predicate: Predicate::Class(name),
                    });
                }
                ':' => {
                    let _ = chars.next();
                    let name = read_identifier(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::ExpectedIdentifier { pos });
                    }
                    let pseudo = match name.as_str() {
                        "first-child" => PseudoClass::FirstChild,
                        "last-child" => PseudoClass::LastChild,
                        _ => return Err(SelectorError::UnknownPseudoClass(name)),
                    };
                    segments.push(Segment {
                        combinator: pending.take(),
                        predicate: Predicate::Pseudo(pseudo),
                    });
                }
                '[' => {
                    let _ = chars.next();
                    let predicate = parse_attribute_test(&mut chars, pos)?;
                    segments.push(Segment {
                        combinator: pending.take(),
                        predicate,
                    });
                }
                c if is_identifier_char(c) => {
                    let name = read_identifier(&mut chars);
                    segments.push(Segment {
                        combinator: pending.take(),
                        predicate: Predicate::Tag(name),
                    });
                }
                c => return Err(SelectorError::UnexpectedCharacter { ch: c, pos }),
            }
        }

        if segments.is_empty() {
            return Err(SelectorError::Empty);
        }
        // A trailing descendant combinator is just trailing whitespace;
        // a trailing child combinator has nothing to apply to.
        if pending == Some(Combinator::Child) {
            return Err(SelectorError::DanglingCombinator);
        }
        Ok(Self { segments })
    }

    /// The parsed segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// True for characters that may appear in a tag/id/class identifier.
const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_')
}

/// Consume a run of identifier characters.
fn read_identifier(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
    let mut out = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if is_identifier_char(c) {
            out.push(c);
            let _ = chars.next();
        } else {
            break;
        }
    }
    out
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// Parse the inside of `[...]`; the opening bracket is already consumed.
fn parse_attribute_test(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    open_pos: usize,
) -> Result<Predicate, SelectorError> {
    skip_whitespace(chars);
    let name = read_identifier(chars);
    if name.is_empty() {
        return Err(SelectorError::ExpectedIdentifier { pos: open_pos });
    }
    skip_whitespace(chars);

    let op = match chars.peek() {
        Some(&(_, ']')) => {
            let _ = chars.next();
            return Ok(Predicate::Attribute { name, test: None });
        }
        Some(&(_, '=')) => {
            let _ = chars.next();
            AttributeOp::Exact
        }
        Some(&(pos, c @ ('^' | '$' | '*'))) => {
            let _ = chars.next();
            match chars.peek() {
                Some(&(_, '=')) => {
                    let _ = chars.next();
                }
                _ => return Err(SelectorError::ExpectedEquals { pos: pos + c.len_utf8() }),
            }
            match c {
                '^' => AttributeOp::Prefix,
                '$' => AttributeOp::Suffix,
                _ => AttributeOp::Substring,
            }
        }
        Some(&(pos, c)) => return Err(SelectorError::UnexpectedCharacter { ch: c, pos }),
        None => return Err(SelectorError::UnterminatedAttribute),
    };

    skip_whitespace(chars);
    let value = read_attribute_value(chars)?;
    skip_whitespace(chars);
    match chars.next() {
        Some((_, ']')) => Ok(Predicate::Attribute {
            name,
            test: Some((op, value)),
        }),
        _ => Err(SelectorError::UnterminatedAttribute),
    }
}

/// Read an attribute test value, quoted or bare.
fn read_attribute_value(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<String, SelectorError> {
    let mut out = String::new();
    match chars.peek() {
        Some(&(_, quote @ ('"' | '\''))) => {
            let _ = chars.next();
            loop {
                match chars.next() {
                    Some((_, c)) if c == quote => break,
                    Some((_, c)) => out.push(c),
                    None => return Err(SelectorError::UnterminatedAttribute),
                }
            }
        }
        _ => {
            while let Some(&(_, c)) = chars.peek() {
                if c == ']' || c.is_ascii_whitespace() {
                    break;
                }
                out.push(c);
                let _ = chars.next();
            }
        }
    }
    Ok(out)
}

/// Skip ASCII whitespace inside an attribute test.
fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) {
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_whitespace() {
            let _ = chars.next();
        } else {
            break;
        }
    }
}

/// Match a selector against the subtree rooted at `start`.
///
/// `start` must be an element node; the result lists every matching
/// element in pre-order. The same node can appear more than once when
/// multiple delegation paths reach it — callers wanting set semantics
/// deduplicate themselves.
#[must_use]
pub fn find(tree: &Tree, start: NodeId, selector: &Selector) -> Vec<NodeId> {
    find_segments(tree, start, selector.segments())
}

/// The recursive accumulate/delegate matcher.
///
/// Mirrors the query engine's three-way control flow: a leading child
/// combinator restricts the scan to this level, an interior combinator
/// hands the remaining suffix to every direct element child, and
/// everything else is a predicate evaluated against this element.
fn find_segments(tree: &Tree, node: NodeId, segments: &[Segment]) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut matched = true;
    let mut search_children = true;

    for (i, segment) in segments.iter().enumerate() {
        // Only search this level.
        if i == 0 && segment.combinator == Some(Combinator::Child) {
            search_children = false;
        }

        // Pass the rest of the selector to the level below.
        if i > 0 && segment.combinator.is_some() {
            matched = false;
            for child in tree.child_elements(node) {
                found.extend(find_segments(tree, child, &segments[i..]));
            }
            break;
        }

        if !matches_predicate(tree, node, &segment.predicate) {
            matched = false;
            break;
        }
    }

    if matched {
        found.push(node);
    }
    if search_children {
        for child in tree.child_elements(node) {
            found.extend(find_segments(tree, child, segments));
        }
    }
    found
}

/// Evaluate a single predicate against an element node.
fn matches_predicate(tree: &Tree, node: NodeId, predicate: &Predicate) -> bool {
    let Some(element) = tree.as_element(node) else {
        return false;
    };
    match predicate {
        Predicate::Universal => true,
        Predicate::Tag(name) => element.name.eq_ignore_ascii_case(name),
        Predicate::Id(id) => element.id() == Some(id.as_str()),
        Predicate::Class(class) => element.classes().contains(&class.as_str()),
        Predicate::Attribute { name, test } => {
            let Some(value) = element.attributes.get(name) else {
                return false;
            };
            match test {
                None => true,
                Some((op, expected)) => {
                    let actual = value.unwrap_or("");
                    match op {
                        AttributeOp::Exact => actual == expected,
                        AttributeOp::Prefix => actual.starts_with(expected.as_str()),
                        AttributeOp::Substring => actual.contains(expected.as_str()),
                        AttributeOp::Suffix => actual.ends_with(expected.as_str()),
                    }
                }
            }
        }
        Predicate::Pseudo(pseudo) => {
            let Some(parent) = tree.parent(node) else {
                return false;
            };
            match pseudo {
                PseudoClass::FirstChild => tree.first_element_child(parent) == Some(node),
                PseudoClass::LastChild => tree.last_element_child(parent) == Some(node),
            }
        }
    }
}
