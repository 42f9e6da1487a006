//! Element categories, attribute tables and the minification option tree.
//!
//! The parser and minifier are table-driven: which elements are void,
//! which end tags are optional, which attributes are boolean and so on
//! all come from [`HtmlConfig`]. The defaults mirror the HTML5 lists;
//! callers embedding non-HTML vocabularies swap in their own tables.

use serde::{Deserialize, Serialize};

/// Element category tables.
///
/// Names are matched ASCII case-insensitively everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementCategories {
    /// [§ 13.1.2 Void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
    /// "Void elements only have a start tag; end tags must not be
    /// specified for void elements." These never own children.
    pub singleton: Vec<String>,
    /// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
    /// Elements whose end tag may be omitted when context makes the
    /// boundary unambiguous.
    pub close_optional: Vec<String>,
    /// [§ 13.1.2 Raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
    /// Elements whose body is captured verbatim, never parsed as markup.
    pub raw: Vec<String>,
    /// [§ 4.4.3 The pre element](https://html.spec.whatwg.org/multipage/grouping-content.html#the-pre-element)
    /// Elements whose subtree is whitespace-sensitive; whitespace
    /// collapsing is disabled below them.
    pub preformatted: Vec<String>,
}

impl ElementCategories {
    /// Whether `name` is a void element.
    #[must_use]
    pub fn is_singleton(&self, name: &str) -> bool {
        contains_ci(&self.singleton, name)
    }

    /// Whether `name` may omit its end tag.
    #[must_use]
    pub fn is_close_optional(&self, name: &str) -> bool {
        contains_ci(&self.close_optional, name)
    }

    /// Whether `name` has a raw (unparsed) body.
    #[must_use]
    pub fn is_raw(&self, name: &str) -> bool {
        contains_ci(&self.raw, name)
    }

    /// Whether `name` roots a whitespace-sensitive subtree.
    #[must_use]
    pub fn is_preformatted(&self, name: &str) -> bool {
        contains_ci(&self.preformatted, name)
    }
}

impl Default for ElementCategories {
    fn default() -> Self {
        Self {
            singleton: to_names(&[
                "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
                "param", "source", "track", "wbr",
            ]),
            close_optional: to_names(&[
                "html", "head", "body", "p", "dt", "dd", "li", "option", "optgroup", "colgroup",
                "caption", "thead", "tbody", "tfoot", "tr", "td", "th", "rt", "rp",
            ]),
            raw: to_names(&["script", "style"]),
            preformatted: to_names(&["pre", "textarea"]),
        }
    }
}

/// A per-tag default attribute value that minification may drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// The attribute is redundant whatever its value.
    Always,
    /// The attribute is redundant when its value equals this string.
    Value(String),
}

/// Attribute tables consulted by the minifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeTables {
    /// [§ 2.3.2 Boolean attributes](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#boolean-attributes)
    /// "The presence of a boolean attribute on an element represents the
    /// true value" — any written value is noise.
    pub boolean: Vec<String>,
    /// Attributes whose values are URLs, eligible for scheme/host/path
    /// stripping.
    pub url: Vec<String>,
    /// Attributes that carry no information when their value is empty.
    pub empty_droppable: Vec<String>,
    /// `(tag, key, default)` rows; a stored value matching its row (or an
    /// [`DefaultValue::Always`] row) is dropped.
    pub default_values: Vec<(String, String, DefaultValue)>,
}

impl AttributeTables {
    /// Whether `key` names a boolean attribute.
    #[must_use]
    pub fn is_boolean(&self, key: &str) -> bool {
        contains_ci(&self.boolean, key)
    }

    /// Whether `key` names a URL-bearing attribute.
    #[must_use]
    pub fn is_url(&self, key: &str) -> bool {
        contains_ci(&self.url, key)
    }

    /// Whether `key` may be dropped when its value is empty.
    #[must_use]
    pub fn is_empty_droppable(&self, key: &str) -> bool {
        contains_ci(&self.empty_droppable, key)
    }

    /// Look up the default-value rule for a `(tag, key)` pair.
    #[must_use]
    pub fn default_for(&self, tag: &str, key: &str) -> Option<&DefaultValue> {
        self.default_values
            .iter()
            .find(|(t, k, _)| t.eq_ignore_ascii_case(tag) && k.eq_ignore_ascii_case(key))
            .map(|(_, _, d)| d)
    }
}

impl Default for AttributeTables {
    fn default() -> Self {
        Self {
            boolean: to_names(&[
                "allowfullscreen", "async", "autofocus", "autoplay", "checked", "controls",
                "default", "defer", "disabled", "formnovalidate", "hidden", "ismap", "itemscope",
                "loop", "multiple", "muted", "nomodule", "novalidate", "open", "playsinline",
                "readonly", "required", "reversed", "selected",
            ]),
            url: to_names(&["href", "src", "action", "poster", "cite", "data"]),
            empty_droppable: to_names(&["id", "class", "style", "title", "alt"]),
            default_values: vec![
                row("script", "type", DefaultValue::Always),
                row("style", "type", DefaultValue::Value("text/css".to_string())),
                row("link", "type", DefaultValue::Value("text/css".to_string())),
                row("form", "method", DefaultValue::Value("get".to_string())),
                row("input", "type", DefaultValue::Value("text".to_string())),
                row("button", "type", DefaultValue::Value("submit".to_string())),
            ],
        }
    }
}

/// The full parser/minifier configuration.
///
/// Shared immutably: a [`Document`](crate::Document) holds it behind an
/// `Arc` and nodes only ever read it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HtmlConfig {
    /// Element category tables.
    pub elements: ElementCategories,
    /// Attribute tables.
    pub attributes: AttributeTables,
}

/// The scheme of the serving context, for URL minification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// `http://`
    Http,
    /// `https://`
    Https,
}

impl Scheme {
    /// The scheme prefix including the `://` separator.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Http => "http://",
            Self::Https => "https://",
        }
    }
}

/// The serving context URLs are minified against.
///
/// Explicit caller-supplied configuration — the minifier never reads the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlContext {
    /// Scheme of the current request.
    pub scheme: Scheme,
    /// Host (and optional port) of the current request, without scheme.
    pub host: String,
    /// Absolute path of the current request, e.g. `/docs/index.html`.
    pub path: String,
}

impl UrlContext {
    /// The base folder of [`UrlContext::path`], with a trailing slash.
    ///
    /// `/docs/index.html` → `/docs/`; a path already ending in `/` is its
    /// own base folder.
    #[must_use]
    pub fn base_folder(&self) -> String {
        if self.path.ends_with('/') {
            return self.path.clone();
        }
        match self.path.rfind('/') {
            Some(idx) => self.path[..=idx].to_string(),
            None => "/".to_string(),
        }
    }
}

/// Switches for the per-attribute minification rules.
///
/// Value trimming is implied by the presence of this group, matching the
/// rule table: every enabled attribute pass starts by trimming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeMinify {
    /// Force boolean attributes to the value-less form.
    pub boolean: bool,
    /// Canonicalize `style` attribute spacing.
    pub style: bool,
    /// Sort `class` tokens lexicographically.
    pub class: bool,
    /// Drop an `option` element's `value` when it repeats the text.
    pub option: bool,
    /// Drop attributes matching the per-tag default table.
    pub default: bool,
    /// Drop empty values of droppable-when-empty attributes.
    pub empty: bool,
}

impl Default for AttributeMinify {
    fn default() -> Self {
        Self {
            boolean: true,
            style: true,
            class: true,
            option: true,
            default: true,
            empty: true,
        }
    }
}

/// Switches for URL minification, with the context they apply against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlMinify {
    /// Strip `http://`/`https://` matching the context scheme, leaving a
    /// protocol-relative URL.
    pub scheme: bool,
    /// Strip `//host` when it is the context host and a path boundary
    /// follows immediately.
    pub host: bool,
    /// Strip the context base folder from absolute paths, leaving a
    /// relative path.
    pub absolute: bool,
    /// The serving context to minify against.
    pub context: UrlContext,
}

/// The minification option tree.
///
/// Every switch is independent; an unset switch skips its rule entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinifyOptions {
    /// Fold tag names and attribute keys to lowercase.
    pub lowercase: bool,
    /// Collapse whitespace in text content (disabled automatically inside
    /// preformatted subtrees).
    pub whitespace: bool,
    /// Per-attribute rules; `None` skips the whole group including
    /// trimming.
    pub attributes: Option<AttributeMinify>,
    /// URL rules; `None` when no serving context is available.
    pub urls: Option<UrlMinify>,
    /// Normalize stored singleton markers to a plain `>`.
    pub singleton: bool,
    /// Omit optional closing tags where following siblings permit.
    pub close: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            whitespace: true,
            attributes: Some(AttributeMinify::default()),
            urls: None,
            singleton: true,
            close: true,
        }
    }
}

impl MinifyOptions {
    /// Options with every rule disabled; useful as a base for enabling
    /// rules one by one.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            lowercase: false,
            whitespace: false,
            attributes: None,
            urls: None,
            singleton: false,
            close: false,
        }
    }
}

fn to_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

fn row(tag: &str, key: &str, default: DefaultValue) -> (String, String, DefaultValue) {
    (tag.to_string(), key.to_string(), default)
}

fn contains_ci(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}
