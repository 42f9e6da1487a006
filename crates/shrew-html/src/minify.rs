//! The minification engine: in-place, lossless-intent tree rewriting.
//!
//! Minification mutates attribute values, tag-name case, singleton
//! markers and close-tag presence — never the tree structure. Every rule
//! sits behind its own switch in [`MinifyOptions`]; applying the engine
//! twice yields the same tree as applying it once.

use shrew_dom::{ElementData, NodeId, NodeKind, Tree};

use crate::config::{DefaultValue, HtmlConfig, MinifyOptions, UrlMinify};
use crate::entities;

/// Minify the whole document in place.
pub fn minify(tree: &mut Tree, config: &HtmlConfig, options: &MinifyOptions) {
    for child in tree.children(NodeId::ROOT).to_vec() {
        minify_node(tree, child, config, options);
    }
}

/// Depth-first, pre-order dispatch over node kinds.
///
/// Comments, CDATA sections, doctypes and raw-content bodies have no
/// minify behavior; removing them would restructure the tree, which the
/// engine never does.
fn minify_node(tree: &mut Tree, node: NodeId, config: &HtmlConfig, options: &MinifyOptions) {
    let is_text = matches!(tree.get(node).map(|n| &n.kind), Some(NodeKind::Text(_)));
    if is_text {
        if options.whitespace
            && let Some(text_node) = tree.get_mut(node)
            && let NodeKind::Text(content) = &mut text_node.kind
        {
            collapse_whitespace(content);
        }
        return;
    }
    if tree.as_element(node).is_some() {
        minify_element(tree, node, config, options);
    }
}

fn minify_element(tree: &mut Tree, node: NodeId, config: &HtmlConfig, options: &MinifyOptions) {
    if options.lowercase
        && let Some(element) = tree.as_element_mut(node)
    {
        element.name = element.name.to_ascii_lowercase();
    }

    // The option-value rule compares against the element's leading text
    // content; snapshot it before taking the mutable borrow.
    let first_text = tree
        .children(node)
        .first()
        .and_then(|&c| tree.as_text(c))
        .map(entities::decode);

    if let Some(element) = tree.as_element_mut(node) {
        minify_attributes(element, first_text.as_deref(), config, options);

        // Normalize however the source closed the singleton to plain `>`.
        if options.singleton && element.singleton.is_some() {
            element.singleton = Some(">".to_string());
        }
    }

    let name = tree
        .as_element(node)
        .map(|e| e.name.clone())
        .unwrap_or_default();

    if options.close
        && config.elements.is_close_optional(&name)
        && should_elide_close(tree, node, config, options)
        && let Some(element) = tree.as_element_mut(node)
    {
        element.explicit_close = false;
    }

    // Whitespace-sensitivity propagation: below a preformatted element
    // the collapsing rule is off for the whole subtree.
    let subtree_options;
    let options = if options.whitespace && config.elements.is_preformatted(&name) {
        subtree_options = MinifyOptions {
            whitespace: false,
            ..options.clone()
        };
        &subtree_options
    } else {
        options
    };
    for child in tree.children(node).to_vec() {
        minify_node(tree, child, config, options);
    }
}

/// The per-attribute pipeline, in rule-table order.
///
/// One pass over the keys in stored order; unaffected keys keep their
/// positions, and a lowercased key is renamed in place rather than
/// re-appended.
fn minify_attributes(
    element: &mut ElementData,
    first_text: Option<&str>,
    config: &HtmlConfig,
    options: &MinifyOptions,
) {
    for mut key in element.attributes.keys() {
        if options.lowercase {
            let lower = key.to_ascii_lowercase();
            if lower != key {
                element.attributes.rename(&key, &lower);
                key = lower;
            }
        }
        // A case-fold collision may have dropped this entry entirely.
        let Some(stored) = element.attributes.get(&key) else {
            continue;
        };
        let mut value: Option<String> = stored.map(str::to_string);
        let mut drop = false;

        if let Some(rules) = &options.attributes {
            if let Some(v) = value.as_mut() {
                let trimmed = v.trim().to_string();
                *v = trimmed;
            }
            if rules.boolean && config.attributes.is_boolean(&key) {
                value = None;
            } else if rules.style && key == "style" {
                if let Some(v) = value.take() {
                    value = Some(minify_style_value(&v));
                }
            } else if rules.class
                && key == "class"
                && value.as_deref().is_some_and(|v| v.contains(' '))
            {
                if let Some(v) = value.take() {
                    let mut classes: Vec<&str> = v.split_ascii_whitespace().collect();
                    classes.sort_unstable();
                    value = Some(classes.join(" "));
                }
            } else if rules.option
                && key == "value"
                && element.name.eq_ignore_ascii_case("option")
                && first_text.is_some()
                && first_text == value.as_deref()
            {
                drop = true;
            } else if rules.default
                && let Some(default) = config.attributes.default_for(&element.name, &key)
            {
                drop = match default {
                    DefaultValue::Always => true,
                    DefaultValue::Value(expected) => value.as_deref() == Some(expected.as_str()),
                };
            }
            if !drop
                && rules.empty
                && value.as_deref() == Some("")
                && config.attributes.is_empty_droppable(&key)
            {
                drop = true;
            }
        }

        if !drop
            && let Some(url_rules) = &options.urls
            && config.attributes.is_url(&key)
            && let Some(v) = value.as_mut()
        {
            minify_url_value(v, url_rules);
        }

        if drop {
            let _ = element.attributes.remove(&key);
        } else {
            element.attributes.set(key, value);
        }
    }
}

/// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
///
/// Whether this element's end tag can be omitted: every following
/// sibling up to the first blocker must be ignorable text, and the
/// blocker must itself be an optional-close element (or not exist).
///
/// Text siblings the whitespace pass empties (or has already emptied)
/// count as ignorable; anything else — non-blank text, comments, CDATA,
/// doctypes, elements outside the category — keeps the close tag.
fn should_elide_close(
    tree: &Tree,
    node: NodeId,
    config: &HtmlConfig,
    options: &MinifyOptions,
) -> bool {
    let Some(parent) = tree.parent(node) else {
        return false;
    };
    let siblings = tree.children(parent);
    let Some(position) = siblings.iter().position(|&s| s == node) else {
        return false;
    };
    for &sibling in &siblings[position + 1..] {
        match tree.get(sibling).map(|n| &n.kind) {
            Some(NodeKind::Text(content))
                if content.is_empty()
                    || (options.whitespace
                        && content.chars().all(|c| c.is_ascii_whitespace())) => {}
            Some(NodeKind::Element(data)) if config.elements.is_close_optional(&data.name) => {
                return true;
            }
            _ => return false,
        }
    }
    // No blocking sibling before the end of the children list.
    true
}

/// Collapse runs of ASCII whitespace to a single space; a node that is
/// nothing but whitespace collapses away entirely.
fn collapse_whitespace(content: &mut String) {
    if content.chars().all(|c| c.is_ascii_whitespace()) {
        content.clear();
        return;
    }
    let mut out = String::with_capacity(content.len());
    let mut last_was_space = false;
    for c in content.chars() {
        if c.is_ascii_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    *content = out;
}

/// Canonicalize inline-style spacing: whitespace runs become one space,
/// no space around `:` or `;`, and trailing separators go.
fn minify_style_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;
    for c in value.chars() {
        if c.is_ascii_whitespace() {
            pending_space = !out.is_empty();
        } else if c == ':' || c == ';' {
            pending_space = false;
            out.push(c);
        } else {
            if pending_space && !out.ends_with([':', ';']) {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out.trim_matches(&[';', ' '][..]).to_string()
}

/// The URL rules, in scheme → host → absolute order. Each prefix check
/// naturally only applies if the previous rule left it applicable.
fn minify_url_value(value: &mut String, rules: &UrlMinify) {
    // Strip the scheme when it matches the serving context, leaving a
    // protocol-relative URL.
    if rules.scheme {
        let prefix = rules.context.scheme.prefix();
        if value.starts_with(prefix) {
            *value = value[prefix.len() - 2..].to_string();
        }
    }

    // Strip the host for the serving domain, but only at a path boundary.
    if rules.host {
        let host_prefix = format!("//{}", rules.context.host);
        if let Some(rest) = value.strip_prefix(&host_prefix)
            && (rest.is_empty() || rest.starts_with('/'))
        {
            *value = rest.to_string();
        }
    }

    // Make absolute paths under the serving folder relative. A remaining
    // `//` prefix is a protocol-relative URL to another host, not a path.
    if rules.absolute && !value.starts_with("//") {
        let folder = rules.context.base_folder();
        if let Some(rest) = value.strip_prefix(&folder) {
            *value = rest.to_string();
        }
    }
}
