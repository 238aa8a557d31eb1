//! The rendering pass: a pure planning step that resolves every marked key
//! against the dictionary, plus the thin adapter that writes the plan into
//! the document tree.

use std::collections::HashMap;

use serde_json::Value;

use crate::dictionary::Dictionary;
use crate::dom::{Document, Element, Node};
use crate::lang::Lang;

/// Attribute that opts an element into translation; its value is the key.
pub const TRANSLATE_ATTR: &str = "data-i18n";
/// Id of the indicator element showing the active language.
pub const INDICATOR_ID: &str = "current-lang";
/// Id of the dropdown closed when a language is picked.
pub const DROPDOWN_ID: &str = "lang-dropdown";
/// Class marking the one child element a substitution must not destroy.
pub const ICON_CLASS: &str = "icon";
/// Reserved dictionary path supplying the page title.
pub const TITLE_KEY: &str = "meta.title";

/// One planned substitution: the key of a marked element and the text to put
/// there, or `None` when the element is to be left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub key: String,
    pub text: Option<String>,
}

/// Renders a resolved leaf as display text.
///
/// Values a browser would treat as falsy (`null`, `false`, `0`, `""`) yield
/// `None` and leave the element untouched; strings pass through verbatim and
/// anything else renders as its JSON text.
pub fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Collects the keys of every marked element, in document order.
pub fn marked_keys(root: &Element) -> Vec<String> {
    let mut keys = Vec::new();
    root.walk(&mut |el| {
        if let Some(key) = el.attr(TRANSLATE_ATTR) {
            keys.push(key.to_string());
        }
    });
    keys
}

/// Pure planning step: resolves each key against the dictionary.
///
/// A key that fails to resolve is assigned its own literal text, so missing
/// translations stay visible on the page.
pub fn plan(dictionary: &Dictionary, keys: &[String]) -> Vec<Assignment> {
    keys.iter()
        .map(|key| {
            let text = match dictionary.resolve_or_warn(key) {
                Some(value) => display_text(value),
                None => Some(key.clone()),
            };
            Assignment {
                key: key.clone(),
                text,
            }
        })
        .collect()
}

/// Applies the dictionary to the document: substitutes every marked element
/// and syncs the title in the same pass. Safe to run any number of times.
pub fn apply_translations(document: &mut Document, dictionary: &Dictionary) {
    let keys = marked_keys(document.root());
    let assignments: HashMap<String, Option<String>> = plan(dictionary, &keys)
        .into_iter()
        .map(|a| (a.key, a.text))
        .collect();

    document.root_mut().walk_mut(&mut |el| {
        let Some(key) = el.attr(TRANSLATE_ATTR) else {
            return;
        };
        if let Some(Some(text)) = assignments.get(key) {
            let text = text.clone();
            substitute(el, &text);
        }
    });

    update_page_title(document, dictionary);
}

/// Replaces an element's text content, sparing a recognized icon child: the
/// icon is detached and re-inserted ahead of the new text instead of being
/// destroyed with the rest.
fn substitute(el: &mut Element, text: &str) {
    match el.detach_child(|child| child.has_class(ICON_CLASS)) {
        Some(icon) => {
            el.children = vec![Node::Element(icon), Node::Text(format!(" {text}"))];
        }
        None => el.set_text(text),
    }
}

/// Sets the page title from the reserved `meta.title` path; a dictionary
/// without one leaves the title as it was.
pub fn update_page_title(document: &mut Document, dictionary: &Dictionary) {
    if let Some(value) = dictionary.resolve(TITLE_KEY) {
        if let Some(title) = display_text(value) {
            document.set_title(title);
        }
    }
}

/// Writes the fixed icon+label pairing for `code` into the indicator
/// element. Codes outside the supported set, or a page without an indicator,
/// leave everything untouched.
pub fn update_language_switcher(document: &mut Document, code: &str) {
    let Some(lang) = Lang::from_code(code) else {
        return;
    };
    let Some(indicator) = document.root_mut().find_by_id_mut(INDICATOR_ID) else {
        return;
    };
    indicator.children = vec![
        Node::Element(
            Element::new("span")
                .with_class(ICON_CLASS)
                .with_text(lang.icon()),
        ),
        Node::Text(format!(" {}", lang.label())),
    ];
}

/// Closes an open language dropdown, if the page has one.
pub fn close_language_dropdown(document: &mut Document) {
    if let Some(dropdown) = document.root_mut().find_by_id_mut(DROPDOWN_ID) {
        dropdown.remove_class("open");
    }
}
