//! HTML serialization of element trees.

use crate::document::Document;
use crate::element::{Content, Element};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Escapes text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes a double-quoted attribute value.
pub fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a whole document, including the doctype.
pub fn render_document(doc: &Document) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    render_into(doc.root(), false, &mut out);
    out.push('\n');
    out
}

/// Render a single element and its subtree.
pub fn render_element(element: &Element) -> String {
    let mut out = String::new();
    render_into(element, false, &mut out);
    out
}

fn render_into(element: &Element, raw_text: bool, out: &mut String) {
    if element.is_text() {
        if let Content::Text(text) = &element.content {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        return;
    }

    out.push('<');
    out.push_str(&element.tag);
    render_attributes(element, out);
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }

    let raw_text = RAW_TEXT_ELEMENTS.contains(&element.tag.as_str());
    match &element.content {
        Content::None => {}
        Content::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        Content::Children(children) => {
            for child in children {
                render_into(child, raw_text, out);
            }
        }
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn render_attributes(element: &Element, out: &mut String) {
    // A duplicate markup id lives in the attribute list
    let id = if element.explicit_id {
        Some(element.id.as_str())
    } else {
        element.get_attribute("id")
    };
    if let Some(id) = id {
        push_attribute(out, "id", id);
    }
    if !element.classes.is_empty() {
        push_attribute(out, "class", &element.classes.join(" "));
    }
    if !element.style.is_empty() {
        push_attribute(out, "style", &element.style.to_css());
    }
    for (name, value) in element.attributes.iter().filter(|(name, _)| name != "id") {
        push_attribute(out, name, value);
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value));
    out.push('"');
}
