//! HTML parsing into element trees.
//!
//! Parsing follows the HTML5 tree-construction rules (via `scraper`), so a
//! `<table>` written without `<tbody>` gets one inserted exactly as a browser
//! would. Comments and the doctype are dropped.

use scraper::node::Node;
use scraper::{ElementRef, Html};

use crate::document::Document;
use crate::element::Element;
use crate::types::Style;

/// Parse a complete HTML page. The root element is `<html>`.
pub fn parse_document(html: &str) -> Document {
    let parsed = Html::parse_document(html);
    let root = convert(parsed.root_element());
    log::debug!("[parse] parsed document, root <{}>", root.tag);
    Document::new(root)
}

/// Parse an HTML fragment such as a bare `<table>`. The fragment is wrapped
/// in a `<div>` root so it can be queried like a document.
pub fn parse_fragment(html: &str) -> Document {
    let parsed = Html::parse_fragment(html);
    let mut root = Element::new("div");
    for child in parsed.root_element().children() {
        if let Some(el) = ElementRef::wrap(child) {
            root.push_child(convert(el));
        } else if let Node::Text(text) = child.value() {
            root.push_child(Element::text(&**text));
        }
    }
    Document::new(root)
}

fn convert(source: ElementRef<'_>) -> Element {
    let value = source.value();
    let mut element = Element::new(value.name());

    for (name, attr) in value.attrs() {
        match name {
            "id" => element = element.id(attr),
            "class" => {
                for class in attr.split_whitespace() {
                    element.add_class(class);
                }
            }
            "style" => element.style = Style::parse(attr),
            _ => element.set_attribute(name, attr),
        }
    }

    for child in source.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            element.push_child(convert(child_el));
        } else if let Node::Text(text) = child.value() {
            element.push_child(Element::text(&**text));
        }
    }

    element
}
