use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::{Cursor, Style};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Tag used for text nodes.
pub const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    /// True when `id` came from markup or the builder rather than the generator.
    /// Only explicit ids are written back out as an `id` attribute.
    pub explicit_id: bool,

    pub tag: String,

    // Content
    pub content: Content,

    // Markup
    /// Attributes other than `id`, `class` and `style`, in source order.
    pub attributes: Vec<(String, String)>,
    pub classes: Vec<String>,
    pub style: Style,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            explicit_id: false,
            tag: "div".to_string(),
            content: Content::None,
            attributes: Vec::new(),
            classes: Vec::new(),
            style: Style::default(),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: TEXT_TAG.to_string(),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn table() -> Self {
        Self::new("table")
    }

    pub fn thead() -> Self {
        Self::new("thead")
    }

    pub fn tbody() -> Self {
        Self::new("tbody")
    }

    pub fn tr() -> Self {
        Self::new("tr")
    }

    /// Header cell holding `label` as a text child.
    pub fn th(label: impl Into<String>) -> Self {
        Self::new("th").child(Self::text(label))
    }

    /// Data cell holding `value` as a text child.
    pub fn td(value: impl Into<String>) -> Self {
        Self::new("td").child(Self::text(value))
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self.explicit_id = true;
        self
    }

    // Markup
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn cursor(mut self, cursor: Cursor) -> Self {
        self.style.set("cursor", cursor.as_css());
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self.push_child(child);
        }
        self
    }

    /// Append a child. Inline text content is promoted to a text child first
    /// so it keeps its place ahead of the new child.
    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            Content::Text(text) => {
                let text = Element::text(std::mem::take(text));
                self.content = Content::Children(vec![text, child]);
            }
        }
    }

    /// Replace all content with a single text value.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.is_text() {
            self.content = Content::Text(text.into());
        } else {
            self.content = Content::Children(vec![Element::text(text)]);
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    match &element.content {
        Content::None => {}
        Content::Text(text) => out.push_str(text),
        Content::Children(children) => {
            for child in children {
                collect_text(child, out);
            }
        }
    }
}
