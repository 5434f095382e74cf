//! Owned document tree with query and mutation helpers.

use std::collections::HashSet;
use std::fmt;

use crate::element::{find_element, find_element_mut, generate_id, Content, Element};
use crate::event::{Event, EventResult, Listener};
use crate::hit::hit_path;

/// Errors from structural mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// No element with this id exists in the document.
    NotFound(String),
    /// The move would insert an element into its own subtree.
    Hierarchy { parent: String, child: String },
    /// The root element cannot be detached.
    DetachRoot,
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::NotFound(id) => write!(f, "element '{id}' not found"),
            DomError::Hierarchy { parent, child } => {
                write!(f, "cannot move '{child}' into its own descendant '{parent}'")
            }
            DomError::DetachRoot => write!(f, "cannot detach the root element"),
        }
    }
}

impl std::error::Error for DomError {}

/// An element tree in which every element id is unique.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Take ownership of a tree. The first element carrying a given explicit
    /// id keeps it; later duplicates get a generated id and keep the
    /// original as their `id` attribute, so they still render unchanged.
    pub fn new(mut root: Element) -> Self {
        let mut explicit = HashSet::new();
        collect_explicit_ids(&root, &mut explicit);
        let mut claimed = HashSet::new();
        assign_unique_ids(&mut root, &explicit, &mut claimed);
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    /// Ids of every descendant of `scope` (excluding `scope`) with the given
    /// tag, in document order.
    pub fn query_all(&self, scope: &str, tag: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(scope) = self.find(scope) {
            collect_descendants(scope, &mut out, &|el| el.tag == tag);
        }
        out
    }

    /// First descendant of `scope` with the given tag.
    pub fn query_first(&self, scope: &str, tag: &str) -> Option<String> {
        let scope = self.find(scope)?;
        first_descendant(scope, &|el| el.tag == tag).map(|el| el.id.clone())
    }

    /// First descendant of `scope` carrying the given class.
    pub fn query_class(&self, scope: &str, class: &str) -> Option<String> {
        let scope = self.find(scope)?;
        first_descendant(scope, &|el| el.has_class(class)).map(|el| el.id.clone())
    }

    pub fn text_content(&self, id: &str) -> Option<String> {
        self.find(id).map(Element::text_content)
    }

    /// Ids from the root down to `id`, inclusive.
    pub fn path_to(&self, id: &str) -> Option<Vec<String>> {
        let mut path = hit_path(&self.root, id)?;
        path.reverse();
        Some(path)
    }

    /// Remove an element from its parent and return it.
    pub fn detach(&mut self, id: &str) -> Result<Element, DomError> {
        if self.root.id == id {
            return Err(DomError::DetachRoot);
        }
        detach_from(&mut self.root, id).ok_or_else(|| DomError::NotFound(id.to_string()))
    }

    /// Append a new element as the last child of `parent`.
    pub fn append_child(&mut self, parent: &str, child: Element) -> Result<(), DomError> {
        let parent = self
            .find_mut(parent)
            .ok_or_else(|| DomError::NotFound(parent.to_string()))?;
        parent.push_child(child);
        Ok(())
    }

    /// Move an element already in the tree to the end of `parent`'s children.
    pub fn move_to_end(&mut self, parent: &str, child: &str) -> Result<(), DomError> {
        let in_subtree = self
            .find(child)
            .ok_or_else(|| DomError::NotFound(child.to_string()))?;
        if find_element(in_subtree, parent).is_some() {
            return Err(DomError::Hierarchy {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        if self.find(parent).is_none() {
            return Err(DomError::NotFound(parent.to_string()));
        }
        let element = self.detach(child)?;
        self.append_child(parent, element)
    }

    /// Deliver an event. Clicks bubble from the target up to the root and the
    /// listener sees every element on that path. A failure at one element
    /// does not stop the rest; the first error is returned once bubbling
    /// finishes.
    pub fn dispatch<L: Listener>(
        &mut self,
        event: &Event,
        listener: &mut L,
    ) -> Result<EventResult, L::Error> {
        match event {
            Event::Click { target } => {
                let Some(path) = hit_path(&self.root, target) else {
                    log::debug!("[dispatch] click target {target} not in document");
                    return Ok(EventResult::Ignored);
                };
                let mut result = EventResult::Ignored;
                let mut first_error = None;
                for current in &path {
                    log::trace!("[dispatch] click at {current} (target {target})");
                    match listener.on_click(self, current) {
                        Ok(EventResult::Consumed) => result = EventResult::Consumed,
                        Ok(EventResult::Ignored) => {}
                        Err(e) => {
                            log::debug!("[dispatch] listener failed at {current}");
                            if first_error.is_none() {
                                first_error = Some(e);
                            }
                        }
                    }
                }
                match first_error {
                    Some(e) => Err(e),
                    None => Ok(result),
                }
            }
        }
    }
}

fn collect_explicit_ids(element: &Element, out: &mut HashSet<String>) {
    if element.explicit_id {
        out.insert(element.id.clone());
    }
    for child in element.child_elements() {
        collect_explicit_ids(child, out);
    }
}

fn assign_unique_ids(
    element: &mut Element,
    explicit: &HashSet<String>,
    claimed: &mut HashSet<String>,
) {
    let owns_id = element.explicit_id && claimed.insert(element.id.clone());
    if !owns_id && (element.explicit_id || explicit.contains(&element.id)) {
        if element.explicit_id {
            log::debug!("[document] duplicate id '{}'", element.id);
            let markup_id = std::mem::take(&mut element.id);
            element.set_attribute("id", markup_id);
            element.explicit_id = false;
        }
        element.id = loop {
            let id = generate_id(&element.tag);
            if !explicit.contains(&id) {
                break id;
            }
        };
    }
    if let Content::Children(children) = &mut element.content {
        for child in children {
            assign_unique_ids(child, explicit, claimed);
        }
    }
}

fn collect_descendants(element: &Element, out: &mut Vec<String>, pred: &dyn Fn(&Element) -> bool) {
    if let Content::Children(children) = &element.content {
        for child in children {
            if pred(child) {
                out.push(child.id.clone());
            }
            collect_descendants(child, out, pred);
        }
    }
}

fn first_descendant<'a>(
    element: &'a Element,
    pred: &dyn Fn(&Element) -> bool,
) -> Option<&'a Element> {
    if let Content::Children(children) = &element.content {
        for child in children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = first_descendant(child, pred) {
                return Some(found);
            }
        }
    }
    None
}

fn detach_from(element: &mut Element, id: &str) -> Option<Element> {
    let Content::Children(children) = &mut element.content else {
        return None;
    };
    if let Some(idx) = children.iter().position(|c| c.id == id) {
        return Some(children.remove(idx));
    }
    children.iter_mut().find_map(|child| detach_from(child, id))
}
