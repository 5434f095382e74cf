use crate::document::Document;

/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse click on an element
    Click { target: String },
}

impl Event {
    pub fn click(target: impl Into<String>) -> Self {
        Event::Click {
            target: target.into(),
        }
    }
}

/// Outcome of handling an event at one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Nothing registered here.
    Ignored,
    Consumed,
}

/// Receives events while they bubble through a [`Document`].
pub trait Listener {
    type Error;

    /// Called once per element on the path from the click target to the root,
    /// deepest first. `current` is the element the event is passing through.
    fn on_click(&mut self, doc: &mut Document, current: &str) -> Result<EventResult, Self::Error>;
}
