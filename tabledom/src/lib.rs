pub mod document;
pub mod element;
pub mod event;
pub mod hit;
pub mod parse;
pub mod render;
pub mod text;
pub mod types;

pub use document::{Document, DomError};
pub use element::{Content, Element};
pub use event::{Event, EventResult, Listener};
pub use hit::hit_path;
pub use parse::{parse_document, parse_fragment};
pub use render::{render_document, render_element};
pub use types::*;
