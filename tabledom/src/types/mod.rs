mod style;

pub use style::{Cursor, Style};
