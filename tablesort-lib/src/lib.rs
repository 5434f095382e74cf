//! Click-to-sort for tables in a [`tabledom::Document`].

pub mod collate;
pub mod compare;
pub mod config;
pub mod direction;
pub mod error;
pub mod sorter;
pub mod state;

pub use collate::locale_compare;
pub use compare::{SortKey, compare_keys, parse_leading_float, trim_cell};
pub use config::{Glyphs, SorterConfig};
pub use direction::Direction;
pub use error::{ConfigError, SortError};
pub use sorter::{SortableTable, TableSorter};
pub use state::TableState;
