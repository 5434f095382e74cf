//! Sort direction tracked once per table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort direction for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Attribute value written to the table (`"asc"` / `"desc"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    /// Parse a stored attribute value. Only the exact literals are recognized.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    /// Direction produced by a click given the stored one: `asc` flips to
    /// `desc`, anything else (including nothing stored) becomes `asc`.
    pub fn next(stored: Option<Direction>) -> Self {
        match stored {
            Some(Direction::Asc) => Direction::Desc,
            _ => Direction::Asc,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
