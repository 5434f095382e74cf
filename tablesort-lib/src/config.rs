//! Sorter configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::ConfigError;

/// Glyph text shown in each header's icon span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    /// Shown on every header that is not the current sort column.
    pub neutral: String,
    pub ascending: String,
    pub descending: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            neutral: "↕️".to_string(),
            ascending: "↑".to_string(),
            descending: "↓".to_string(),
        }
    }
}

impl Glyphs {
    pub fn for_direction(&self, direction: Direction) -> &str {
        match direction {
            Direction::Asc => &self.ascending,
            Direction::Desc => &self.descending,
        }
    }
}

/// Configuration for [`TableSorter`](crate::TableSorter).
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```
/// use tablesort_lib::SorterConfig;
///
/// let config = SorterConfig::from_json(r#"{ "glyphs": { "neutral": "-" } }"#).unwrap();
/// assert_eq!(config.glyphs.neutral, "-");
/// assert_eq!(config.glyphs.ascending, "↑");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SorterConfig {
    pub glyphs: Glyphs,
    /// Class of the span appended to each header.
    pub icon_class: String,
    /// Table attribute mirroring the current direction.
    pub direction_attribute: String,
    /// Tooltip set on each header; `None` leaves `title` alone.
    pub header_title: Option<String>,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            glyphs: Glyphs::default(),
            icon_class: "sort-icon".to_string(),
            direction_attribute: "data-sort-dir".to_string(),
            header_title: Some("Click to sort".to_string()),
        }
    }
}

impl SorterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Set the glyphs.
    pub fn glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Set the header tooltip.
    pub fn header_title(mut self, title: Option<String>) -> Self {
        self.header_title = title;
        self
    }
}
