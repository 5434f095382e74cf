//! Header-click table sorting.
//!
//! [`TableSorter`] discovers every table in a [`Document`], wires a click
//! binding to each header cell, and on click reorders the table body by the
//! clicked column:
//!
//! - Direction is tracked once per table and alternates on every click, no
//!   matter which column was clicked. The first click sorts ascending.
//! - Cells compare numerically when both parse as numbers, otherwise as
//!   locale-style text.
//! - Only the clicked header's icon shows a direction; the rest go neutral.
//!
//! # Example
//!
//! ```
//! use tabledom::{Document, Element, Event};
//! use tablesort_lib::TableSorter;
//!
//! let mut doc = Document::new(
//!     Element::table().id("parts")
//!         .child(Element::thead().child(Element::tr().child(Element::th("Qty").id("qty"))))
//!         .child(Element::tbody()
//!             .child(Element::tr().child(Element::td("10")))
//!             .child(Element::tr().child(Element::td("2")))),
//! );
//!
//! let mut sorter = TableSorter::init(&mut doc);
//! doc.dispatch(&Event::click("qty"), &mut sorter).unwrap();
//!
//! let body = doc.query_first("parts", "tbody").unwrap();
//! let cells: Vec<String> = doc
//!     .query_all(&body, "td")
//!     .iter()
//!     .filter_map(|id| doc.text_content(id))
//!     .collect();
//! assert_eq!(cells, vec!["2", "10"]);
//! ```

use std::collections::HashMap;

use tabledom::{Cursor, Document, Element, EventResult, Listener};

use crate::compare::{SortKey, compare_keys, stable_order};
use crate::config::SorterConfig;
use crate::direction::Direction;
use crate::error::SortError;
use crate::state::TableState;

/// A `(table, column)` pair registered on a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    table: usize,
    column: usize,
}

/// A table discovered at initialization.
#[derive(Debug, Clone)]
pub struct SortableTable {
    /// Element id of the `<table>`.
    pub id: String,
    /// Header cell ids in column order, as discovered.
    pub headers: Vec<String>,
    pub state: TableState,
}

#[derive(Debug, Clone, Default)]
pub struct TableSorter {
    config: SorterConfig,
    tables: Vec<SortableTable>,
    bindings: HashMap<String, Vec<Binding>>,
}

impl TableSorter {
    pub fn new(config: SorterConfig) -> Self {
        Self {
            config,
            tables: Vec::new(),
            bindings: HashMap::new(),
        }
    }

    /// Create a sorter with the default configuration and attach it to `doc`.
    pub fn init(doc: &mut Document) -> Self {
        let mut sorter = Self::new(SorterConfig::default());
        sorter.attach(doc);
        sorter
    }

    pub fn config(&self) -> &SorterConfig {
        &self.config
    }

    /// Discover every table currently in `doc` and wire its headers.
    ///
    /// Each header gets a pointer cursor and tooltip, and has `" "` plus a
    /// neutral icon span appended. Tables added to the document afterwards
    /// are not seen. Attaching twice decorates twice and
    /// registers a second binding per header.
    pub fn attach(&mut self, doc: &mut Document) {
        let root = doc.root();
        let mut table_ids = Vec::new();
        if root.tag == "table" {
            table_ids.push(root.id.clone());
        }
        let root_id = root.id.clone();
        table_ids.extend(doc.query_all(&root_id, "table"));

        for table_id in table_ids {
            let headers = doc.query_all(&table_id, "th");
            let table = self.register_table(doc, &table_id, &headers);

            for (column, header_id) in headers.iter().enumerate() {
                self.bindings
                    .entry(header_id.clone())
                    .or_default()
                    .push(Binding { table, column });
                if let Some(header) = doc.find_mut(header_id) {
                    self.decorate_header(header);
                }
            }

            log::debug!(
                "[tablesort] attached table {} with {} headers",
                table_id,
                headers.len()
            );
        }
    }

    fn register_table(&mut self, doc: &Document, table_id: &str, headers: &[String]) -> usize {
        if let Some(idx) = self.table_index(table_id) {
            self.tables[idx].headers = headers.to_vec();
            return idx;
        }

        let stored = doc
            .find(table_id)
            .and_then(|t| t.get_attribute(&self.config.direction_attribute))
            .and_then(Direction::from_attr);
        self.tables.push(SortableTable {
            id: table_id.to_string(),
            headers: headers.to_vec(),
            state: TableState::with_direction(stored),
        });
        self.tables.len() - 1
    }

    fn decorate_header(&self, header: &mut Element) {
        header.style.set("cursor", Cursor::Pointer.as_css());
        if let Some(title) = &self.config.header_title {
            header.set_attribute("title", title.clone());
        }
        header.push_child(Element::text(" "));
        header.push_child(
            Element::span()
                .class(self.config.icon_class.clone())
                .child(Element::text(self.config.glyphs.neutral.clone())),
        );
    }

    /// Tables in discovery order.
    pub fn tables(&self) -> &[SortableTable] {
        &self.tables
    }

    pub fn table_index(&self, table_id: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.id == table_id)
    }

    pub fn state(&self, table_id: &str) -> Option<&TableState> {
        self.table_index(table_id).map(|idx| &self.tables[idx].state)
    }

    /// Id of the header at `column` of `table_id`.
    pub fn header_id(&self, table_id: &str, column: usize) -> Option<&str> {
        let idx = self.table_index(table_id)?;
        self.tables[idx].headers.get(column).map(String::as_str)
    }

    pub fn column_count(&self, table_id: &str) -> Option<usize> {
        self.table_index(table_id).map(|idx| self.tables[idx].headers.len())
    }

    /// Sort `table_id` by `column`, as a click on that header would.
    /// Returns the direction applied.
    pub fn sort(
        &mut self,
        doc: &mut Document,
        table_id: &str,
        column: usize,
    ) -> Result<Direction, SortError> {
        let idx = self
            .table_index(table_id)
            .ok_or_else(|| SortError::UnknownTable(table_id.to_string()))?;
        self.sort_at(doc, idx, column)
    }

    /// Click the header at `column` of `table_id`, bubbling like a real click.
    pub fn click(
        &mut self,
        doc: &mut Document,
        table_id: &str,
        column: usize,
    ) -> Result<EventResult, SortError> {
        let header = self
            .header_id(table_id, column)
            .ok_or_else(|| SortError::UnknownColumn {
                table: table_id.to_string(),
                column,
            })?
            .to_string();
        doc.dispatch(&tabledom::Event::click(header), self)
    }

    fn sort_at(
        &mut self,
        doc: &mut Document,
        idx: usize,
        column: usize,
    ) -> Result<Direction, SortError> {
        let table_id = self.tables[idx].id.clone();
        let body = doc
            .query_first(&table_id, "tbody")
            .ok_or_else(|| SortError::MissingBody(table_id.clone()))?;

        let direction = self.tables[idx].state.advance();
        if let Some(table) = doc.find_mut(&table_id) {
            table.set_attribute(self.config.direction_attribute.clone(), direction.as_str());
        }

        let rows = doc.query_all(&body, "tr");
        let working = if rows.len() < 2 {
            // Nothing to compare, so no cell is read
            rows
        } else {
            let mut keys = Vec::with_capacity(rows.len());
            for (row_idx, row) in rows.iter().enumerate() {
                let cell = doc
                    .query_all(row, "td")
                    .into_iter()
                    .nth(column)
                    .ok_or_else(|| SortError::MissingCell {
                        table: table_id.clone(),
                        row: row_idx,
                        column,
                    })?;
                let text = doc.text_content(&cell).unwrap_or_default();
                keys.push(SortKey::new(&text));
            }
            stable_order(keys.len(), |a, b| compare_keys(&keys[a], &keys[b], direction))
                .into_iter()
                .map(|i| rows[i].clone())
                .collect()
        };

        for row in &working {
            doc.move_to_end(&body, row)?;
        }

        self.update_icons(doc, &table_id, column, direction)?;
        self.tables[idx].state.sorted_column = Some(column);

        log::debug!(
            "[tablesort] sorted table {} by column {} {} ({} rows)",
            table_id,
            column,
            direction,
            working.len()
        );
        Ok(direction)
    }

    fn update_icons(
        &self,
        doc: &mut Document,
        table_id: &str,
        column: usize,
        direction: Direction,
    ) -> Result<(), SortError> {
        let glyphs = &self.config.glyphs;
        for (idx, header) in doc.query_all(table_id, "th").into_iter().enumerate() {
            let icon = doc
                .query_class(&header, &self.config.icon_class)
                .ok_or_else(|| SortError::MissingIcon(header.clone()))?;
            let glyph = if idx == column {
                glyphs.for_direction(direction)
            } else {
                glyphs.neutral.as_str()
            };
            if let Some(icon) = doc.find_mut(&icon) {
                icon.set_text(glyph);
            }
        }
        Ok(())
    }
}

impl Listener for TableSorter {
    type Error = SortError;

    /// Runs every binding on `current`, each as its own listener: a failing
    /// binding is logged and the rest still run. Returns the first failure.
    fn on_click(&mut self, doc: &mut Document, current: &str) -> Result<EventResult, SortError> {
        let Some(bindings) = self.bindings.get(current).cloned() else {
            return Ok(EventResult::Ignored);
        };
        let mut first_error = None;
        for binding in bindings {
            log::trace!(
                "[tablesort] header {} -> table {} column {}",
                current,
                binding.table,
                binding.column
            );
            if let Err(e) = self.sort_at(doc, binding.table, binding.column) {
                log::warn!(
                    "[tablesort] sort of table {} by column {} failed: {}",
                    self.tables[binding.table].id,
                    binding.column,
                    e
                );
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(EventResult::Consumed),
        }
    }
}
