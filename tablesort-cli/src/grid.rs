//! Plain-text layout of a table for terminal display.

use tabledom::Document;
use tabledom::text::{collapse_whitespace, display_width, pad_to_width};

/// Widest a column may grow before cells are truncated.
const MAX_COLUMN_WIDTH: usize = 40;

const SEPARATOR: &str = " │ ";

/// A snapshot of one table's header and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl Grid {
    /// Read header and body text for `table_id` from the document.
    pub fn from_table(doc: &Document, table_id: &str) -> Self {
        let text = |id: &String| collapse_whitespace(&doc.text_content(id).unwrap_or_default());

        let headers: Vec<String> = doc.query_all(table_id, "th").iter().map(text).collect();
        let rows: Vec<Vec<String>> = match doc.query_first(table_id, "tbody") {
            Some(body) => doc
                .query_all(&body, "tr")
                .iter()
                .map(|row| {
                    doc.query_all(row, "td")
                        .iter()
                        .map(text)
                        .collect::<Vec<String>>()
                })
                .filter(|cells| !cells.is_empty())
                .collect(),
            None => Vec::new(),
        };

        let columns = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);
        let widths = (0..columns)
            .map(|col| {
                let header = headers.get(col).map_or(0, |h| display_width(h));
                let cells = rows
                    .iter()
                    .filter_map(|r| r.get(col))
                    .map(|c| display_width(c))
                    .max()
                    .unwrap_or(0);
                header.max(cells).clamp(1, MAX_COLUMN_WIDTH)
            })
            .collect();

        Self {
            headers,
            rows,
            widths,
        }
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn header_line(&self) -> String {
        self.line(&self.headers)
    }

    pub fn rule_line(&self) -> String {
        self.widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─")
    }

    pub fn row_lines(&self) -> Vec<String> {
        self.rows.iter().map(|r| self.line(r)).collect()
    }

    fn line(&self, cells: &[String]) -> String {
        self.widths
            .iter()
            .enumerate()
            .map(|(i, w)| pad_to_width(cells.get(i).map_or("", String::as_str), *w))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
            .trim_end()
            .to_string()
    }

    /// Which column a terminal x position on the header line falls into.
    /// Separators belong to the column on their left.
    pub fn column_from_x(&self, x: u16) -> Option<usize> {
        let x = x as usize;
        let sep = display_width(SEPARATOR);
        let mut col_x = 0;
        for (i, width) in self.widths.iter().enumerate() {
            if x < col_x + width + sep {
                return Some(i);
            }
            col_x += width + sep;
        }
        None
    }
}
