//! Interactive terminal view of a page's tables.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Result, bail};
use crossterm::{
    cursor,
    event::{
        self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};
use tabledom::Document;
use tabledom::text::truncate_to_width;
use tablesort_lib::TableSorter;

use crate::grid::Grid;

/// Screen row of the header line. Clicks here sort.
const HEADER_ROW: u16 = 1;
/// Rows above the table body: title, header and rule.
const BODY_TOP: usize = 3;

/// Owns the terminal while the view is open and restores it on drop.
struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self { stdout })
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Block until at least one event arrives, then drain the rest.
    fn poll(&self) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = vec![event::read()?];
        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }
        Ok(events)
    }

    /// Draw `lines` from the top. The first line is bold; the last line is
    /// pinned to the bottom row.
    fn draw(&mut self, lines: &[String], width: u16, height: u16) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        let Some((status, body)) = lines.split_last() else {
            return self.stdout.flush();
        };

        for (y, line) in body.iter().enumerate().take(height.saturating_sub(1) as usize) {
            queue!(self.stdout, cursor::MoveTo(0, y as u16))?;
            if y == 0 {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            queue!(self.stdout, Print(truncate_to_width(line, width as usize)))?;
            if y == 0 {
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
            }
        }

        queue!(
            self.stdout,
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetAttribute(Attribute::Reverse),
            Print(truncate_to_width(status, width as usize)),
            SetAttribute(Attribute::Reset)
        )?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
}

/// What the view shows: which table, how far it is scrolled, and the last
/// status message.
struct View {
    doc: Document,
    sorter: TableSorter,
    current: usize,
    scroll: usize,
    status: String,
}

impl View {
    fn new(doc: Document, sorter: TableSorter) -> Self {
        Self {
            doc,
            sorter,
            current: 0,
            scroll: 0,
            status: "1-9 or click a header to sort, Tab switches table, q quits".to_string(),
        }
    }

    fn table_id(&self) -> Option<&str> {
        self.sorter.tables().get(self.current).map(|t| t.id.as_str())
    }

    fn grid(&self) -> Option<Grid> {
        self.table_id().map(|id| Grid::from_table(&self.doc, id))
    }

    fn switch_table(&mut self, forward: bool) {
        let count = self.sorter.tables().len();
        if count == 0 {
            return;
        }
        self.current = if forward {
            (self.current + 1) % count
        } else {
            (self.current + count - 1) % count
        };
        self.scroll = 0;
    }

    fn sort(&mut self, column: usize) {
        let Some(table_id) = self.table_id().map(str::to_string) else {
            return;
        };
        match self.sorter.click(&mut self.doc, &table_id, column) {
            Ok(_) => {
                let direction = self
                    .sorter
                    .state(&table_id)
                    .and_then(|s| s.direction)
                    .map_or("unsorted", |d| d.as_str());
                self.status = format!("sorted by column {} ({})", column + 1, direction);
            }
            Err(e) => {
                log::warn!("sort of {} by column {} failed: {}", table_id, column, e);
                self.status = format!("error: {}", e);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::Continue;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Quit;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                self.sort(column);
            }
            KeyCode::Tab => self.switch_table(true),
            KeyCode::BackTab => self.switch_table(false),
            KeyCode::Down => self.scroll += 1,
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
        Action::Continue
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if mouse.row == HEADER_ROW => {
                if let Some(column) = self.grid().and_then(|g| g.column_from_x(mouse.column)) {
                    self.sort(column);
                }
            }
            MouseEventKind::ScrollDown => self.scroll += 1,
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
    }

    /// Screen lines for a terminal `height` rows tall. The last line is the
    /// status bar.
    fn lines(&mut self, height: u16) -> Vec<String> {
        let Some(grid) = self.grid() else {
            return vec![String::new(), self.status.clone()];
        };
        let table_id = self.table_id().unwrap_or_default().to_string();

        let visible = (height as usize).saturating_sub(BODY_TOP + 1);
        let max_scroll = grid.rows.len().saturating_sub(visible);
        self.scroll = self.scroll.min(max_scroll);

        let mut lines = Vec::with_capacity(height as usize);
        lines.push(format!(
            "table {}/{}: {} ({} rows)",
            self.current + 1,
            self.sorter.tables().len(),
            table_id,
            grid.rows.len()
        ));
        lines.push(grid.header_line());
        lines.push(grid.rule_line());
        lines.extend(grid.row_lines().into_iter().skip(self.scroll).take(visible));
        lines.push(self.status.clone());
        lines
    }
}

/// Run the view until the user quits.
pub fn run(doc: Document, sorter: TableSorter) -> Result<()> {
    if sorter.tables().is_empty() {
        bail!("the page has no tables");
    }

    let mut view = View::new(doc, sorter);
    let mut terminal = Terminal::new()?;

    loop {
        let (width, height) = terminal.size()?;
        let lines = view.lines(height);
        terminal.draw(&lines, width, height)?;

        for event in terminal.poll()? {
            match event {
                CrosstermEvent::Key(key) => {
                    if view.handle_key(key) == Action::Quit {
                        return Ok(());
                    }
                }
                CrosstermEvent::Mouse(mouse) => view.handle_mouse(mouse),
                _ => {}
            }
        }
    }
}
