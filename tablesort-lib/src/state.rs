//! Per-table sort state.

use crate::direction::Direction;

/// Sort state owned by the sorter for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    /// Direction of the last click; `None` until the first one.
    pub direction: Option<Direction>,
    /// Column whose icon currently shows the direction.
    pub sorted_column: Option<usize>,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded from a previously stored direction.
    pub fn with_direction(direction: Option<Direction>) -> Self {
        Self {
            direction,
            sorted_column: None,
        }
    }

    /// Flip to the direction the next click produces and return it.
    pub fn advance(&mut self) -> Direction {
        let direction = Direction::next(self.direction);
        self.direction = Some(direction);
        direction
    }
}
