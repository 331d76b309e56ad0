use serde::{Deserialize, Serialize};

use crate::CellIndex;

/// What the player currently sees on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
    Questioned,
}

impl Visibility {
    /// Hidden, flagged and questioned cells all still cover their content.
    pub const fn is_covered(self) -> bool {
        !matches!(self, Self::Revealed)
    }

    /// Next state of the right-click cycle. Revealed cells do not take marks.
    pub const fn next_mark(self) -> Self {
        match self {
            Self::Hidden => Self::Flagged,
            Self::Flagged => Self::Questioned,
            Self::Questioned => Self::Hidden,
            Self::Revealed => Self::Revealed,
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub index: CellIndex,
    pub has_mine: bool,
    pub visibility: Visibility,
    /// Filled in the first time the cell is revealed.
    pub adjacent_mines: Option<u8>,
}

impl Cell {
    pub const fn new(index: CellIndex, has_mine: bool) -> Self {
        Self {
            index,
            has_mine,
            visibility: Visibility::Hidden,
            adjacent_mines: None,
        }
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }

    /// Adjacency number shown on a revealed cell, `None` while covered.
    pub const fn shown_count(&self) -> Option<u8> {
        if self.is_revealed() {
            self.adjacent_mines
        } else {
            None
        }
    }
}
