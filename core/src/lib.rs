#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    /// Checks the board invariants: non-empty grid and at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidDimension);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::InvalidMineCount);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Array shape for grids of this size, `(height, width)`.
    pub const fn shape(&self) -> Coord2 {
        (self.height, self.width)
    }

    /// Row-major indices around `index`, which the caller has already bounds-checked.
    pub fn neighbor_indices(&self, index: CellIndex) -> impl Iterator<Item = CellIndex> {
        let width = self.width;
        neighbors(index_to_coords(index, width), self.shape())
            .map(move |coords| coords_to_index(coords, width))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 8 x 8, 10 mines
    Easy,
    /// 16 x 16, 40 mines
    Normal,
    /// 30 x 16, 99 mines
    Hard,
    Custom {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
}

impl Difficulty {
    pub const EASY: GameConfig = GameConfig::new_unchecked(8, 8, 10);
    pub const NORMAL: GameConfig = GameConfig::new_unchecked(16, 16, 40);
    pub const HARD: GameConfig = GameConfig::new_unchecked(30, 16, 99);

    pub fn config(self) -> Result<GameConfig> {
        match self {
            Self::Easy => Ok(Self::EASY),
            Self::Normal => Ok(Self::NORMAL),
            Self::Hard => Ok(Self::HARD),
            Self::Custom {
                width,
                height,
                mines,
            } => GameConfig::new(width, height, mines),
        }
    }

    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom { .. })
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Normal
    }
}

/// Where the mines are. Fixed once generated, the board never moves them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout from a `(height, width)` mask.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let height = Coord::try_from(rows).map_err(|_| GameError::InvalidDimension)?;
        let width = Coord::try_from(cols).map_err(|_| GameError::InvalidDimension)?;
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let mine_count =
            CellCount::try_from(mine_count).map_err(|_| GameError::InvalidMineCount)?;

        GameConfig::new(width, height, mine_count)?;

        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_indices(width: Coord, height: Coord, mines: &[CellIndex]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimension);
        }

        let mut mine_mask: Array2<bool> = Array2::default((height, width).to_nd_index());
        let total = usize::from(mult(width, height));

        for &index in mines {
            if index >= total {
                return Err(GameError::IndexOutOfRange);
            }
            mine_mask[index_to_coords(index, width).to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.width(), self.height(), self.mine_count)
    }

    pub fn width(&self) -> Coord {
        // dimensions were checked against Coord on construction
        self.mine_mask.dim().1 as Coord
    }

    pub fn height(&self) -> Coord {
        self.mine_mask.dim().0 as Coord
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Whether the cell at `index` is mined.
    pub fn has_mine(&self, index: CellIndex) -> Result<bool> {
        let coords = self.validate_index(index)?;
        Ok(self.contains_mine(coords))
    }

    /// Mines among the neighbors of `index`.
    pub fn adjacent_mines(&self, index: CellIndex) -> Result<u8> {
        let coords = self.validate_index(index)?;
        Ok(self.adjacent_mine_count(coords))
    }

    fn validate_index(&self, index: CellIndex) -> Result<Coord2> {
        if index < usize::from(self.total_cells()) {
            Ok(index_to_coords(index, self.width()))
        } else {
            Err(GameError::IndexOutOfRange)
        }
    }

    pub(crate) fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask[coords.to_nd_index()]
    }

    pub(crate) fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors, always fits
        neighbors(coords, self.config().shape())
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Target was already revealed or marked, or the game is over.
    NoChange,
    /// Number of cells opened, the target plus any cascade.
    Revealed(CellCount),
    MineHit,
}

impl RevealOutcome {
    /// Whether the board changed, so a caller needs to redraw.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn revealed_count(self) -> CellCount {
        match self {
            Self::Revealed(count) => count,
            _ => 0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
