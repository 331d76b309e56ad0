use alloc::collections::BTreeSet;
use alloc::vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Active
/// - Ready -> Won (first reveal clears the board)
/// - Ready -> Lost (first reveal hits a mine)
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Outcome {
        match self {
            Self::Ready | Self::Active => Outcome::InProgress,
            Self::Won => Outcome::Won,
            Self::Lost => Outcome::Lost,
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Read-only summary handed to the presentation layer after each action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub total_mines: CellCount,
    /// Mines minus flag counter, negative when the player over-flags.
    pub remaining_mines: i32,
    pub width: Coord,
    pub height: Coord,
    pub is_over: bool,
    pub outcome: Outcome,
}

/// Creates a randomly mined board, without any first-click protection.
pub fn create_board(width: Coord, height: Coord, mine_count: CellCount, seed: u64) -> Result<Board> {
    let config = GameConfig::new(width, height, mine_count)?;
    Board::new(config, RandomMinefieldGenerator::new(seed))
}

/// One game session: the cells, the flag counter and the game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_count: Saturating<CellCount>,
    flag_counter: Saturating<CellCount>,
    state: EngineState,
    triggered_mine: Option<CellIndex>,
}

impl Board {
    pub fn new(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let layout = generator.generate(config)?;
        Ok(Self::from_layout(layout))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let config = layout.config();
        let cells = Array2::from_shape_fn(config.shape().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::new(
                coords_to_index(coords, config.width),
                layout.contains_mine(coords),
            )
        });
        log::debug!(
            "New {}x{} board with {} mines",
            config.width,
            config.height,
            config.mines
        );

        Self {
            config,
            cells,
            revealed_count: Saturating(0),
            flag_counter: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    pub fn flag_counter(&self) -> CellCount {
        self.flag_counter.0
    }

    pub fn remaining_mines(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flag_counter.0)
    }

    pub fn validate_index<I: TryInto<CellIndex>>(&self, index: I) -> Result<CellIndex> {
        let index = index.try_into().map_err(|_| GameError::IndexOutOfRange)?;
        if index < usize::from(self.config.total_cells()) {
            Ok(index)
        } else {
            Err(GameError::IndexOutOfRange)
        }
    }

    pub fn cell<I: TryInto<CellIndex>>(&self, index: I) -> Result<&Cell> {
        let index = self.validate_index(index)?;
        Ok(&self.cells[self.coords_of(index).to_nd_index()])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn count_adjacent_mines<I: TryInto<CellIndex>>(&self, index: I) -> Result<u8> {
        let index = self.validate_index(index)?;
        Ok(self.adjacent_mines_at(self.coords_of(index)))
    }

    /// Opens a hidden cell, cascading through zero cells.
    ///
    /// Revealed, flagged and questioned cells are left alone, as is every cell once the game is over.
    pub fn reveal<I: TryInto<CellIndex>>(&mut self, index: I) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let index = self.validate_index(index)?;
        if self.state.is_finished() {
            return Ok(NoChange);
        }

        let coords = self.coords_of(index);
        let cell = self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return Ok(NoChange);
        }

        if cell.has_mine {
            log::debug!("Mine hit at {}", index);
            self.triggered_mine = Some(index);
            self.end_game(false);
            return Ok(MineHit);
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Revealed {} cell(s) from {}", opened, index);

        if self.revealed_count.0 == self.config.safe_cells() {
            self.end_game(true);
        } else {
            self.mark_started();
        }

        Ok(Revealed(opened))
    }

    /// Moves a covered cell one step along Hidden -> Flagged -> Questioned -> Hidden.
    ///
    /// The flag counter goes up entering Flagged and down leaving Questioned. Returns the cell's
    /// visibility after the call, unchanged for revealed cells and finished games.
    pub fn cycle_flag<I: TryInto<CellIndex>>(&mut self, index: I) -> Result<Visibility> {
        use Visibility::*;

        let index = self.validate_index(index)?;
        let coords = self.coords_of(index);
        let current = self.cells[coords.to_nd_index()].visibility;

        if self.state.is_finished() || current == Revealed {
            return Ok(current);
        }

        let next = current.next_mark();
        match (current, next) {
            (Hidden, Flagged) => self.flag_counter += 1,
            (Questioned, Hidden) => self.flag_counter -= 1,
            _ => {}
        }
        self.cells[coords.to_nd_index()].visibility = next;
        self.mark_started();

        Ok(next)
    }

    /// Derives the outcome from cell contents alone.
    pub fn check_outcome(&self) -> Outcome {
        if self.triggered_mine.is_some() {
            return Outcome::Lost;
        }

        let revealed_safe = self
            .cells
            .iter()
            .filter(|cell| !cell.has_mine && cell.is_revealed())
            .count();

        if revealed_safe == usize::from(self.config.safe_cells()) {
            Outcome::Won
        } else {
            Outcome::InProgress
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let outcome = self.state.outcome();
        Snapshot {
            total_mines: self.config.mines,
            remaining_mines: self.remaining_mines(),
            width: self.config.width,
            height: self.config.height,
            is_over: outcome.is_over(),
            outcome,
        }
    }

    /// Every mined index, for showing the minefield once the game is lost.
    pub fn mine_cells(&self) -> BTreeSet<CellIndex> {
        self.cells
            .iter()
            .filter(|cell| cell.has_mine)
            .map(|cell| cell.index)
            .collect()
    }

    fn coords_of(&self, index: CellIndex) -> Coord2 {
        index_to_coords(index, self.config.width)
    }

    fn adjacent_mines_at(&self, coords: Coord2) -> u8 {
        if let Some(count) = self.cells[coords.to_nd_index()].adjacent_mines {
            return count;
        }
        // at most 8 neighbors, always fits
        neighbors(coords, self.config.shape())
            .filter(|&pos| self.cells[pos.to_nd_index()].has_mine)
            .count() as u8
    }

    /// Reveals `start` and every zero-connected hidden cell, returning how many were opened.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened = Saturating(0);
        let mut to_visit = vec![start];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = self.cells[visit_coords.to_nd_index()];
            // already opened through another path, marked, or a mine
            if !cell.is_hidden() || cell.has_mine {
                continue;
            }

            let adjacent_mines = self.adjacent_mines_at(visit_coords);
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            cell.visibility = Visibility::Revealed;
            cell.adjacent_mines = Some(adjacent_mines);
            opened += 1;
            log::trace!(
                "Opened cell at {:?}, adjacent mines: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                to_visit.extend(
                    neighbors(visit_coords, self.config.shape())
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        self.revealed_count += opened.0;
        opened.0
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        log::debug!("Game over: {:?}", self.state);
    }
}
