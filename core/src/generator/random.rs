use alloc::vec;
use alloc::vec::Vec;
use core::iter;

use super::*;

/// Generation strategy that can optionally try to make the starting cell zero or at least safe, but other than that is
/// purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: CellIndex,
    start_cell: StartCell,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start: 0,
            start_cell: StartCell::Random,
        }
    }

    /// Protects `start` according to `start_cell`.
    pub fn with_start(self, start: CellIndex, start_cell: StartCell) -> Self {
        Self {
            start,
            start_cell,
            ..self
        }
    }

    fn protected_cells(&self, config: GameConfig) -> Result<Vec<CellIndex>> {
        use StartCell::*;

        if matches!(self.start_cell, Random) {
            return Ok(Vec::new());
        }

        let total_cells = usize::from(config.total_cells());
        if self.start >= total_cells {
            return Err(GameError::IndexOutOfRange);
        }

        let mines = usize::from(config.mines);
        let zero_area: Vec<_> = iter::once(self.start)
            .chain(config.neighbor_indices(self.start))
            .collect();

        let actual_start_cell = match self.start_cell {
            // a validated config always leaves one safe cell
            Random => Random,
            SimpleSafe => SimpleSafe,
            AlwaysZero if mines + zero_area.len() > total_cells => {
                log::warn!("Cannot make start cell zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        };

        Ok(match actual_start_cell {
            Random => Vec::new(),
            SimpleSafe => vec![self.start],
            AlwaysZero => zero_area,
        })
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::rngs::SmallRng;
        use rand::seq::index;
        use rand::{Rng, SeedableRng};

        config.validate()?;

        let total_cells = usize::from(config.total_cells());
        let mines = usize::from(config.mines);

        let mut excluded = vec![false; total_cells];
        let protected = self.protected_cells(config)?;
        for &index in &protected {
            excluded[index] = true;
        }
        let free_cells = total_cells - protected.len();

        let mut mask = vec![false; total_cells];
        let mut rng = SmallRng::seed_from_u64(self.seed);

        if mines * 2 <= free_cells {
            // sparse boards: retry on collisions, expected O(mines)
            let mut mines_placed = 0;
            while mines_placed < mines {
                let index = rng.random_range(0..total_cells);
                if mask[index] || excluded[index] {
                    continue;
                }
                mask[index] = true;
                mines_placed += 1;
            }
        } else {
            // dense boards: rejection would degrade, sample distinct free cells instead
            let candidates: Vec<CellIndex> =
                (0..total_cells).filter(|&cell| !excluded[cell]).collect();
            for pick in index::sample(&mut rng, candidates.len(), mines) {
                mask[candidates[pick]] = true;
            }
        }

        let shape = (usize::from(config.height), usize::from(config.width));
        let mine_mask =
            Array2::from_shape_vec(shape, mask).map_err(|_| GameError::InvalidDimension)?;
        let layout = MineLayout::from_mine_mask(mine_mask)?;

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Generated {}x{} minefield with {} mines, seed {}",
            config.width,
            config.height,
            layout.mine_count(),
            self.seed
        );

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine_indices(layout: &MineLayout) -> Vec<CellIndex> {
        let config = layout.config();
        (0..usize::from(config.total_cells()))
            .filter(|&index| layout.contains_mine(index_to_coords(index, config.width)))
            .collect()
    }

    #[test]
    fn places_exact_mine_count_for_all_presets() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let config = difficulty.config().unwrap();
            for seed in 0..16 {
                let layout = RandomMinefieldGenerator::new(seed).generate(config).unwrap();
                assert_eq!(layout.mine_count(), config.mines);
                assert_eq!(mine_indices(&layout).len(), usize::from(config.mines));
            }
        }
    }

    #[test]
    fn dense_board_uses_every_cell_but_one() {
        let config = GameConfig::new(5, 4, 19).unwrap();
        let layout = RandomMinefieldGenerator::new(7).generate(config).unwrap();

        assert_eq!(layout.mine_count(), 19);
        assert_eq!(layout.safe_cell_count(), 1);
    }

    #[test]
    fn zero_mines_is_a_valid_board() {
        let config = GameConfig::new(8, 8, 0).unwrap();
        let layout = RandomMinefieldGenerator::new(1).generate(config).unwrap();
        assert!(mine_indices(&layout).is_empty());
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = Difficulty::Hard.config().unwrap();
        let a = RandomMinefieldGenerator::new(42).generate(config).unwrap();
        let b = RandomMinefieldGenerator::new(42).generate(config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::new_unchecked(2, 2, 4);
        assert_eq!(
            RandomMinefieldGenerator::new(0).generate(config),
            Err(GameError::InvalidMineCount)
        );
    }

    #[test]
    fn simple_safe_start_never_has_mine() {
        let config = GameConfig::new(3, 3, 8).unwrap();
        for seed in 0..32 {
            let layout = RandomMinefieldGenerator::new(seed)
                .with_start(4, StartCell::SimpleSafe)
                .generate(config)
                .unwrap();
            assert!(!layout.contains_mine((1, 1)));
            assert_eq!(layout.mine_count(), 8);
        }
    }

    #[test]
    fn always_zero_start_clears_neighbors() {
        let config = Difficulty::Easy.config().unwrap();
        for seed in 0..32 {
            let layout = RandomMinefieldGenerator::new(seed)
                .with_start(0, StartCell::AlwaysZero)
                .generate(config)
                .unwrap();
            assert!(!layout.contains_mine((0, 0)));
            assert_eq!(layout.adjacent_mine_count((0, 0)), 0);
        }
    }

    #[test]
    fn always_zero_falls_back_when_too_dense() {
        // 3x3 with 8 mines cannot keep the whole block clear
        let config = GameConfig::new(3, 3, 8).unwrap();
        let layout = RandomMinefieldGenerator::new(3)
            .with_start(4, StartCell::AlwaysZero)
            .generate(config)
            .unwrap();
        assert!(!layout.contains_mine((1, 1)));
        assert_eq!(layout.adjacent_mine_count((1, 1)), 8);
    }

    #[test]
    fn protected_start_must_be_on_the_board() {
        let config = GameConfig::new(2, 2, 1).unwrap();
        let result = RandomMinefieldGenerator::new(0)
            .with_start(4, StartCell::SimpleSafe)
            .generate(config);
        assert_eq!(result, Err(GameError::IndexOutOfRange));
    }
}
