use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

/// A caller-owned game: the chosen difficulty and the board currently in play.
///
/// Restarting or changing difficulty replaces the board wholesale, seeding each new
/// minefield from the session's own seed stream so a run can be replayed from its first seed.
#[derive(Clone, Debug)]
pub struct Session {
    difficulty: Difficulty,
    board: Board,
    seeds: SmallRng,
    seed: u64,
    games_started: u32,
}

impl Session {
    pub fn new(difficulty: Difficulty, seed: u64) -> Result<Self> {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let board_seed = seeds.random();
        let board = Board::new(difficulty.config()?, RandomMinefieldGenerator::new(board_seed))?;

        Ok(Self {
            difficulty,
            board,
            seeds,
            seed: board_seed,
            games_started: 1,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Seed of the minefield currently in play.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    pub fn snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }

    pub fn reveal<I: TryInto<CellIndex>>(&mut self, index: I) -> Result<RevealOutcome> {
        self.board.reveal(index)
    }

    pub fn cycle_flag<I: TryInto<CellIndex>>(&mut self, index: I) -> Result<Visibility> {
        self.board.cycle_flag(index)
    }

    /// Throws the current board away and deals a new one with the same difficulty.
    pub fn restart(&mut self) -> Result<()> {
        self.start(self.difficulty)
    }

    /// Switches difficulty and deals a new board. An invalid custom size keeps the current game.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.start(difficulty)
    }

    fn start(&mut self, difficulty: Difficulty) -> Result<()> {
        let config = difficulty.config()?;
        let seed = self.seeds.random();
        self.board = Board::new(config, RandomMinefieldGenerator::new(seed))?;
        self.difficulty = difficulty;
        self.seed = seed;
        self.games_started += 1;
        log::debug!(
            "Started game {} as {:?}, seed {}",
            self.games_started,
            difficulty,
            seed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_uses_difficulty_preset() {
        let session = Session::new(Difficulty::Easy, 1).unwrap();
        let snapshot = session.snapshot();

        assert_eq!((snapshot.width, snapshot.height), (8, 8));
        assert_eq!(snapshot.total_mines, 10);
        assert_eq!(snapshot.remaining_mines, 10);
        assert!(!snapshot.is_over);
        assert_eq!(session.board().mine_cells().len(), 10);
    }

    #[test]
    fn invalid_custom_difficulty_is_rejected() {
        let custom = Difficulty::Custom {
            width: 0,
            height: 4,
            mines: 1,
        };
        assert_eq!(Session::new(custom, 0).err(), Some(GameError::InvalidDimension));
    }

    #[test]
    fn restart_deals_fresh_board() {
        let mut session = Session::new(Difficulty::Normal, 9).unwrap();
        session.cycle_flag(0).unwrap();
        let first_seed = session.seed();

        session.restart().unwrap();

        assert_ne!(session.seed(), first_seed);
        assert_eq!(session.games_started(), 2);
        assert_eq!(session.board().flag_counter(), 0);
        assert!(session.board().state().is_ready());
    }

    #[test]
    fn change_difficulty_resizes_board() {
        let mut session = Session::new(Difficulty::default(), 3).unwrap();

        session.change_difficulty(Difficulty::Hard).unwrap();

        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(session.board().config(), Difficulty::HARD);
    }

    #[test]
    fn failed_difficulty_change_keeps_current_game() {
        let mut session = Session::new(Difficulty::Easy, 3).unwrap();
        session.cycle_flag(5).unwrap();

        let result = session.change_difficulty(Difficulty::Custom {
            width: 2,
            height: 2,
            mines: 4,
        });

        assert_eq!(result, Err(GameError::InvalidMineCount));
        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert_eq!(session.board().flag_counter(), 1);
    }

    #[test]
    fn sessions_replay_from_the_same_seed() {
        let mut a = Session::new(Difficulty::Hard, 77).unwrap();
        let mut b = Session::new(Difficulty::Hard, 77).unwrap();
        assert_eq!(a.board(), b.board());

        a.restart().unwrap();
        b.restart().unwrap();
        assert_eq!(a.board().mine_cells(), b.board().mine_cells());
    }

    #[test]
    fn loss_then_restart_plays_on() {
        let mut session = Session::new(Difficulty::Easy, 5).unwrap();
        let mine = *session.board().mine_cells().iter().next().unwrap();

        assert_eq!(session.reveal(mine), Ok(RevealOutcome::MineHit));
        assert_eq!(session.snapshot().outcome, Outcome::Lost);

        session.restart().unwrap();
        assert_eq!(session.snapshot().outcome, Outcome::InProgress);
    }
}
