use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width and height must both be at least 1")]
    InvalidDimension,
    #[error("Mine count must leave at least one safe cell")]
    InvalidMineCount,
    #[error("Cell index out of range")]
    IndexOutOfRange,
}

pub type Result<T> = core::result::Result<T, GameError>;
