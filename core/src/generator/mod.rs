use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// First-click protection. `Random` gives no guarantee, which is the default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StartCell {
    #[default]
    Random,
    SimpleSafe,
    AlwaysZero,
}
