use crate::*;
pub use random::*;

mod random;

/// Strategy seam for producing the hidden mine layout of a new round.
pub trait MineFieldGenerator {
    fn generate(self, num_mines: CellCount) -> Result<MineField>;
}
