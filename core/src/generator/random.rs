use super::*;
use ndarray::Array2;

/// Uniform rejection sampling: draw positions until the requested number of
/// distinct cells hold a mine. Every subset of that size is equally likely.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMineFieldGenerator {
    seed: u64,
}

impl RandomMineFieldGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineFieldGenerator for RandomMineFieldGenerator {
    fn generate(self, num_mines: CellCount) -> Result<MineField> {
        use rand::prelude::*;

        if num_mines > TOTAL_CELLS {
            return Err(GameError::InvalidMineCount);
        }

        // resampling stalls as the field fills up; a full field needs no draws
        if num_mines == TOTAL_CELLS {
            log::warn!("every cell mined, skipping random placement");
            return Ok(MineField::from_mask(Array2::from_elem(
                [ROWS as usize, COLS as usize],
                true,
            )));
        }

        let mut mine_mask: Array2<bool> = Array2::default([ROWS as usize, COLS as usize]);
        let mut placed: CellCount = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while placed < num_mines {
            let pos = GridPos::new(rng.random_range(1..=ROWS), rng.random_range(1..=COLS));
            let cell = &mut mine_mask[pos.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        Ok(MineField::from_mask(mine_mask))
    }
}
