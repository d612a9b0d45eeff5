#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Ground truth of one round: where the mines are hidden.
///
/// A generation artifact, consumed by [`Board::from_field`] which bakes the
/// mask and the per-cell hints into the playable grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineField {
    pub(crate) fn from_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Places mines at the given positions, bypassing random generation.
    pub fn from_mine_positions(mines: &[GridPos]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default([ROWS as usize, COLS as usize]);

        for &pos in mines {
            if !pos.in_bounds() {
                return Err(GameError::OutOfRange);
            }
            mine_mask[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mask(mine_mask))
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        TOTAL_CELLS - self.mine_count
    }

    pub fn contains_mine(&self, pos: GridPos) -> bool {
        self[pos]
    }

    pub fn adjacent_mine_count(&self, pos: GridPos) -> u8 {
        pos.iter_neighbors()
            .filter(|&neighbor| self[neighbor])
            .count()
            .try_into()
            .unwrap()
    }
}

impl Index<GridPos> for MineField {
    type Output = bool;

    fn index(&self, pos: GridPos) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}

/// Player command kind, as handed over by the input adapter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Mark,
    Reveal,
}

/// Outcome of one applied command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Rejected(RejectReason),
    Loss,
    Win,
}

impl CommandResult {
    /// Whether the round is over after this command.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Loss | Self::Win)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn from_mine_positions_counts_distinct_mines() {
        let mines = vec![
            GridPos::new(1, 1),
            GridPos::new(5, 5),
            GridPos::new(9, 9),
            // duplicates collapse into one mine
            GridPos::new(5, 5),
        ];

        let field = MineField::from_mine_positions(&mines).unwrap();

        assert_eq!(field.mine_count(), 3);
        assert_eq!(field.safe_cell_count(), 78);
        assert!(field.contains_mine(GridPos::new(5, 5)));
        assert!(!field.contains_mine(GridPos::new(5, 6)));
    }

    #[test]
    fn from_mine_positions_rejects_positions_off_the_field() {
        let result = MineField::from_mine_positions(&[GridPos::new(0, 1)]);
        assert_eq!(result, Err(GameError::OutOfRange));

        let result = MineField::from_mine_positions(&[GridPos::new(3, 10)]);
        assert_eq!(result, Err(GameError::OutOfRange));
    }

    #[test]
    fn adjacent_mine_count_is_exact() {
        let field = MineField::from_mine_positions(&[
            GridPos::new(1, 1),
            GridPos::new(5, 5),
            GridPos::new(9, 9),
        ])
        .unwrap();

        // only (1,1) is adjacent to (2,2)
        assert_eq!(field.adjacent_mine_count(GridPos::new(2, 2)), 1);
        assert_eq!(field.adjacent_mine_count(GridPos::new(1, 2)), 1);
        assert_eq!(field.adjacent_mine_count(GridPos::new(3, 3)), 0);
        assert_eq!(field.adjacent_mine_count(GridPos::new(4, 4)), 1);
        assert_eq!(field.adjacent_mine_count(GridPos::new(8, 8)), 1);
    }

    #[test]
    fn adjacent_mine_count_reaches_eight() {
        let ring: alloc::vec::Vec<_> = GridPos::new(5, 5).iter_neighbors().collect();
        let field = MineField::from_mine_positions(&ring).unwrap();

        assert_eq!(field.adjacent_mine_count(GridPos::new(5, 5)), 8);
    }

    #[test]
    fn terminal_command_results() {
        assert!(CommandResult::Win.is_terminal());
        assert!(CommandResult::Loss.is_terminal());
        assert!(!CommandResult::Continue.is_terminal());
        assert!(!CommandResult::Rejected(RejectReason::NumberHere).is_terminal());
    }
}
