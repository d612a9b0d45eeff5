use alloc::collections::{BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One round of the game: the 9×9 grid plus everything needed to score it.
///
/// Constructed fully initialized (mines placed, hints computed); a new round
/// gets a new board, there is no in-place reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    num_mines: CellCount,
    state: GameState,
    revealed_safe: CellCount,
    marked_mines: CellCount,
    marked_safe: CellCount,
    triggered_mine: Option<GridPos>,
}

impl Board {
    /// Starts a round with `num_mines` randomly placed mines.
    pub fn new_game(num_mines: CellCount, seed: u64) -> Result<Self> {
        RandomMineFieldGenerator::new(seed)
            .generate(num_mines)
            .map(Self::from_field)
    }

    /// Builds the playable grid from a mine layout, computing every safe
    /// cell's hint in a single pass.
    pub fn from_field(field: MineField) -> Self {
        let mut cells: Array2<Cell> = Array2::default([ROWS as usize, COLS as usize]);
        for pos in GridPos::iter_all() {
            let cell = &mut cells[pos.to_nd_index()];
            cell.has_mine = field.contains_mine(pos);
            if !cell.has_mine {
                cell.adjacent_mines = field.adjacent_mine_count(pos);
            }
        }

        Self {
            cells,
            num_mines: field.mine_count(),
            state: GameState::default(),
            revealed_safe: 0,
            marked_mines: 0,
            marked_safe: 0,
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn num_mines(&self) -> CellCount {
        self.num_mines
    }

    pub fn cell_at(&self, pos: GridPos) -> Cell {
        self.cells[pos.to_nd_index()]
    }

    /// The mine the player stepped on, on a lost board.
    pub fn triggered_mine(&self) -> Option<GridPos> {
        self.triggered_mine
    }

    pub fn apply_command(&mut self, pos: GridPos, action: Action) -> Result<CommandResult> {
        match action {
            Action::Mark => self.toggle_mark(pos),
            Action::Reveal => self.reveal(pos),
        }
    }

    /// Flips the mark on a cell.
    ///
    /// Marking a revealed hint digit is refused. Marking a revealed empty
    /// cell still toggles, matching the original console game.
    pub fn toggle_mark(&mut self, pos: GridPos) -> Result<CommandResult> {
        let pos = validate_pos(pos)?;
        self.check_in_progress()?;

        let cell = self.cells[pos.to_nd_index()];
        if cell.revealed && cell.has_hint() {
            return Ok(CommandResult::Rejected(RejectReason::NumberHere));
        }

        let marked = !cell.marked;
        self.cells[pos.to_nd_index()].marked = marked;
        match (cell.has_mine, marked) {
            (true, true) => self.marked_mines += 1,
            (true, false) => self.marked_mines -= 1,
            (false, true) => self.marked_safe += 1,
            (false, false) => self.marked_safe -= 1,
        }

        Ok(self.check_win())
    }

    /// Uncovers a cell: a mine loses the round, a hint opens one cell, a
    /// blank opens its whole zero region plus the digit border around it.
    pub fn reveal(&mut self, pos: GridPos) -> Result<CommandResult> {
        let pos = validate_pos(pos)?;
        self.check_in_progress()?;

        let cell = self.cells[pos.to_nd_index()];
        if cell.has_mine {
            self.cells[pos.to_nd_index()].revealed = true;
            self.triggered_mine = Some(pos);
            self.uncover_all_mines();
            self.state = GameState::Lost;
            log::debug!("mine triggered at {:?}", pos);
            return Ok(CommandResult::Loss);
        }

        if !cell.revealed {
            self.reveal_safe(pos);
            log::debug!(
                "revealed {:?}, adjacent mines: {}",
                pos,
                cell.adjacent_mines
            );
            if cell.adjacent_mines == 0 {
                self.flood_reveal(pos);
            }
        }

        Ok(self.check_win())
    }

    /// The nine display rows, top to bottom. Framing with headers and
    /// borders is the caller's business.
    pub fn render_rows(&self) -> Vec<String> {
        (1..=ROWS)
            .map(|row| {
                (1..=COLS)
                    .map(|col| self.cell_at(GridPos::new(row, col)).symbol())
                    .collect()
            })
            .collect()
    }

    fn reveal_safe(&mut self, pos: GridPos) {
        let cell = &mut self.cells[pos.to_nd_index()];
        debug_assert!(!cell.has_mine);
        if !cell.revealed {
            cell.revealed = true;
            self.revealed_safe += 1;
        }
    }

    /// Worklist flood fill: expands through connected zero-hint cells and
    /// stops one cell into the digit border. Never touches a mine or an
    /// already-revealed cell.
    fn flood_reveal(&mut self, start: GridPos) {
        let mut visited = BTreeSet::from([start]);
        let mut frontier: VecDeque<_> = start
            .iter_neighbors()
            .filter(|&pos| self.is_floodable(pos))
            .collect();
        log::trace!("flood fill from {:?}, initial frontier: {:?}", start, frontier);

        while let Some(pos) = frontier.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            if !self.is_floodable(pos) {
                continue;
            }

            self.reveal_safe(pos);
            let adjacent_mines = self.cells[pos.to_nd_index()].adjacent_mines;
            log::trace!("flood revealed {:?}, adjacent mines: {}", pos, adjacent_mines);

            if adjacent_mines == 0 {
                frontier.extend(
                    pos.iter_neighbors()
                        .filter(|&next| self.is_floodable(next))
                        .filter(|next| !visited.contains(next)),
                );
            }
        }
    }

    fn is_floodable(&self, pos: GridPos) -> bool {
        let cell = self.cells[pos.to_nd_index()];
        !cell.has_mine && !cell.revealed
    }

    /// After a loss the whole layout is shown, like the console game does.
    fn uncover_all_mines(&mut self) {
        for pos in GridPos::iter_all() {
            let cell = &mut self.cells[pos.to_nd_index()];
            if cell.has_mine {
                cell.revealed = true;
            }
        }
    }

    /// Dual victory check, run after every applied command: either all mines
    /// are marked with no stray marks, or nothing but mines is left covered.
    fn check_win(&mut self) -> CommandResult {
        let all_mines_marked = self.marked_mines == self.num_mines && self.marked_safe == 0;
        let all_safe_revealed = self.revealed_safe == TOTAL_CELLS - self.num_mines;

        if all_mines_marked || all_safe_revealed {
            self.state = GameState::Won;
            CommandResult::Win
        } else {
            CommandResult::Continue
        }
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::RoundOver)
        } else {
            Ok(())
        }
    }
}

fn validate_pos(pos: GridPos) -> Result<GridPos> {
    if pos.in_bounds() {
        Ok(pos)
    } else {
        Err(GameError::OutOfRange)
    }
}
