use serde::{Deserialize, Serialize};

/// Single coordinate axis, 1-based on the player-facing side.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Number of rows on the playing field.
pub const ROWS: Coord = 9;

/// Number of columns on the playing field.
pub const COLS: Coord = 9;

/// Total number of cells on the field.
pub const TOTAL_CELLS: CellCount = (ROWS as CellCount) * (COLS as CellCount);

/// A 1-based position on the field, `row` and `col` both in `1..=9`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub row: Coord,
    pub col: Coord,
}

impl GridPos {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    pub const fn in_bounds(self) -> bool {
        1 <= self.row && self.row <= ROWS && 1 <= self.col && self.col <= COLS
    }

    /// Converts to a 0-based ndarray index. Callers validate bounds first.
    pub const fn to_nd_index(self) -> [usize; 2] {
        [(self.row - 1) as usize, (self.col - 1) as usize]
    }

    /// All field positions in row-major order.
    pub fn iter_all() -> impl Iterator<Item = GridPos> {
        (1..=ROWS).flat_map(|row| (1..=COLS).map(move |col| GridPos::new(row, col)))
    }

    /// The up-to-8 in-bounds neighbors of this position.
    pub fn iter_neighbors(self) -> NeighborIter {
        NeighborIter::new(self)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it stays on the field.
fn apply_delta(pos: GridPos, delta: (i8, i8)) -> Option<GridPos> {
    let row = pos.row.checked_add_signed(delta.0)?;
    let col = pos.col.checked_add_signed(delta.1)?;
    let next = GridPos::new(row, col);
    next.in_bounds().then_some(next)
}

#[derive(Debug)]
pub struct NeighborIter {
    center: GridPos,
    index: u8,
}

impl NeighborIter {
    fn new(center: GridPos) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for NeighborIter {
    type Item = GridPos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next) = apply_delta(self.center, delta) {
                return Some(next);
            }
        }
    }
}
