//! Board geometry.
//!
//! The board is a fixed `size × size` square grid. Cells are addressed by a
//! linear index `y * size + x`; the board itself stores no state, units are
//! bound to cells by the game state.
//!
//! ## Distances
//!
//! Every range on this board is a Chebyshev distance, `max(|dx|, |dy|)`, so
//! attack and search areas are squares centred on the acting unit.
//!
//! ```
//! use tactics_engine::core::Board;
//!
//! let board = Board::new(8);
//!
//! assert_eq!(board.to_xy(19), (3, 2));
//! assert_eq!(board.index_of(3, 2), Some(19));
//! assert_eq!(board.index_of(-1, 2), None);
//! assert_eq!(board.chebyshev(0, 63), 7);
//! ```

use serde::{Deserialize, Serialize};

use super::side::Side;

/// Linear cell index, `y * size + x`.
pub type Cell = usize;

/// Position of a cell relative to the board edges.
///
/// Used by renderers to pick border artwork for each tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    TopLeft,
    TopRight,
    Top,
    BottomLeft,
    BottomRight,
    Left,
    Right,
    Bottom,
    Center,
}

/// A square grid of `size × size` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
}

impl Board {
    /// Create a board with the given side length.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    /// Side length of the board.
    #[must_use]
    pub const fn size(self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.size * self.size
    }

    /// Check whether a cell index lies on the board.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell < self.cell_count()
    }

    /// Convert a cell index to `(x, y)` coordinates.
    #[must_use]
    pub const fn to_xy(self, cell: Cell) -> (usize, usize) {
        (cell % self.size, cell / self.size)
    }

    /// Convert coordinates to a cell index.
    ///
    /// Returns `None` for coordinates off the board, so callers can step
    /// past the edges with signed arithmetic.
    #[must_use]
    pub fn index_of(self, x: i64, y: i64) -> Option<Cell> {
        let size = self.size as i64;
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some((y * size + x) as Cell)
    }

    /// Chebyshev distance between two cells.
    #[must_use]
    pub fn chebyshev(self, a: Cell, b: Cell) -> usize {
        let (ax, ay) = self.to_xy(a);
        let (bx, by) = self.to_xy(b);
        ax.abs_diff(bx).max(ay.abs_diff(by))
    }

    /// Largest Chebyshev radius around `cell` that still reaches a board edge.
    #[must_use]
    pub fn max_radius(self, cell: Cell) -> usize {
        let (x, y) = self.to_xy(cell);
        let last = self.size.saturating_sub(1);
        x.max(y).max(last - x).max(last - y)
    }

    /// Classify a cell by the board edges it touches.
    #[must_use]
    pub fn tile_kind(self, cell: Cell) -> TileKind {
        let (x, y) = self.to_xy(cell);
        let last = self.size.saturating_sub(1);

        match (x == 0, x == last, y == 0, y == last) {
            (true, _, true, _) => TileKind::TopLeft,
            (_, true, true, _) => TileKind::TopRight,
            (_, _, true, _) => TileKind::Top,
            (true, _, _, true) => TileKind::BottomLeft,
            (_, true, _, true) => TileKind::BottomRight,
            (true, _, _, _) => TileKind::Left,
            (_, true, _, _) => TileKind::Right,
            (_, _, _, true) => TileKind::Bottom,
            _ => TileKind::Center,
        }
    }

    /// Iterate the in-bounds cells of the square of the given radius around
    /// `center`, excluding the center itself.
    ///
    /// Scan order is column-major: x from left to right, and for each x the
    /// rows from top to bottom. Target selection relies on this order for
    /// tie breaking.
    pub fn square_around(self, center: Cell, radius: usize) -> impl Iterator<Item = Cell> {
        let (cx, cy) = self.to_xy(center);
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);

        (cx - r..=cx + r)
            .flat_map(move |x| (cy - r..=cy + r).map(move |y| (x, y)))
            .filter(move |&(x, y)| !(x == cx && y == cy))
            .filter_map(move |(x, y)| self.index_of(x, y))
    }

    /// Columns a side's units are placed into at the start of a level.
    #[must_use]
    pub fn spawn_columns(self, side: Side) -> [usize; 2] {
        match side {
            Side::Human => [0, 1],
            Side::Computer => [self.size - 2, self.size - 1],
        }
    }
}
