//! Board: fixed-size occupancy grid and line clearing.

use crate::piece::PIECE_SIZE;
use std::collections::VecDeque;

/// Occupancy grid. y=0 is top; rows are stored [0..height].
///
/// The board only answers for valid indices. Anything above the top edge or
/// past the sides and floor is the collision check's business, so indexing
/// out of range here is a caller bug and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    /// rows[y][x] = occupied. rows[0] is top.
    rows: VecDeque<Vec<bool>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= PIECE_SIZE,
            "board width {width} is narrower than the {PIECE_SIZE}-wide piece box"
        );
        assert!(height >= 1, "board needs at least one row");
        let rows = (0..height).map(|_| vec![false; width]).collect();
        Self { width, rows }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows[y][x]
    }

    #[inline]
    pub fn set_occupied(&mut self, x: usize, y: usize) {
        self.rows[y][x] = true;
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(|&c| c)
    }

    /// Drop row `y`; everything above slides down one and row 0 comes back empty.
    pub fn collapse_row(&mut self, y: usize) {
        self.rows.remove(y);
        self.rows.push_front(vec![false; self.width]);
    }

    /// Remove every full row, scanning bottom-up. After a collapse the same
    /// index is tested again since the row that slid into it may be full too.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height();
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.collapse_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&c| c).count()
    }

    /// Occupied `(x, y)` cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &c)| c)
                .map(move |(x, _)| (x, y))
        })
    }

    /// Fill a whole row; handy for setting up positions.
    #[cfg(test)]
    pub fn fill_row(&mut self, y: usize) {
        self.rows[y].fill(true);
    }
}
