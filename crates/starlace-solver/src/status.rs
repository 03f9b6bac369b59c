//! Derived per-cell deduction status.

use std::ops::{Index, IndexMut};

use starlace_core::Position;

/// The forced-move classification of a single cell.
///
/// Statuses are recomputed from group occupancy on every deduction pass and
/// returned alongside the board; they are never stored on the board itself.
/// A host UI typically maps them to cell highlighting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStatus {
    /// No constraint currently forces this cell.
    #[default]
    Empty,
    /// Some group containing the cell already has its star.
    Filled,
    /// Some group containing the cell holds more than one star.
    Overfull,
    /// A starless group containing the cell has run out of empty cells.
    Underfull,
    /// The cell is the last empty cell of a starless group.
    OneLeft,
}

/// A board-shaped grid of [`CellStatus`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusGrid {
    size: u8,
    cells: Vec<CellStatus>,
}

impl StatusGrid {
    /// Creates a grid with every cell at [`CellStatus::Empty`].
    #[must_use]
    pub fn new(size: u8) -> Self {
        Self {
            size,
            cells: vec![CellStatus::Empty; usize::from(size) * usize::from(size)],
        }
    }

    /// Returns the board size `n` of this `n × n` grid.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Returns `true` if `pos` lies on the grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x() < self.size && pos.y() < self.size
    }

    /// Returns the status at `pos`, or `None` when `pos` is out of range.
    #[must_use]
    pub fn status(&self, pos: Position) -> Option<CellStatus> {
        self.contains(pos).then(|| self.cells[self.offset(pos)])
    }

    /// Iterates the positions currently classified as `status`, in row-major
    /// order.
    pub fn positions_with(&self, status: CellStatus) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
            .filter(move |&pos| self[pos] == status)
    }

    fn offset(&self, pos: Position) -> usize {
        usize::from(pos.y()) * usize::from(self.size) + usize::from(pos.x())
    }
}

impl Index<Position> for StatusGrid {
    type Output = CellStatus;

    /// # Panics
    ///
    /// Panics if `pos` is outside the grid; use [`StatusGrid::status`] for
    /// checked access.
    fn index(&self, pos: Position) -> &CellStatus {
        assert!(
            self.contains(pos),
            "position {pos} out of range for {0}×{0} status grid",
            self.size
        );
        &self.cells[self.offset(pos)]
    }
}

impl IndexMut<Position> for StatusGrid {
    fn index_mut(&mut self, pos: Position) -> &mut CellStatus {
        assert!(
            self.contains(pos),
            "position {pos} out of range for {0}×{0} status grid",
            self.size
        );
        let offset = self.offset(pos);
        &mut self.cells[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_empty() {
        let grid = StatusGrid::new(4);
        assert_eq!(grid.positions_with(CellStatus::Empty).count(), 16);
        assert_eq!(grid.positions_with(CellStatus::Filled).count(), 0);
    }

    #[test]
    fn test_status_checked_access() {
        let mut grid = StatusGrid::new(2);
        grid[Position::new(1, 0)] = CellStatus::OneLeft;
        assert_eq!(grid.status(Position::new(1, 0)), Some(CellStatus::OneLeft));
        assert_eq!(grid.status(Position::new(2, 0)), None);
    }
}
