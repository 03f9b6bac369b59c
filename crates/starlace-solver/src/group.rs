//! Constraint group construction.
//!
//! A solved puzzle places exactly one star in every row, every column, and
//! every region, with no two stars touching. All four rules reduce to the
//! same shape: a set of cells that must contain exactly one star. This module
//! derives those sets from the current board state.

use starlace_core::{Board, CellState, Position, RegionGrid};
use tinyvec::ArrayVec;

use crate::SolverError;

/// Identifies which constraint family a [`Group`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// All cells sharing one region id.
    Region(u8),
    /// All cells in one row, identified by its `y` coordinate.
    Row(u8),
    /// All cells in one column, identified by its `x` coordinate.
    Column(u8),
    /// The edge-clipped 3×3 block around a placed star.
    StarNeighborhood(Position),
}

/// A set of cells that must hold exactly one star in a solved puzzle.
///
/// Region, row, and column groups are fixed for the lifetime of a puzzle;
/// star-neighborhood groups are transient and rebuilt whenever stars change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    kind: GroupKind,
    cells: Vec<Position>,
}

impl Group {
    /// Returns the constraint family this group belongs to.
    #[must_use]
    pub const fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Returns the member cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Returns `true` if `pos` is a member of this group.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Counts the `Star` cells currently in the group.
    #[must_use]
    pub fn star_count(&self, board: &Board) -> usize {
        self.cells.iter().filter(|&&pos| board[pos].is_star()).count()
    }

    /// Counts the `Empty` cells currently in the group.
    #[must_use]
    pub fn free_count(&self, board: &Board) -> usize {
        self.cells
            .iter()
            .filter(|&&pos| board[pos].is_empty())
            .count()
    }
}

/// Returns the up-to-eight in-bounds cells surrounding `pos`, excluding
/// `pos` itself.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn neighborhood(pos: Position, size: u8) -> ArrayVec<[Position; 8]> {
    let mut cells = ArrayVec::new();
    for dy in -1i16..=1 {
        for dx in -1i16..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let x = i16::from(pos.x()) + dx;
            let y = i16::from(pos.y()) + dy;
            if (0..i16::from(size)).contains(&x) && (0..i16::from(size)).contains(&y) {
                cells.push(Position::new(x as u8, y as u8));
            }
        }
    }
    cells
}

/// Builds all four group families for the current board state.
///
/// The fixed families come first — regions in id order, then rows, then
/// columns — followed by one neighborhood group per star in row-major scan
/// order. The order is stable and part of the contract, so callers can rely
/// on deterministic output.
///
/// A star's neighborhood group includes the star itself: the surrounding
/// cells must stay starless, which reads as "exactly one star" over the
/// clipped 3×3 block.
///
/// # Errors
///
/// Returns [`SolverError::SizeMismatch`] when `board` and `regions` disagree
/// on the board size.
pub fn build_groups(board: &Board, regions: &RegionGrid) -> Result<Vec<Group>, SolverError> {
    if board.size() != regions.size() {
        return Err(SolverError::SizeMismatch {
            board: board.size(),
            regions: regions.size(),
        });
    }

    let size = board.size();
    let mut groups =
        Vec::with_capacity(usize::from(size) * 3 + board.count(CellState::Star));

    let mut region_cells: Vec<Vec<Position>> = vec![Vec::new(); usize::from(size)];
    for pos in board.positions() {
        region_cells[usize::from(regions[pos])].push(pos);
    }
    for (id, cells) in (0..size).zip(region_cells) {
        groups.push(Group {
            kind: GroupKind::Region(id),
            cells,
        });
    }

    for y in 0..size {
        groups.push(Group {
            kind: GroupKind::Row(y),
            cells: (0..size).map(|x| Position::new(x, y)).collect(),
        });
    }
    for x in 0..size {
        groups.push(Group {
            kind: GroupKind::Column(x),
            cells: (0..size).map(|y| Position::new(x, y)).collect(),
        });
    }

    for star in board.stars() {
        let mut cells = vec![star];
        cells.extend(neighborhood(star, size));
        groups.push(Group {
            kind: GroupKind::StarNeighborhood(star),
            cells,
        });
    }

    Ok(groups)
}
