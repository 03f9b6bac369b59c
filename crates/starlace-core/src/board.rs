//! The mutable puzzle board.

use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{CellState, Position, ToggleOrder};

/// An `n × n` grid of [`CellState`] values.
///
/// The board is a plain value type: it owns its cells, is cheap to clone at
/// the sizes this crate targets, and carries no derived state. Mutation goes
/// through [`toggled`](Self::toggled), indexed assignment, or the deduction
/// engine in the solver crate; validation and deduction are separate passes
/// the caller invokes explicitly.
///
/// Boards can be written as ASCII diagrams for tests and fixtures: `.` or `_`
/// for empty cells, `*` for stars, `x` (or `X`, `#`) for blocked cells, one
/// row per line, whitespace ignored.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use starlace_core::{Board, CellState, Position};
///
/// let board = Board::from_str(
///     "
///     *...
///     ..x.
///     ....
///     ....
///     ",
/// )?;
/// assert_eq!(board[Position::new(0, 0)], CellState::Star);
/// assert_eq!(board[Position::new(2, 1)], CellState::Blocked);
/// assert_eq!(board.count(CellState::Empty), 14);
/// # Ok::<(), starlace_core::ParseBoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    cells: Vec<CellState>,
}

impl Board {
    /// Creates an all-empty board of the given size.
    #[must_use]
    pub fn empty(size: u8) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; usize::from(size) * usize::from(size)],
        }
    }

    /// Returns the board size `n` of this `n × n` board.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Returns `true` if `pos` lies on the board.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x() < self.size && pos.y() < self.size
    }

    /// Returns the state at `pos`, or `None` when `pos` is out of range.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<CellState> {
        self.contains(pos).then(|| self.cells[self.offset(pos)])
    }

    /// Returns a copy of the board with the cell at `pos` advanced one step
    /// in the toggle cycle.
    ///
    /// The toggle itself performs no validation or deduction; those run as
    /// separate passes afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] when `pos` is outside the board. The
    /// coordinate is surfaced rather than clamped; a host UI typically treats
    /// this as a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use starlace_core::{Board, CellState, Position, ToggleOrder};
    ///
    /// let board = Board::empty(5);
    /// let board = board.toggled(Position::new(2, 2), ToggleOrder::StarFirst)?;
    /// assert_eq!(board[Position::new(2, 2)], CellState::Star);
    /// # Ok::<(), starlace_core::CoordinateError>(())
    /// ```
    pub fn toggled(&self, pos: Position, order: ToggleOrder) -> Result<Self, CoordinateError> {
        let state = self.cell(pos).ok_or(CoordinateError {
            pos,
            size: self.size,
        })?;
        let mut next = self.clone();
        next[pos] = state.cycled(order);
        Ok(next)
    }

    /// Iterates all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Iterates the positions of all `Star` cells in row-major order.
    pub fn stars(&self) -> impl Iterator<Item = Position> {
        self.positions().filter(|&pos| self[pos].is_star())
    }

    /// Counts the cells currently in `state`.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    fn offset(&self, pos: Position) -> usize {
        usize::from(pos.y()) * usize::from(self.size) + usize::from(pos.x())
    }
}

impl Index<Position> for Board {
    type Output = CellState;

    /// # Panics
    ///
    /// Panics if `pos` is outside the board; use [`Board::cell`] for checked
    /// access.
    fn index(&self, pos: Position) -> &CellState {
        assert!(
            self.contains(pos),
            "position {pos} out of range for {0}×{0} board",
            self.size
        );
        &self.cells[self.offset(pos)]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut CellState {
        assert!(
            self.contains(pos),
            "position {pos} out of range for {0}×{0} board",
            self.size
        );
        let offset = self.offset(pos);
        &mut self.cells[offset]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                write!(f, "{}", self[Position::new(x, y)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for ch in line.chars() {
                if ch.is_whitespace() {
                    continue;
                }
                row.push(match ch {
                    '.' | '_' => CellState::Empty,
                    '*' => CellState::Star,
                    'x' | 'X' | '#' => CellState::Blocked,
                    ch => return Err(ParseBoardError::UnexpectedChar { ch }),
                });
            }
            rows.push(row);
        }

        let size = u8::try_from(rows.len())
            .map_err(|_| ParseBoardError::TooLarge { rows: rows.len() })?;
        let mut cells = Vec::with_capacity(usize::from(size) * usize::from(size));
        for (y, row) in rows.iter().enumerate() {
            if row.len() != rows.len() {
                return Err(ParseBoardError::RaggedRow {
                    y,
                    len: row.len(),
                    expected: rows.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { size, cells })
    }
}

/// A coordinate that does not lie on the board it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("coordinate {pos} is outside the {size}×{size} board")]
pub struct CoordinateError {
    /// The offending coordinate.
    pub pos: Position,
    /// The size of the board that rejected it.
    pub size: u8,
}

/// An error produced while parsing a board diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// A character that does not name a cell state.
    #[display("unexpected cell character {ch:?}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
    },
    /// A row whose length differs from the number of rows.
    #[display("row {y} has {len} cells, expected {expected}")]
    RaggedRow {
        /// Row index of the offending row.
        y: usize,
        /// Number of cells found in that row.
        len: usize,
        /// Number of cells every row must have.
        expected: usize,
    },
    /// More rows than the supported maximum board size.
    #[display("{rows} rows exceed the maximum supported board size")]
    TooLarge {
        /// Number of rows found.
        rows: usize,
    },
}
