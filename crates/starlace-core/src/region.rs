//! Region partitions.

use std::{fmt, ops::Index, str::FromStr};

use crate::Position;

/// An immutable partition of an `n × n` board into `n` regions.
///
/// Each cell maps to a region id in `[0, n)`. The mapping is validated once
/// at construction and never re-checked per move; it stays fixed for the
/// lifetime of one puzzle and is replaced wholesale on a new puzzle.
///
/// Region grids can be written as ASCII diagrams for tests and fixtures, one
/// base-36 digit per cell:
///
/// ```
/// use starlace_core::{Position, RegionGrid};
///
/// let regions: RegionGrid = "
///     0011
///     0011
///     2233
///     2233
/// "
/// .parse()?;
/// assert_eq!(regions[Position::new(3, 0)], 1);
/// assert_eq!(regions[Position::new(0, 2)], 2);
/// # Ok::<(), starlace_core::ParseRegionGridError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGrid {
    size: u8,
    ids: Vec<u8>,
}

impl RegionGrid {
    /// Validates and wraps a flat, row-major buffer of region ids.
    ///
    /// # Errors
    ///
    /// Returns [`RegionGridError::WrongCellCount`] when `ids` does not hold
    /// `size × size` entries, or [`RegionGridError::IdOutOfRange`] when an id
    /// falls outside `[0, size)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use starlace_core::{RegionGrid, RegionGridError};
    ///
    /// let regions = RegionGrid::new(2, vec![0, 0, 1, 1])?;
    /// assert_eq!(regions.size(), 2);
    ///
    /// let err = RegionGrid::new(2, vec![0, 1, 2, 0]).unwrap_err();
    /// assert!(matches!(err, RegionGridError::IdOutOfRange { id: 2, .. }));
    /// # Ok::<(), RegionGridError>(())
    /// ```
    pub fn new(size: u8, ids: Vec<u8>) -> Result<Self, RegionGridError> {
        let expected = usize::from(size) * usize::from(size);
        if ids.len() != expected {
            return Err(RegionGridError::WrongCellCount {
                expected,
                actual: ids.len(),
            });
        }
        for (i, &id) in ids.iter().enumerate() {
            if id >= size {
                #[expect(clippy::cast_possible_truncation)]
                let pos = Position::new(
                    (i % usize::from(size)) as u8,
                    (i / usize::from(size)) as u8,
                );
                return Err(RegionGridError::IdOutOfRange { pos, id, size });
            }
        }
        Ok(Self { size, ids })
    }

    /// Validates and wraps a row-major nested id buffer.
    ///
    /// The board size is taken from the number of rows; every row must have
    /// that length.
    ///
    /// # Errors
    ///
    /// Returns [`RegionGridError::TooLarge`] when there are more rows than
    /// the maximum supported board size, [`RegionGridError::RaggedRow`] when
    /// a row length differs from the row count, and otherwise the same errors
    /// as [`RegionGrid::new`].
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, RegionGridError> {
        let size = u8::try_from(rows.len())
            .map_err(|_| RegionGridError::TooLarge { rows: rows.len() })?;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != rows.len() {
                return Err(RegionGridError::RaggedRow {
                    y,
                    len: row.len(),
                    expected: rows.len(),
                });
            }
        }
        Self::new(size, rows.concat())
    }

    /// Builds the deterministic default partition for `size`.
    ///
    /// When `size` is a perfect square the partition is the familiar
    /// `√size × √size` box grid; otherwise each row forms its own region.
    /// The output goes through the same validation as caller-supplied
    /// partitions.
    ///
    /// # Examples
    ///
    /// ```
    /// use starlace_core::{Position, RegionGrid};
    ///
    /// let regions = RegionGrid::default_partition(4);
    /// assert_eq!(regions[Position::new(0, 0)], 0);
    /// assert_eq!(regions[Position::new(3, 0)], 1);
    /// assert_eq!(regions[Position::new(0, 3)], 2);
    /// assert_eq!(regions[Position::new(3, 3)], 3);
    /// ```
    #[must_use]
    pub fn default_partition(size: u8) -> Self {
        let root = (1..=15u8).find(|&r| u16::from(r) * u16::from(r) == u16::from(size));
        let mut ids = Vec::with_capacity(usize::from(size) * usize::from(size));
        for y in 0..size {
            for x in 0..size {
                ids.push(match root {
                    Some(r) => (y / r) * r + x / r,
                    None => y,
                });
            }
        }
        Self::new(size, ids).expect("generated partition ids are always in range")
    }

    /// Returns the board size `n` of this `n × n` partition.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Returns `true` if `pos` lies on the partitioned board.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x() < self.size && pos.y() < self.size
    }

    /// Returns the region id at `pos`, or `None` when `pos` is out of range.
    #[must_use]
    pub fn id(&self, pos: Position) -> Option<u8> {
        self.contains(pos).then(|| self.ids[self.offset(pos)])
    }

    /// Iterates all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    fn offset(&self, pos: Position) -> usize {
        usize::from(pos.y()) * usize::from(self.size) + usize::from(pos.x())
    }
}

impl Index<Position> for RegionGrid {
    type Output = u8;

    /// # Panics
    ///
    /// Panics if `pos` is outside the partition; use [`RegionGrid::id`] for
    /// checked access.
    fn index(&self, pos: Position) -> &u8 {
        assert!(
            self.contains(pos),
            "position {pos} out of range for {0}×{0} region grid",
            self.size
        );
        &self.ids[self.offset(pos)]
    }
}

impl FromStr for RegionGrid {
    type Err = ParseRegionGridError;

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
                let id = ch
                    .to_digit(36)
                    .ok_or(ParseRegionGridError::UnexpectedChar { ch })?;
                #[expect(clippy::cast_possible_truncation)]
                row.push(id as u8);
            }
            rows.push(row);
        }
        Ok(Self::from_rows(&rows)?)
    }
}

impl fmt::Display for RegionGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let id = self[Position::new(x, y)];
                let digit = char::from_digit(u32::from(id), 36).unwrap_or('?');
                write!(f, "{digit}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// An error produced while validating a region partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RegionGridError {
    /// The id buffer does not hold `size × size` entries.
    #[display("expected {expected} region ids, got {actual}")]
    WrongCellCount {
        /// Number of ids required for the requested size.
        expected: usize,
        /// Number of ids supplied.
        actual: usize,
    },
    /// A row whose length differs from the number of rows.
    #[display("row {y} has {len} ids, expected {expected}")]
    RaggedRow {
        /// Row index of the offending row.
        y: usize,
        /// Number of ids found in that row.
        len: usize,
        /// Number of ids every row must have.
        expected: usize,
    },
    /// More rows than the supported maximum board size.
    #[display("{rows} rows exceed the maximum supported board size")]
    TooLarge {
        /// Number of rows found.
        rows: usize,
    },
    /// A region id outside `[0, size)`.
    #[display("region id {id} at {pos} is outside 0..{size}")]
    IdOutOfRange {
        /// Position carrying the offending id.
        pos: Position,
        /// The offending id.
        id: u8,
        /// The partition size bounding valid ids.
        size: u8,
    },
}

/// An error produced while parsing a region-grid diagram.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
)]
pub enum ParseRegionGridError {
    /// A character that is not a base-36 digit.
    #[display("unexpected region character {ch:?}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
    },
    /// The parsed rows failed partition validation.
    #[display("{_0}")]
    Invalid(#[from] RegionGridError),
}
