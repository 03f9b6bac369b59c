//! Board validation.

use starlace_core::{Board, Position, RegionGrid};

use crate::{SolverError, group::neighborhood};

/// The outcome of a validation scan.
///
/// Validation never fails on puzzle state: an empty board is simply valid and
/// incomplete. Completion requires exactly one star per row, column, and
/// region on top of validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    violation: Option<Violation>,
    complete: bool,
}

impl Validation {
    /// Returns `true` when no rule violation was found.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.violation.is_none()
    }

    /// Returns `true` when the board is a complete, valid solution.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns the reported violation, if any.
    ///
    /// When several rules are broken at once this is the last violation the
    /// scan encountered, not necessarily the first in reading order.
    #[must_use]
    pub const fn violation(&self) -> Option<Violation> {
        self.violation
    }
}

/// A rule violation discovered by [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Violation {
    /// Two stars within Chebyshev distance 1 of each other.
    #[display("stars at {first} and {second} touch")]
    AdjacentStars {
        /// The star whose neighborhood probe found the conflict.
        first: Position,
        /// The neighboring star.
        second: Position,
    },
    /// A row holding more than one star.
    #[display("row {y} holds {count} stars")]
    RowOverfilled {
        /// Row index.
        y: u8,
        /// Star count at the time the violation was recorded.
        count: usize,
    },
    /// A column holding more than one star.
    #[display("column {x} holds {count} stars")]
    ColumnOverfilled {
        /// Column index.
        x: u8,
        /// Star count at the time the violation was recorded.
        count: usize,
    },
    /// A region holding more than one star.
    #[display("region {id} holds {count} stars")]
    RegionOverfilled {
        /// Region id.
        id: u8,
        /// Star count at the time the violation was recorded.
        count: usize,
    },
}

/// Scans the board for rule violations and completion.
///
/// One row-major pass over the star cells tallies rows, columns, and regions
/// — recording an overfill as a tally crosses one — and then probes each
/// star's clipped neighborhood for a touching star. Later findings overwrite
/// earlier ones, so the reported reason is the last violation encountered.
///
/// # Errors
///
/// Returns [`SolverError::SizeMismatch`] when `board` and `regions` disagree
/// on the board size; every puzzle state, including a fully empty board,
/// produces an `Ok` result.
///
/// # Examples
///
/// ```
/// use starlace_core::{Board, RegionGrid};
/// use starlace_solver::validate;
///
/// let regions = RegionGrid::default_partition(4);
/// let report = validate(&Board::empty(4), &regions)?;
/// assert!(report.is_valid());
/// assert!(!report.is_complete());
/// # Ok::<(), starlace_solver::SolverError>(())
/// ```
pub fn validate(board: &Board, regions: &RegionGrid) -> Result<Validation, SolverError> {
    if board.size() != regions.size() {
        return Err(SolverError::SizeMismatch {
            board: board.size(),
            regions: regions.size(),
        });
    }

    let size = usize::from(board.size());
    let mut row_counts = vec![0usize; size];
    let mut col_counts = vec![0usize; size];
    let mut region_counts = vec![0usize; size];
    let mut violation = None;

    for star in board.stars() {
        let y = usize::from(star.y());
        let x = usize::from(star.x());
        let id = regions[star];

        row_counts[y] += 1;
        if row_counts[y] > 1 {
            violation = Some(Violation::RowOverfilled {
                y: star.y(),
                count: row_counts[y],
            });
        }
        col_counts[x] += 1;
        if col_counts[x] > 1 {
            violation = Some(Violation::ColumnOverfilled {
                x: star.x(),
                count: col_counts[x],
            });
        }
        region_counts[usize::from(id)] += 1;
        if region_counts[usize::from(id)] > 1 {
            violation = Some(Violation::RegionOverfilled {
                id,
                count: region_counts[usize::from(id)],
            });
        }

        for neighbor in neighborhood(star, board.size()) {
            if board[neighbor].is_star() {
                violation = Some(Violation::AdjacentStars {
                    first: star,
                    second: neighbor,
                });
            }
        }
    }

    let complete = violation.is_none()
        && row_counts.iter().all(|&count| count == 1)
        && col_counts.iter().all(|&count| count == 1)
        && region_counts.iter().all(|&count| count == 1);

    Ok(Validation {
        violation,
        complete,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    fn check(board_str: &str, regions_str: &str) -> Validation {
        let board = Board::from_str(board_str).unwrap();
        let regions = RegionGrid::from_str(regions_str).unwrap();
        validate(&board, &regions).unwrap()
    }

    const ROW_REGIONS: &str = "
        0000
        1111
        2222
        3333
    ";

    #[test]
    fn test_empty_board_is_valid_and_incomplete() {
        let report = validate(&Board::empty(4), &RegionGrid::default_partition(4)).unwrap();
        assert!(report.is_valid());
        assert!(!report.is_complete());
        assert_eq!(report.violation(), None);
    }

    #[test]
    fn test_complete_solution() {
        // One star per row, column, and (single-row) region, nothing
        // touching.
        let report = check(
            "
            .*..
            ...*
            *...
            ..*.
            ",
            ROW_REGIONS,
        );
        assert!(report.is_valid());
        assert!(report.is_complete());
    }

    #[test]
    fn test_touching_stars_invalidate() {
        let report = check(
            "
            *...
            .*..
            ....
            ....
            ",
            ROW_REGIONS,
        );
        assert!(!report.is_valid());
        assert!(!report.is_complete());
        assert!(matches!(
            report.violation(),
            Some(Violation::AdjacentStars { .. })
        ));
    }

    #[test]
    fn test_adjacency_wins_over_a_shared_region() {
        // The two stars share region 0 *and* touch; the adjacency probe runs
        // after the tallies for each star, so it reports last.
        let report = check(
            "
            *...
            .*..
            ....
            ....
            ",
            "
            0011
            0011
            2233
            2233
            ",
        );
        assert!(!report.is_valid());
        assert!(matches!(
            report.violation(),
            Some(Violation::AdjacentStars { .. })
        ));
    }

    #[test]
    fn test_doubled_row_invalidates() {
        // Same row, different columns and regions.
        let report = check(
            "
            *..*
            ....
            ....
            ....
            ",
            "
            0011
            0011
            2233
            2233
            ",
        );
        assert!(!report.is_valid());
        assert_eq!(
            report.violation(),
            Some(Violation::RowOverfilled { y: 0, count: 2 })
        );
    }

    #[test]
    fn test_doubled_column_invalidates() {
        let report = check(
            "
            .*..
            ....
            ....
            .*..
            ",
            ROW_REGIONS,
        );
        assert!(!report.is_valid());
        assert_eq!(
            report.violation(),
            Some(Violation::ColumnOverfilled { x: 1, count: 2 })
        );
    }

    #[test]
    fn test_doubled_region_invalidates() {
        // Distinct rows and columns, same L-shaped region 0.
        let report = check(
            "
            ...*
            ....
            ....
            *...
            ",
            "
            0000
            0111
            0122
            0123
            ",
        );
        assert!(!report.is_valid());
        assert!(matches!(
            report.violation(),
            Some(Violation::RegionOverfilled { id: 0, count: 2 })
        ));
    }

    #[test]
    fn test_missing_star_keeps_board_incomplete() {
        // Valid placement but row 3 (and column 3, region 3) are empty.
        let report = check(
            "
            .*..
            ...*
            *...
            ....
            ",
            ROW_REGIONS,
        );
        assert!(report.is_valid());
        assert!(!report.is_complete());
    }

    #[test]
    fn test_rejects_size_mismatch() {
        let err = validate(&Board::empty(4), &RegionGrid::default_partition(5)).unwrap_err();
        assert_eq!(
            err,
            SolverError::SizeMismatch {
                board: 4,
                regions: 5,
            }
        );
    }

    #[test]
    fn test_violation_display_names_the_cells() {
        let report = check(
            "
            *...
            .*..
            ....
            ....
            ",
            ROW_REGIONS,
        );
        let reason = report.violation().unwrap().to_string();
        assert!(reason.contains("touch"), "unexpected reason: {reason}");
    }
}
