//! Test utilities for deduction and validation scenarios.
//!
//! This module provides [`DeductionTester`], a fluent harness for verifying
//! engine behavior against board diagrams.
//!
//! # Example
//!
//! ```
//! use starlace_core::{CellState, Position};
//! use starlace_solver::{DeductionConfig, testing::DeductionTester};
//!
//! DeductionTester::from_str(
//!     "
//!     *...
//!     ....
//!     ....
//!     ....
//!     ",
//!     "
//!     0011
//!     0011
//!     2233
//!     2233
//!     ",
//! )
//! .deduce(&DeductionConfig::new(true, false))
//! .assert_state(Position::new(1, 1), CellState::Blocked)
//! .assert_valid();
//! ```

use std::str::FromStr as _;

use starlace_core::{Board, CellState, Position, RegionGrid};

use crate::{
    CellStatus, DeductionConfig, DeductionEngine, StatusGrid, Validation, validate::validate,
};

/// A fluent harness for exercising the deduction pipeline in tests.
///
/// The tester holds a board and its region grid, runs deduction on request,
/// and offers chained assertions over the resulting cell states, statuses,
/// and validation report. All assertion methods panic with detailed messages
/// on failure, using `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct DeductionTester {
    regions: RegionGrid,
    board: Board,
    statuses: StatusGrid,
}

impl DeductionTester {
    /// Creates a tester from a board and its region grid.
    ///
    /// # Panics
    ///
    /// Panics if the board and region grid sizes differ.
    #[track_caller]
    pub fn new(board: Board, regions: RegionGrid) -> Self {
        let engine = DeductionEngine::new(DeductionConfig::default());
        let statuses = engine.statuses(&board, &regions).unwrap();
        Self {
            regions,
            board,
            statuses,
        }
    }

    /// Creates a tester from board and region-grid diagrams.
    ///
    /// The formats match [`Board::from_str`] and [`RegionGrid::from_str`].
    ///
    /// # Panics
    ///
    /// Panics if either diagram fails to parse or the sizes differ.
    #[track_caller]
    pub fn from_str(board: &str, regions: &str) -> Self {
        let board = Board::from_str(board).unwrap();
        let regions = RegionGrid::from_str(regions).unwrap();
        Self::new(board, regions)
    }

    /// Runs deduction to a fixpoint (or the configured cap) and keeps the
    /// resulting board and statuses for later assertions.
    ///
    /// # Panics
    ///
    /// Panics if the engine reports an error.
    #[track_caller]
    pub fn deduce(mut self, config: &DeductionConfig) -> Self {
        let engine = DeductionEngine::new(*config);
        let deduction = engine.run(&self.board, &self.regions).unwrap();
        self.board = deduction.board;
        self.statuses = deduction.statuses;
        self
    }

    /// Returns the current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Asserts that the cell at `pos` holds `expected`.
    #[track_caller]
    pub fn assert_state(self, pos: Position, expected: CellState) -> Self {
        let actual = self.board[pos];
        assert_eq!(
            actual, expected,
            "expected {expected:?} at {pos}, found {actual:?}\n{}",
            self.board
        );
        self
    }

    /// Asserts that the status at `pos` is `expected`.
    #[track_caller]
    pub fn assert_status(self, pos: Position, expected: CellStatus) -> Self {
        let actual = self.statuses[pos];
        assert_eq!(
            actual, expected,
            "expected status {expected:?} at {pos}, found {actual:?}\n{}",
            self.board
        );
        self
    }

    /// Asserts that the current board has no rule violation.
    #[track_caller]
    pub fn assert_valid(self) -> Self {
        let report = self.validate();
        assert!(
            report.is_valid(),
            "expected a valid board, found violation: {}\n{}",
            report.violation().map_or_else(String::new, |v| v.to_string()),
            self.board
        );
        self
    }

    /// Asserts that the current board has a rule violation.
    #[track_caller]
    pub fn assert_invalid(self) -> Self {
        let report = self.validate();
        assert!(
            !report.is_valid(),
            "expected an invalid board\n{}",
            self.board
        );
        self
    }

    /// Asserts the completion state of the current board.
    #[track_caller]
    pub fn assert_complete(self, expected: bool) -> Self {
        let report = self.validate();
        assert_eq!(
            report.is_complete(),
            expected,
            "expected is_complete == {expected}\n{}",
            self.board
        );
        self
    }

    /// Asserts that another deduction run with `config` changes nothing.
    #[track_caller]
    pub fn assert_fixpoint(self, config: &DeductionConfig) -> Self {
        let engine = DeductionEngine::new(*config);
        let deduction = engine.run(&self.board, &self.regions).unwrap();
        assert_eq!(
            deduction.board, self.board,
            "expected the board to be a fixpoint under {config:?}"
        );
        self
    }

    fn validate(&self) -> Validation {
        validate(&self.board, &self.regions).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_REGIONS: &str = "
        0011
        0011
        2233
        2233
    ";

    #[test]
    fn test_fresh_tester_reports_initial_statuses() {
        let tester = DeductionTester::from_str(
            "
            *...
            ....
            ....
            ....
            ",
            QUAD_REGIONS,
        );
        let _ = tester
            .assert_state(Position::new(0, 0), CellState::Star)
            .assert_status(Position::new(1, 1), CellStatus::Filled);
    }

    #[test]
    #[should_panic(expected = "expected Star at (2, 2)")]
    fn test_assert_state_panics_on_mismatch() {
        let _ = DeductionTester::from_str(
            "
            ....
            ....
            ....
            ....
            ",
            QUAD_REGIONS,
        )
        .assert_state(Position::new(2, 2), CellState::Star);
    }

    #[test]
    fn test_deduce_then_fixpoint() {
        let config = DeductionConfig::new(true, false);
        let _ = DeductionTester::from_str(
            "
            *...
            ....
            ....
            ....
            ",
            QUAD_REGIONS,
        )
        .deduce(&config)
        .assert_fixpoint(&config);
    }

    #[test]
    #[should_panic(expected = "expected an invalid board")]
    fn test_assert_invalid_panics_on_valid_board() {
        let _ = DeductionTester::from_str(
            "
            ....
            ....
            ....
            ....
            ",
            QUAD_REGIONS,
        )
        .assert_invalid();
    }
}
