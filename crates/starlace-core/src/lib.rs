//! Core data structures for the starlace puzzle engine.
//!
//! This crate provides the fundamental value types shared by the solver and
//! game crates: the board of cell states, the immutable region partition,
//! and the coordinate type that indexes both.
//!
//! # Overview
//!
//! - [`cell`]: [`CellState`] and the three-state toggle cycle
//! - [`position`]: [`Position`] board coordinates
//! - [`board`]: the mutable [`Board`] grid and its ASCII fixture format
//! - [`region`]: the validated [`RegionGrid`] partition and the
//!   deterministic default partition generator
//!
//! Everything here is a plain value type: boards and region grids are owned,
//! cheaply cloned, and passed explicitly through every operation, so the
//! engine built on top stays a pure function of its inputs.
//!
//! # Examples
//!
//! ```
//! use starlace_core::{Board, CellState, Position, RegionGrid, ToggleOrder};
//!
//! let regions = RegionGrid::default_partition(4);
//! let board = Board::empty(regions.size());
//!
//! // Toggling is pure: the original board is untouched.
//! let next = board.toggled(Position::new(1, 2), ToggleOrder::StarFirst)?;
//! assert_eq!(board[Position::new(1, 2)], CellState::Empty);
//! assert_eq!(next[Position::new(1, 2)], CellState::Star);
//! # Ok::<(), starlace_core::CoordinateError>(())
//! ```

pub mod board;
pub mod cell;
pub mod position;
pub mod region;

pub use self::{
    board::{Board, CoordinateError, ParseBoardError},
    cell::{CellState, ToggleOrder},
    position::Position,
    region::{ParseRegionGridError, RegionGrid, RegionGridError},
};
