//! Constraint deduction and validation for the starlace puzzle engine.
//!
//! Every rule of the puzzle — one star per row, per column, per region, and
//! no two stars touching — is expressed as a *group*: a set of cells that
//! must contain exactly one star. This crate derives the groups from a board
//! and its region partition, classifies every cell by the occupancy of the
//! groups containing it, optionally auto-applies the forced moves to a
//! fixpoint, and validates boards for rule violations and completion.
//!
//! # Overview
//!
//! - [`group`]: the four group families and [`build_groups`]
//! - [`status`]: the derived [`CellStatus`] classification
//! - [`deduce`]: [`DeductionEngine`] and its fixpoint loop
//! - [`validate`]: rule violations and completion
//! - [`testing`]: a fluent harness for scenario tests
//!
//! # Examples
//!
//! ```
//! use starlace_core::{Board, Position, RegionGrid, ToggleOrder};
//! use starlace_solver::{DeductionConfig, DeductionEngine, validate};
//!
//! let regions = RegionGrid::default_partition(4);
//! let board = Board::empty(4).toggled(Position::new(0, 0), ToggleOrder::StarFirst)?;
//!
//! // Deduce with auto-blocking: the star's row, column, region, and
//! // neighborhood are all walled off.
//! let engine = DeductionEngine::new(DeductionConfig::new(true, false));
//! let deduction = engine.run(&board, &regions)?;
//! assert!(deduction.fixpoint);
//!
//! let report = validate(&deduction.board, &regions)?;
//! assert!(report.is_valid());
//! assert!(!report.is_complete());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod deduce;
mod error;
pub mod group;
pub mod status;
pub mod testing;
pub mod validate;

pub use self::{
    deduce::{
        DEFAULT_MAX_PASSES, Deduction, DeductionConfig, DeductionEngine, apply_statuses,
        compute_statuses,
    },
    error::SolverError,
    group::{Group, GroupKind, build_groups, neighborhood},
    status::{CellStatus, StatusGrid},
    validate::{Validation, Violation, validate},
};
