//! Interactive game state for the starlace puzzle engine.
//!
//! This crate ties the board model and the solver together into a session
//! consumed by a host UI: every interaction runs the full pipeline — toggle
//! the cell, deduce forced moves to a fixpoint, validate — and the latest
//! statuses and validation report stay readable between interactions.
//!
//! Rendering, persistence, and puzzle sourcing belong to the host; this
//! crate only owns the puzzle state and the rules driving it.
//!
//! # Examples
//!
//! ```
//! use starlace_core::{CellState, Position};
//! use starlace_game::Game;
//!
//! let mut game = Game::new(4);
//! game.toggle(Position::new(0, 0))?;
//!
//! // Default settings auto-block everything the star rules out.
//! assert_eq!(game.cell(Position::new(1, 1)), Some(CellState::Blocked));
//! assert!(game.validation().is_valid());
//! # Ok::<(), starlace_game::GameError>(())
//! ```

mod game;
mod settings;

pub use self::{
    game::{Game, GameError},
    settings::Settings,
};
