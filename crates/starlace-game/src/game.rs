//! The interactive puzzle session.

use starlace_core::{Board, CellState, CoordinateError, Position, RegionGrid};
use starlace_solver::{
    CellStatus, Deduction, DeductionEngine, SolverError, StatusGrid, Validation, validate,
};

use crate::Settings;

/// A star-battle puzzle session.
///
/// `Game` owns a board and its region partition and runs the full pipeline —
/// toggle, deduce to a fixpoint, validate — on every interaction. The latest
/// statuses and validation report are kept for the host UI to read back
/// between interactions.
///
/// The session is single-threaded and synchronous: every operation completes
/// before returning, and all state lives in this value.
///
/// # Examples
///
/// ```
/// use starlace_core::Position;
/// use starlace_game::Game;
///
/// let mut game = Game::new(4);
/// let report = game.toggle(Position::new(1, 0))?;
/// assert!(report.is_valid());
/// assert!(!report.is_complete());
/// # Ok::<(), starlace_game::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    regions: RegionGrid,
    board: Board,
    settings: Settings,
    statuses: StatusGrid,
    validation: Validation,
}

impl Game {
    /// Creates a session with the deterministic default partition for
    /// `size` and a fresh empty board.
    #[must_use]
    pub fn new(size: u8) -> Self {
        Self::with_regions(RegionGrid::default_partition(size))
    }

    /// Creates a session from a caller-supplied region partition and a fresh
    /// empty board.
    ///
    /// The partition was already validated when the [`RegionGrid`] was
    /// constructed, so this cannot fail.
    #[must_use]
    pub fn with_regions(regions: RegionGrid) -> Self {
        let board = Board::empty(regions.size());
        let settings = Settings::default();
        // A fresh board can already contain forced moves (a single-cell
        // region, for instance), so the pipeline runs once up front.
        let (deduction, validation) = evaluate(&board, &regions, &settings);
        Self {
            regions,
            board: deduction.board,
            settings,
            statuses: deduction.statuses,
            validation,
        }
    }

    /// Resumes a session from an existing board and partition.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Solver`] when the board and region grid disagree
    /// on the puzzle size.
    pub fn from_parts(
        board: Board,
        regions: RegionGrid,
        settings: Settings,
    ) -> Result<Self, GameError> {
        if board.size() != regions.size() {
            return Err(SolverError::SizeMismatch {
                board: board.size(),
                regions: regions.size(),
            }
            .into());
        }
        let (deduction, validation) = evaluate(&board, &regions, &settings);
        Ok(Self {
            regions,
            board: deduction.board,
            settings,
            statuses: deduction.statuses,
            validation,
        })
    }

    /// Discards the board and starts over on the same region partition.
    pub fn reset(&mut self) {
        self.board = Board::empty(self.regions.size());
        self.refresh();
    }

    /// Replaces both the board and the partition with a fresh puzzle of the
    /// given size.
    pub fn new_puzzle(&mut self, size: u8) {
        self.regions = RegionGrid::default_partition(size);
        self.board = Board::empty(size);
        self.refresh();
    }

    /// Toggles the cell at `pos` and runs the full pipeline.
    ///
    /// The toggle cycles the cell per the session's
    /// [`toggle_order`](Settings::toggle_order), deduction runs to a fixpoint
    /// under the session's auto flags, and the board is re-validated. Returns
    /// the new validation report.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Coordinate`] when `pos` is outside the board; the
    /// session state is left untouched in that case.
    pub fn toggle(&mut self, pos: Position) -> Result<&Validation, GameError> {
        self.board = self.board.toggled(pos, self.settings.toggle_order)?;
        self.refresh();
        Ok(&self.validation)
    }

    /// Re-runs deduction and validation without toggling anything.
    ///
    /// Useful after a settings change, or as a "hint" action in a host UI.
    pub fn deduce(&mut self) -> &StatusGrid {
        self.refresh();
        &self.statuses
    }

    /// Returns the current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the region partition.
    #[must_use]
    pub fn regions(&self) -> &RegionGrid {
        &self.regions
    }

    /// Returns the statuses computed by the most recent pipeline run.
    #[must_use]
    pub fn statuses(&self) -> &StatusGrid {
        &self.statuses
    }

    /// Returns the validation report from the most recent pipeline run.
    #[must_use]
    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    /// Returns the session settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the session settings.
    ///
    /// The new settings take effect from the next pipeline run; the board is
    /// not re-deduced retroactively.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Returns the state of the cell at `pos`, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<CellState> {
        self.board.cell(pos)
    }

    /// Returns the status of the cell at `pos`, or `None` when out of range.
    #[must_use]
    pub fn status(&self, pos: Position) -> Option<CellStatus> {
        self.statuses.status(pos)
    }

    fn refresh(&mut self) {
        let (deduction, validation) = evaluate(&self.board, &self.regions, &self.settings);
        log::debug!(
            "pipeline: {} passes (fixpoint: {}), valid: {}, complete: {}",
            deduction.passes,
            deduction.fixpoint,
            validation.is_valid(),
            validation.is_complete(),
        );
        self.board = deduction.board;
        self.statuses = deduction.statuses;
        self.validation = validation;
    }
}

/// Runs deduction and validation on a board/partition pair of equal size.
fn evaluate(board: &Board, regions: &RegionGrid, settings: &Settings) -> (Deduction, Validation) {
    let engine = DeductionEngine::new(settings.deduction_config());
    let deduction = engine
        .run(board, regions)
        .expect("game board and regions always share a size");
    let validation = validate(&deduction.board, regions)
        .expect("game board and regions always share a size");
    (deduction, validation)
}

/// Errors surfaced by [`Game`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// An interaction targeted a cell outside the board.
    #[display("{_0}")]
    Coordinate(#[from] CoordinateError),
    /// A board and region grid of different sizes were paired.
    #[display("{_0}")]
    Solver(#[from] SolverError),
}
