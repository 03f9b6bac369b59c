//! The deduction engine.
//!
//! Every group must end up with exactly one star, so the current occupancy of
//! the groups containing a cell determines whether that cell is forced. The
//! engine classifies every cell, optionally applies the forced moves, and
//! iterates — a new star changes the adjacency groups and can force further
//! cells — until a pass changes nothing or the pass cap is reached.

use starlace_core::{Board, CellState, Position, RegionGrid};

use crate::{
    CellStatus, SolverError, StatusGrid,
    group::{Group, build_groups},
};

/// Default upper bound on deduction passes.
pub const DEFAULT_MAX_PASSES: usize = 20;

/// Tunables for a deduction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionConfig {
    /// Turn empty [`Filled`](CellStatus::Filled) cells into `Blocked`.
    pub auto_block: bool,
    /// Turn empty [`OneLeft`](CellStatus::OneLeft) cells into `Star`.
    pub auto_star: bool,
    /// Upper bound on deduction passes. Reaching it is a normal terminal
    /// state, not a failure.
    pub max_passes: usize,
}

impl DeductionConfig {
    /// Creates a config with the given auto-apply flags and the default pass
    /// cap.
    #[must_use]
    pub const fn new(auto_block: bool, auto_star: bool) -> Self {
        Self {
            auto_block,
            auto_star,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Replaces the pass cap.
    #[must_use]
    pub const fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

impl Default for DeductionConfig {
    /// Analysis-only defaults: statuses are computed but nothing is applied.
    fn default() -> Self {
        Self::new(false, false)
    }
}

/// The result of running the engine on a board.
#[derive(Debug, Clone)]
pub struct Deduction {
    /// The board after any auto-applied moves.
    pub board: Board,
    /// Statuses describing [`board`](Self::board).
    pub statuses: StatusGrid,
    /// Number of passes executed.
    pub passes: usize,
    /// `true` when a full pass confirmed no further change; `false` when the
    /// pass cap cut the loop short.
    pub fixpoint: bool,
}

/// Classifies every cell from the occupancy of the groups containing it.
///
/// For each cell the engine tracks the maximum star count over its groups and
/// the minimum free (empty) count over its *starless* groups; `space` starts
/// at the board size, the conventional stand-in for "no starless group
/// constrains this cell yet".
#[must_use]
pub fn compute_statuses(board: &Board, groups: &[Group]) -> StatusGrid {
    let size = board.size();
    let cell_count = usize::from(size) * usize::from(size);
    let mut max_stars = vec![0usize; cell_count];
    let mut space = vec![usize::from(size); cell_count];

    for group in groups {
        let stars = group.star_count(board);
        let free = group.free_count(board);
        for &pos in group.cells() {
            let i = offset(pos, size);
            max_stars[i] = max_stars[i].max(stars);
            if stars == 0 {
                space[i] = space[i].min(free);
            }
        }
    }

    let mut statuses = StatusGrid::new(size);
    for pos in board.positions() {
        let i = offset(pos, size);
        // Rule order is load-bearing: each later rule overwrites the earlier
        // result, so a dead group (Underfull) wins over a satisfied one
        // (Filled).
        let mut status = CellStatus::Empty;
        if max_stars[i] == 1 {
            status = CellStatus::Filled;
        }
        if max_stars[i] > 1 {
            status = CellStatus::Overfull;
        }
        if space[i] == 0 {
            status = CellStatus::Underfull;
        }
        if space[i] == 1 && board[pos].is_empty() && max_stars[i] == 0 {
            status = CellStatus::OneLeft;
        }
        statuses[pos] = status;
    }
    statuses
}

/// Applies the forced moves enabled by `config` to `board`.
///
/// Only `Empty` cells change: `Filled` cells become `Blocked` when
/// `auto_block` is set, `OneLeft` cells become `Star` when `auto_star` is
/// set. Returns `true` if any cell changed.
pub fn apply_statuses(board: &mut Board, statuses: &StatusGrid, config: &DeductionConfig) -> bool {
    let mut changed = false;
    for pos in board.positions() {
        if !board[pos].is_empty() {
            continue;
        }
        match statuses[pos] {
            CellStatus::Filled if config.auto_block => {
                board[pos] = CellState::Blocked;
                changed = true;
            }
            CellStatus::OneLeft if config.auto_star => {
                board[pos] = CellState::Star;
                changed = true;
            }
            _ => {}
        }
    }
    changed
}

/// Runs {rebuild groups → classify → apply} passes to a fixpoint.
///
/// The engine applies the first deduction pass, and keeps going as long as a
/// pass changes the board, up to the configured pass cap.
///
/// # Examples
///
/// ```
/// use starlace_core::{Board, Position, RegionGrid, ToggleOrder};
/// use starlace_solver::{DeductionConfig, DeductionEngine};
///
/// let regions = RegionGrid::default_partition(4);
/// let board = Board::empty(4).toggled(Position::new(0, 0), ToggleOrder::StarFirst)?;
///
/// let engine = DeductionEngine::new(DeductionConfig::new(true, false));
/// let deduction = engine.run(&board, &regions)?;
/// assert!(deduction.fixpoint);
/// assert!(deduction.board[Position::new(1, 1)].is_blocked());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionEngine {
    config: DeductionConfig,
}

impl DeductionEngine {
    /// Creates an engine with the given config.
    #[must_use]
    pub const fn new(config: DeductionConfig) -> Self {
        Self { config }
    }

    /// Returns the engine's config.
    #[must_use]
    pub const fn config(&self) -> &DeductionConfig {
        &self.config
    }

    /// Classifies the board without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SizeMismatch`] when `board` and `regions`
    /// disagree on the board size.
    pub fn statuses(
        &self,
        board: &Board,
        regions: &RegionGrid,
    ) -> Result<StatusGrid, SolverError> {
        let groups = build_groups(board, regions)?;
        Ok(compute_statuses(board, &groups))
    }

    /// Runs one {rebuild groups → classify → apply} pass in place.
    ///
    /// Returns `true` if the pass changed the board.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SizeMismatch`] when `board` and `regions`
    /// disagree on the board size.
    pub fn step(&self, board: &mut Board, regions: &RegionGrid) -> Result<bool, SolverError> {
        let groups = build_groups(board, regions)?;
        let statuses = compute_statuses(board, &groups);
        Ok(apply_statuses(board, &statuses, &self.config))
    }

    /// Runs passes until one changes nothing or the pass cap is reached.
    ///
    /// The returned [`Deduction`] always carries statuses computed from the
    /// board it returns: when the cap cuts the loop short the statuses are
    /// rebuilt once more, so callers never see highlighting one pass behind.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SizeMismatch`] when `board` and `regions`
    /// disagree on the board size.
    pub fn run(&self, board: &Board, regions: &RegionGrid) -> Result<Deduction, SolverError> {
        let mut board = board.clone();
        let mut passes = 0;
        while passes < self.config.max_passes {
            let groups = build_groups(&board, regions)?;
            let statuses = compute_statuses(&board, &groups);
            passes += 1;
            if !apply_statuses(&mut board, &statuses, &self.config) {
                return Ok(Deduction {
                    board,
                    statuses,
                    passes,
                    fixpoint: true,
                });
            }
        }
        let groups = build_groups(&board, regions)?;
        let statuses = compute_statuses(&board, &groups);
        Ok(Deduction {
            board,
            statuses,
            passes,
            fixpoint: false,
        })
    }
}

fn offset(pos: Position, size: u8) -> usize {
    usize::from(pos.y()) * usize::from(size) + usize::from(pos.x())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use proptest::prelude::*;

    use super::*;
    use crate::{testing::DeductionTester, validate::validate};

    fn statuses_of(board_str: &str, regions_str: &str) -> (Board, StatusGrid) {
        let board = Board::from_str(board_str).unwrap();
        let regions = RegionGrid::from_str(regions_str).unwrap();
        let engine = DeductionEngine::new(DeductionConfig::default());
        let statuses = engine.statuses(&board, &regions).unwrap();
        (board, statuses)
    }

    const QUAD_REGIONS: &str = "
        0011
        0011
        2233
        2233
    ";

    const ROW_REGIONS: &str = "
        0000
        1111
        2222
        3333
    ";

    #[test]
    fn test_star_fills_its_row_column_and_region() {
        let (_, statuses) = statuses_of(
            "
            *...
            ....
            ....
            ....
            ",
            QUAD_REGIONS,
        );
        // Row 0, column 0, region 0, and the neighborhood all hold the star.
        assert_eq!(statuses[Position::new(3, 0)], CellStatus::Filled);
        assert_eq!(statuses[Position::new(0, 3)], CellStatus::Filled);
        assert_eq!(statuses[Position::new(1, 1)], CellStatus::Filled);
        // Untouched cells stay unforced.
        assert_eq!(statuses[Position::new(2, 2)], CellStatus::Empty);
    }

    #[test]
    fn test_adjacency_alone_fills_diagonal_neighbors() {
        // With one region per row, the diagonal neighbor (2, 2) shares no
        // row, column, or region with the star; only the neighborhood group
        // forces it.
        let (_, statuses) = statuses_of(
            "
            ....
            .*..
            ....
            ....
            ",
            ROW_REGIONS,
        );
        assert_eq!(statuses[Position::new(2, 2)], CellStatus::Filled);
        assert_eq!(statuses[Position::new(0, 0)], CellStatus::Filled);
        assert_eq!(statuses[Position::new(3, 0)], CellStatus::Empty);
    }

    #[test]
    fn test_two_stars_in_a_row_are_overfull() {
        let (_, statuses) = statuses_of(
            "
            *..*
            ....
            ....
            ....
            ",
            QUAD_REGIONS,
        );
        for x in 0..4 {
            assert_eq!(statuses[Position::new(x, 0)], CellStatus::Overfull);
        }
        assert_eq!(statuses[Position::new(1, 1)], CellStatus::Filled);
    }

    #[test]
    fn test_dead_region_is_underfull() {
        let (_, statuses) = statuses_of(
            "
            xx..
            xx..
            ....
            ....
            ",
            QUAD_REGIONS,
        );
        // Region 0 has no star and no empty cell left.
        assert_eq!(statuses[Position::new(0, 0)], CellStatus::Underfull);
        assert_eq!(statuses[Position::new(1, 1)], CellStatus::Underfull);
    }

    #[test]
    fn test_underfull_overwrites_filled() {
        // (0, 0) sits in a starred row *and* a dead region; the dead region
        // wins.
        let (_, statuses) = statuses_of(
            "
            xx.*
            xx..
            ....
            ....
            ",
            QUAD_REGIONS,
        );
        assert_eq!(statuses[Position::new(0, 0)], CellStatus::Underfull);
        assert_eq!(statuses[Position::new(1, 0)], CellStatus::Underfull);
        // The star's own row-mates outside the dead region read Filled.
        assert_eq!(statuses[Position::new(2, 0)], CellStatus::Filled);
    }

    #[test]
    fn test_last_free_cell_of_a_starless_group_is_one_left() {
        let (_, statuses) = statuses_of(
            "
            xx..
            x...
            ....
            ....
            ",
            QUAD_REGIONS,
        );
        assert_eq!(statuses[Position::new(1, 1)], CellStatus::OneLeft);
    }

    #[test]
    fn test_one_left_requires_a_starless_cell() {
        // (1, 1) is the last free cell of region 0, but its row already has a
        // star, so Filled wins over OneLeft.
        let (_, statuses) = statuses_of(
            "
            xx..
            x..*
            ....
            ....
            ",
            QUAD_REGIONS,
        );
        assert_eq!(statuses[Position::new(1, 1)], CellStatus::Filled);
    }

    #[test]
    fn test_auto_block_propagates_from_a_single_star() {
        DeductionTester::from_str(
            "
            *...
            ....
            ....
            ....
            ",
            QUAD_REGIONS,
        )
        .deduce(&DeductionConfig::new(true, false))
        // Region 0 and the neighborhood.
        .assert_state(Position::new(1, 0), CellState::Blocked)
        .assert_state(Position::new(0, 1), CellState::Blocked)
        .assert_state(Position::new(1, 1), CellState::Blocked)
        // Rest of row 0.
        .assert_state(Position::new(2, 0), CellState::Blocked)
        .assert_state(Position::new(3, 0), CellState::Blocked)
        // Rest of column 0.
        .assert_state(Position::new(0, 2), CellState::Blocked)
        .assert_state(Position::new(0, 3), CellState::Blocked)
        // Unrelated cells stay empty.
        .assert_state(Position::new(2, 2), CellState::Empty)
        .assert_state(Position::new(3, 1), CellState::Empty)
        .assert_valid()
        .assert_complete(false);
    }

    #[test]
    fn test_flags_off_leaves_the_board_untouched() {
        let board = Board::from_str(
            "
            *...
            ....
            ....
            ....
            ",
        )
        .unwrap();
        let regions = RegionGrid::from_str(QUAD_REGIONS).unwrap();
        let engine = DeductionEngine::new(DeductionConfig::default());
        let deduction = engine.run(&board, &regions).unwrap();
        assert_eq!(deduction.board, board);
        assert!(deduction.fixpoint);
        assert_eq!(deduction.passes, 1);
        assert_eq!(deduction.statuses[Position::new(1, 1)], CellStatus::Filled);
    }

    #[test]
    fn test_auto_star_cascades_to_further_forced_moves() {
        // Region 0 is down to one free cell. Starring it blocks out most of
        // the board on the next pass, which leaves four groups with a single
        // free cell each; all four stars land in the same pass. Two of them
        // touch, so the cascade drives the board into a contradiction that
        // the statuses and the validator both report.
        let board = Board::from_str(
            "
            xx..
            x...
            ....
            ....
            ",
        )
        .unwrap();
        let regions = RegionGrid::from_str(QUAD_REGIONS).unwrap();
        let engine = DeductionEngine::new(DeductionConfig::new(true, true));
        let deduction = engine.run(&board, &regions).unwrap();

        assert!(deduction.fixpoint);
        assert_eq!(deduction.passes, 4);
        let stars: Vec<_> = deduction.board.stars().collect();
        assert_eq!(
            stars,
            vec![
                Position::new(3, 0),
                Position::new(1, 1),
                Position::new(3, 2),
                Position::new(0, 3),
                Position::new(2, 3),
            ]
        );
        // The one remaining empty cell sits in doubled groups and is never
        // auto-applied.
        assert_eq!(deduction.board.count(CellState::Empty), 1);
        assert_eq!(deduction.statuses[Position::new(3, 3)], CellStatus::Overfull);

        let report = validate(&deduction.board, &regions).unwrap();
        assert!(!report.is_valid());
        assert!(matches!(
            report.violation(),
            Some(crate::Violation::AdjacentStars { .. })
        ));
    }

    #[test]
    fn test_pass_cap_is_a_normal_terminal_state() {
        let board = Board::from_str(
            "
            xx..
            x...
            ....
            ....
            ",
        )
        .unwrap();
        let regions = RegionGrid::from_str(QUAD_REGIONS).unwrap();
        let engine =
            DeductionEngine::new(DeductionConfig::new(true, true).with_max_passes(2));
        let deduction = engine.run(&board, &regions).unwrap();

        assert!(!deduction.fixpoint);
        assert_eq!(deduction.passes, 2);
        // The cascade was cut short: region 1 has not been starred yet.
        assert!(deduction.board[Position::new(3, 0)].is_empty());
        // Statuses still describe the returned board, not the previous pass.
        assert_eq!(deduction.statuses[Position::new(3, 0)], CellStatus::OneLeft);
    }

    #[test]
    fn test_zero_pass_cap_only_reports() {
        let board = Board::from_str(
            "
            xx..
            x...
            ....
            ....
            ",
        )
        .unwrap();
        let regions = RegionGrid::from_str(QUAD_REGIONS).unwrap();
        let engine =
            DeductionEngine::new(DeductionConfig::new(true, true).with_max_passes(0));
        let deduction = engine.run(&board, &regions).unwrap();
        assert_eq!(deduction.passes, 0);
        assert!(!deduction.fixpoint);
        assert_eq!(deduction.board, board);
        assert_eq!(deduction.statuses[Position::new(1, 1)], CellStatus::OneLeft);
    }

    #[test]
    fn test_step_runs_a_single_pass() {
        let mut board = Board::from_str(
            "
            *...
            ....
            ....
            ....
            ",
        )
        .unwrap();
        let regions = RegionGrid::from_str(QUAD_REGIONS).unwrap();
        let engine = DeductionEngine::new(DeductionConfig::new(true, false));
        assert!(engine.step(&mut board, &regions).unwrap());
        assert!(board[Position::new(1, 1)].is_blocked());
        // The first pass already found everything this board has to give.
        assert!(!engine.step(&mut board, &regions).unwrap());
    }

    fn sparse_board(size: u8, stars: &[(u8, u8)], blocks: &[(u8, u8)]) -> Board {
        let mut board = Board::empty(size);
        for &(x, y) in blocks {
            if x < size && y < size {
                board[Position::new(x, y)] = CellState::Blocked;
            }
        }
        for &(x, y) in stars {
            if x < size && y < size {
                board[Position::new(x, y)] = CellState::Star;
            }
        }
        board
    }

    proptest! {
        #[test]
        fn deduction_reaches_an_idempotent_fixpoint(
            size in 2u8..=8,
            stars in prop::collection::vec((0u8..8, 0u8..8), 0..4),
            blocks in prop::collection::vec((0u8..8, 0u8..8), 0..10),
            auto_block: bool,
            auto_star: bool,
        ) {
            let regions = RegionGrid::default_partition(size);
            let board = sparse_board(size, &stars, &blocks);
            // A cap of size² + 1 always leaves room for the confirming pass.
            let cap = usize::from(size) * usize::from(size) + 1;
            let engine = DeductionEngine::new(
                DeductionConfig::new(auto_block, auto_star).with_max_passes(cap),
            );

            let first = engine.run(&board, &regions).unwrap();
            prop_assert!(first.fixpoint);

            let second = engine.run(&first.board, &regions).unwrap();
            prop_assert_eq!(&second.board, &first.board);
            prop_assert_eq!(second.passes, 1);
        }

        #[test]
        fn deduction_never_touches_non_empty_cells(
            size in 2u8..=8,
            stars in prop::collection::vec((0u8..8, 0u8..8), 0..4),
            blocks in prop::collection::vec((0u8..8, 0u8..8), 0..10),
        ) {
            let regions = RegionGrid::default_partition(size);
            let board = sparse_board(size, &stars, &blocks);
            let engine = DeductionEngine::new(DeductionConfig::new(true, true));
            let deduction = engine.run(&board, &regions).unwrap();
            for pos in board.positions() {
                if !board[pos].is_empty() {
                    prop_assert_eq!(deduction.board[pos], board[pos]);
                }
            }
        }

        #[test]
        fn one_left_cells_are_sound_to_star(
            size in 2u8..=8,
            stars in prop::collection::vec((0u8..8, 0u8..8), 0..3),
            blocks in prop::collection::vec((0u8..8, 0u8..8), 0..12),
        ) {
            let regions = RegionGrid::default_partition(size);
            let board = sparse_board(size, &stars, &blocks);
            prop_assume!(validate(&board, &regions).unwrap().is_valid());

            let engine = DeductionEngine::new(DeductionConfig::default());
            let statuses = engine.statuses(&board, &regions).unwrap();
            for pos in statuses.positions_with(CellStatus::OneLeft) {
                let mut starred = board.clone();
                starred[pos] = CellState::Star;
                prop_assert!(validate(&starred, &regions).unwrap().is_valid());
            }
        }
    }
}
