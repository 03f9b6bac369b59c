use derive_more::{Display, Error};

/// Errors produced by solver operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SolverError {
    /// A board and a region grid of different sizes were paired.
    #[display("board is {board}×{board} but the region grid is {regions}×{regions}")]
    SizeMismatch {
        /// Size of the board.
        board: u8,
        /// Size of the region grid.
        regions: u8,
    },
}
