//! Cell states and the toggle cycle.

use std::fmt::{self, Display};

/// The contents of a single board cell.
///
/// Cells start [`Empty`](Self::Empty) and move through the three-state toggle
/// cycle on user interaction; the deduction engine may additionally turn
/// empty cells into [`Star`](Self::Star) or [`Blocked`](Self::Blocked), but
/// never the reverse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// No mark.
    #[default]
    Empty,
    /// A placed star.
    Star,
    /// A cell marked as impossible to hold a star.
    Blocked,
}

impl CellState {
    /// Returns `true` for [`CellState::Empty`].
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` for [`CellState::Star`].
    #[must_use]
    pub const fn is_star(self) -> bool {
        matches!(self, Self::Star)
    }

    /// Returns `true` for [`CellState::Blocked`].
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Returns the next state in the three-state toggle cycle.
    ///
    /// [`ToggleOrder::StarFirst`] cycles `Empty → Star → Blocked → Empty`;
    /// [`ToggleOrder::BlockedFirst`] cycles `Empty → Blocked → Star → Empty`.
    ///
    /// # Examples
    ///
    /// ```
    /// use starlace_core::{CellState, ToggleOrder};
    ///
    /// let state = CellState::Empty;
    /// assert_eq!(state.cycled(ToggleOrder::StarFirst), CellState::Star);
    /// assert_eq!(state.cycled(ToggleOrder::BlockedFirst), CellState::Blocked);
    /// ```
    #[must_use]
    pub const fn cycled(self, order: ToggleOrder) -> Self {
        match (order, self) {
            (ToggleOrder::StarFirst, Self::Empty) => Self::Star,
            (ToggleOrder::StarFirst, Self::Star) => Self::Blocked,
            (ToggleOrder::StarFirst, Self::Blocked) => Self::Empty,
            (ToggleOrder::BlockedFirst, Self::Empty) => Self::Blocked,
            (ToggleOrder::BlockedFirst, Self::Blocked) => Self::Star,
            (ToggleOrder::BlockedFirst, Self::Star) => Self::Empty,
        }
    }
}

impl Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Empty => '.',
            Self::Star => '*',
            Self::Blocked => 'x',
        };
        write!(f, "{c}")
    }
}

/// Which mark the toggle cycle reaches first from an empty cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum ToggleOrder {
    /// Cycle `Empty → Star → Blocked → Empty`.
    #[default]
    StarFirst,
    /// Cycle `Empty → Blocked → Star → Empty`.
    BlockedFirst,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_star_first_cycle() {
        let order = ToggleOrder::StarFirst;
        assert_eq!(CellState::Empty.cycled(order), CellState::Star);
        assert_eq!(CellState::Star.cycled(order), CellState::Blocked);
        assert_eq!(CellState::Blocked.cycled(order), CellState::Empty);
    }

    #[test]
    fn test_blocked_first_cycle() {
        let order = ToggleOrder::BlockedFirst;
        assert_eq!(CellState::Empty.cycled(order), CellState::Blocked);
        assert_eq!(CellState::Blocked.cycled(order), CellState::Star);
        assert_eq!(CellState::Star.cycled(order), CellState::Empty);
    }

    proptest! {
        #[test]
        fn cycle_returns_to_start_after_three_steps(
            state in prop::sample::select(vec![
                CellState::Empty,
                CellState::Star,
                CellState::Blocked,
            ]),
            order in prop::sample::select(vec![
                ToggleOrder::StarFirst,
                ToggleOrder::BlockedFirst,
            ]),
        ) {
            let cycled = state.cycled(order).cycled(order).cycled(order);
            prop_assert_eq!(cycled, state);
        }

        #[test]
        fn cycle_visits_every_state(
            order in prop::sample::select(vec![
                ToggleOrder::StarFirst,
                ToggleOrder::BlockedFirst,
            ]),
        ) {
            let first = CellState::Empty.cycled(order);
            let second = first.cycled(order);
            prop_assert_ne!(first, CellState::Empty);
            prop_assert_ne!(second, CellState::Empty);
            prop_assert_ne!(first, second);
        }
    }
}
