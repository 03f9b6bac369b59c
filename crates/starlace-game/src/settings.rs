//! Session settings.

use starlace_core::ToggleOrder;
use starlace_solver::{DEFAULT_MAX_PASSES, DeductionConfig};

/// Interaction settings applied on every game action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Which mark a toggle reaches first from an empty cell.
    pub toggle_order: ToggleOrder,
    /// Automatically block cells whose groups already have their star.
    pub auto_block: bool,
    /// Automatically star the last empty cell of starless groups.
    ///
    /// This commits moves on the player's behalf, so it is off by default.
    pub auto_star: bool,
    /// Pass cap forwarded to the deduction engine.
    pub max_passes: usize,
}

impl Settings {
    /// Returns the deduction config these settings describe.
    #[must_use]
    pub const fn deduction_config(&self) -> DeductionConfig {
        DeductionConfig {
            auto_block: self.auto_block,
            auto_star: self.auto_star,
            max_passes: self.max_passes,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toggle_order: ToggleOrder::StarFirst,
            auto_block: true,
            auto_star: false,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_assist_without_committing() {
        let settings = Settings::default();
        assert!(settings.auto_block);
        assert!(!settings.auto_star);
        assert_eq!(settings.max_passes, DEFAULT_MAX_PASSES);
        assert!(settings.toggle_order.is_star_first());
    }

    #[test]
    fn test_deduction_config_mirrors_the_settings() {
        let settings = Settings {
            auto_star: true,
            max_passes: 5,
            ..Settings::default()
        };
        let config = settings.deduction_config();
        assert!(config.auto_block);
        assert!(config.auto_star);
        assert_eq!(config.max_passes, 5);
    }
}
