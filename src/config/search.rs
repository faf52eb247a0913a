//! Parameter-search configuration

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Grid and stop criterion for the MACD parameter search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Fast-period candidates, ascending
    pub fast_periods: Vec<usize>,
    /// Slow-period candidates, ascending
    pub slow_periods: Vec<usize>,
    /// Signal-period candidates, ascending
    pub signal_periods: Vec<usize>,
    /// Success rate at which the search stops early
    pub success_threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fast_periods: (5..=20).step_by(3).collect(),
            slow_periods: (20..=40).step_by(4).collect(),
            signal_periods: (5..=15).step_by(2).collect(),
            success_threshold: 0.85,
        }
    }
}

impl SearchConfig {
    /// Size of the full Cartesian product, invalid triples included
    pub fn combinations(&self) -> usize {
        self.fast_periods.len() * self.slow_periods.len() * self.signal_periods.len()
    }

    /// Check the grid preconditions the indicator engine relies on
    pub fn validate(&self) -> crate::Result<()> {
        for (name, grid) in [
            ("fast_periods", &self.fast_periods),
            ("slow_periods", &self.slow_periods),
            ("signal_periods", &self.signal_periods),
        ] {
            if grid.is_empty() {
                bail!("{} must not be empty", name);
            }
            if grid[0] < 1 {
                bail!("{} entries must be at least 1", name);
            }
            if grid.windows(2).any(|w| w[1] <= w[0]) {
                bail!("{} must be strictly ascending", name);
            }
        }
        if !(self.success_threshold > 0.0 && self.success_threshold <= 1.0) {
            bail!(
                "success_threshold must be in (0, 1], got {}",
                self.success_threshold
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grids() {
        let config = SearchConfig::default();
        assert_eq!(config.fast_periods, vec![5, 8, 11, 14, 17, 20]);
        assert_eq!(config.slow_periods, vec![20, 24, 28, 32, 36, 40]);
        assert_eq!(config.signal_periods, vec![5, 7, 9, 11, 13, 15]);
        assert_eq!(config.success_threshold, 0.85);
        assert_eq!(config.combinations(), 6 * 6 * 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_grids() {
        let mut config = SearchConfig::default();
        config.fast_periods = vec![];
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.slow_periods = vec![20, 20, 24];
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.signal_periods = vec![0, 5];
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.success_threshold = 0.0;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.success_threshold = 1.5;
        assert!(config.validate().is_err());
    }
}
