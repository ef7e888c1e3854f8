//! Engine configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::MAX_STRATEGIES;
use crate::settlement::MAX_UNCERTAINTY_BAND;

/// How best-response ties are handled by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Keep every tied cell, tag it degenerate and name the lowest index as tie-break
    #[default]
    LowestIndex,
    /// Fail with `DegenerateGame` as soon as a tie is found
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Largest strategy set accepted per player (hard cap `MAX_STRATEGIES`)
    pub max_strategies: usize,
    /// Largest support size tried during support enumeration
    pub max_support: usize,
    /// Absolute tolerance for payoff comparisons and probability checks
    pub tolerance: f64,
    pub tie_policy: TiePolicy,
    /// Emit a uniform profile, tagged degenerate, when a 2×2 search finds nothing
    pub uniform_fallback: bool,
    /// Search mixed equilibria even when pure ones exist
    pub include_mixed: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_strategies: MAX_STRATEGIES,
            max_support: 4,
            tolerance: 1e-9,
            tie_policy: TiePolicy::LowestIndex,
            uniform_fallback: false,
            include_mixed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValuationConfig {
    /// Uncertainty band applied when a single equilibrium is under consideration
    pub base_band: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        ValuationConfig { base_band: 0.10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub solver: SolverConfig,
    pub valuation: ValuationConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        let solver = &self.solver;
        if solver.max_strategies == 0 || solver.max_strategies > MAX_STRATEGIES {
            return Err(EngineError::validation(format!(
                "solver.max_strategies must be in 1..={MAX_STRATEGIES}, got {}",
                solver.max_strategies
            )));
        }
        if solver.max_support < 2 || solver.max_support > solver.max_strategies.max(2) {
            return Err(EngineError::validation(format!(
                "solver.max_support must be in 2..={}, got {}",
                solver.max_strategies.max(2),
                solver.max_support
            )));
        }
        if !(solver.tolerance > 0.0 && solver.tolerance < 1e-3) {
            return Err(EngineError::validation(format!(
                "solver.tolerance must be in (0, 1e-3), got {}",
                solver.tolerance
            )));
        }
        let band = self.valuation.base_band;
        if !(0.0..=MAX_UNCERTAINTY_BAND).contains(&band) {
            return Err(EngineError::validation(format!(
                "valuation.base_band must be in [0, {MAX_UNCERTAINTY_BAND}], got {band}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.solver.max_strategies, 6);
        assert_eq!(config.solver.max_support, 4);
        assert_eq!(config.solver.tie_policy, TiePolicy::LowestIndex);
        assert!((config.valuation.base_band - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_strategy_cap_enforced() {
        let mut config = EngineConfig::default();
        config.solver.max_strategies = 7;
        assert!(matches!(config.validate(), Err(EngineError::Validation(_))));
    }

    #[test]
    fn test_band_out_of_range_rejected() {
        let mut config = EngineConfig::default();
        config.valuation.base_band = 0.75;
        assert!(config.validate().is_err());
        config.valuation.base_band = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"solver": {"tie_policy": "reject"}}"#).unwrap();
        assert_eq!(config.solver.tie_policy, TiePolicy::Reject);
        assert_eq!(config.solver.max_support, 4);
        assert!(config.validate().is_ok());
    }
}
