//! Settlement valuation from a recommended equilibrium
//!
//! The point value is the target player's expected payoff discounted for
//! risk. The band around it widens with the number of candidate equilibria,
//! since more candidates mean more strategic ambiguity.

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::config::ValuationConfig;
use crate::error::{EngineError, Result};
use crate::model::{Equilibrium, Seat};
use crate::recommend::Recommendation;
use crate::trail::{ExplanationTrail, StageRecorder};

pub const STAGE: &str = "settlement_valuator";

/// Band growth per additional candidate equilibrium
pub const BAND_STEP_PER_CANDIDATE: f64 = 0.05;

/// Upper bound on the uncertainty band
pub const MAX_UNCERTAINTY_BAND: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementEstimate {
    pub point_value: f64,
    pub low: f64,
    pub high: f64,
    pub confidence: f64,
    pub uncertainty_band: f64,
    pub target_player: Seat,
    pub basis_equilibrium: Equilibrium,
}

/// `base_band + 0.05 · (candidates - 1)`, capped at `MAX_UNCERTAINTY_BAND`
pub fn uncertainty_band(base_band: f64, candidates: usize) -> f64 {
    let extra = BAND_STEP_PER_CANDIDATE * candidates.saturating_sub(1) as f64;
    (base_band + extra).min(MAX_UNCERTAINTY_BAND)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementValuator {
    config: ValuationConfig,
}

impl SettlementValuator {
    pub fn new(config: ValuationConfig) -> Self {
        SettlementValuator { config }
    }

    /// Value the recommendation for its objective's player.
    ///
    /// `risk_discount` must be in [0, 1]. Appends one `settlement_valuator`
    /// entry to `trail`.
    pub fn valuate(
        &self,
        recommendation: &Recommendation,
        risk_discount: f64,
        trail: &mut ExplanationTrail,
    ) -> Result<SettlementEstimate> {
        let stage = StageRecorder::begin(
            STAGE,
            json!({
                "risk_discount": risk_discount,
                "base_band": self.config.base_band,
                "target_player": recommendation.target_player(),
                "expected_payoff": recommendation.equilibrium.expected_payoff(recommendation.target_player()),
                "candidates": recommendation.candidate_count(),
            }),
        );
        let result = self.estimate(recommendation, risk_discount);
        stage.finish_with(trail, &result);
        result
    }

    fn estimate(&self, recommendation: &Recommendation, risk_discount: f64) -> Result<SettlementEstimate> {
        if !(0.0..=1.0).contains(&risk_discount) {
            return Err(EngineError::validation(format!(
                "risk_discount must be in [0, 1], got {risk_discount}"
            )));
        }
        let base_band = self.config.base_band;
        if !(0.0..=MAX_UNCERTAINTY_BAND).contains(&base_band) {
            return Err(EngineError::validation(format!(
                "base_band must be in [0, {MAX_UNCERTAINTY_BAND}], got {base_band}"
            )));
        }

        let target_player = recommendation.target_player();
        let point_value = recommendation.equilibrium.expected_payoff(target_player) * (1.0 - risk_discount);
        let band = uncertainty_band(base_band, recommendation.candidate_count());
        // Spread by magnitude so the ordering holds for losses too.
        let spread = point_value.abs() * band;

        info!(
            point_value,
            band,
            candidates = recommendation.candidate_count(),
            "settlement estimate computed"
        );

        Ok(SettlementEstimate {
            point_value,
            low: point_value - spread,
            high: point_value + spread,
            confidence: 1.0 / (1.0 + band),
            uncertainty_band: band,
            target_player,
            basis_equilibrium: recommendation.equilibrium.clone(),
        })
    }
}
