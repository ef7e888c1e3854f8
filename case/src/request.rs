//! JSON request and response contract

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stratagem_engine::{
    BargainingAnalysis, BargainingInputs, EngineError, Equilibrium, Objective, PayoffModel,
    Recommendation, Result, SettlementEstimate, TrailEntry,
};

use crate::signals::{CaseSignals, PlayerSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    MaxExpectedValue,
    MinimaxRegret,
    RiskAdjusted,
}

/// Objective as it appears on the wire: the player is named, not seated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectiveSpec {
    pub kind: ObjectiveKind,
    pub player: String,
    #[serde(default)]
    pub risk_aversion: Option<f64>,
}

impl ObjectiveSpec {
    /// Resolve the named player to a seat of `model`.
    pub fn resolve(&self, model: &PayoffModel) -> Result<Objective> {
        let player = model.seat_of(&self.player).ok_or_else(|| {
            EngineError::validation(format!("objective names unknown player '{}'", self.player))
        })?;
        let objective = match self.kind {
            ObjectiveKind::MaxExpectedValue => Objective::MaxExpectedValue { player },
            ObjectiveKind::MinimaxRegret => Objective::MinimaxRegret { player },
            ObjectiveKind::RiskAdjusted => {
                let risk_aversion = self.risk_aversion.ok_or_else(|| {
                    EngineError::validation("risk_adjusted objective requires risk_aversion")
                })?;
                Objective::RiskAdjusted { player, risk_aversion }
            }
        };
        objective.validate()?;
        Ok(objective)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    #[serde(default)]
    pub case_signals: Option<BTreeMap<String, CaseSignals>>,
    /// Payoffs supplied directly as `[row payoff, column payoff]` cells
    #[serde(default)]
    pub game_matrix: Option<Vec<Vec<[f64; 2]>>>,
    pub objective: ObjectiveSpec,
    pub risk_discount: f64,
    /// Overrides `solver.include_mixed` from the configuration
    #[serde(default)]
    pub include_mixed: Option<bool>,
    #[serde(default)]
    pub bargaining: Option<BargainingInputs>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub equilibria: Vec<Equilibrium>,
    pub recommendation: Recommendation,
    pub settlement_estimate: SettlementEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargaining: Option<BargainingAnalysis>,
    pub trail: Vec<TrailEntry>,
}

/// Equilibrium enumeration for callers that own their payoffs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolveRequest {
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    #[serde(default)]
    pub game_matrix: Option<Vec<Vec<[f64; 2]>>>,
    #[serde(default)]
    pub payoff_matrix_p1: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub payoff_matrix_p2: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub include_mixed: Option<bool>,
}

impl SolveRequest {
    /// The cells of the game, from `game_matrix` or from the two per-player matrices
    pub fn matrix(&self) -> Result<Vec<Vec<[f64; 2]>>> {
        match (&self.game_matrix, &self.payoff_matrix_p1, &self.payoff_matrix_p2) {
            (Some(matrix), None, None) => Ok(matrix.clone()),
            (None, Some(p1), Some(p2)) => {
                PayoffModel::from_split_matrices(p1, p2).map(|model| model.game_matrix())
            }
            (None, None, None) => Err(EngineError::validation(
                "provide game_matrix or payoff_matrix_p1 with payoff_matrix_p2",
            )),
            _ => Err(EngineError::validation(
                "game_matrix and payoff_matrix_p1/payoff_matrix_p2 are mutually exclusive, and the per-player matrices come in pairs",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResponse {
    pub equilibria: Vec<Equilibrium>,
    pub trail: Vec<TrailEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratagem_engine::Seat;

    fn model() -> PayoffModel {
        stratagem_engine::test_games::prisoners_dilemma()
    }

    fn objective_spec(kind: ObjectiveKind, player: &str, risk_aversion: Option<f64>) -> ObjectiveSpec {
        ObjectiveSpec {
            kind,
            player: player.into(),
            risk_aversion,
        }
    }

    #[test]
    fn test_resolve_maps_name_to_seat() {
        let model = model();
        let name = model.player(Seat::Column).name().to_string();
        let objective = objective_spec(ObjectiveKind::MinimaxRegret, &name, None).resolve(&model).unwrap();
        assert_eq!(objective, Objective::MinimaxRegret { player: Seat::Column });
    }

    #[test]
    fn test_resolve_rejects_unknown_player() {
        let err = objective_spec(ObjectiveKind::MaxExpectedValue, "nobody", None)
            .resolve(&model())
            .unwrap_err();
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn test_risk_adjusted_requires_valid_aversion() {
        let model = model();
        let name = model.player(Seat::Row).name().to_string();
        assert!(objective_spec(ObjectiveKind::RiskAdjusted, &name, None).resolve(&model).is_err());
        assert!(objective_spec(ObjectiveKind::RiskAdjusted, &name, Some(-1.0)).resolve(&model).is_err());
        assert!(objective_spec(ObjectiveKind::RiskAdjusted, &name, Some(0.25)).resolve(&model).is_ok());
    }

    #[test]
    fn test_solve_request_split_matrices() {
        let request = SolveRequest {
            payoff_matrix_p1: Some(vec![vec![3.0, 0.0], vec![5.0, 1.0]]),
            payoff_matrix_p2: Some(vec![vec![3.0, 5.0], vec![0.0, 1.0]]),
            ..SolveRequest::default()
        };
        assert_eq!(request.matrix().unwrap()[1], vec![[5.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_solve_request_requires_one_source() {
        assert!(SolveRequest::default().matrix().is_err());
        let both = SolveRequest {
            game_matrix: Some(vec![vec![[1.0, 1.0]]]),
            payoff_matrix_p1: Some(vec![vec![1.0]]),
            ..SolveRequest::default()
        };
        assert!(both.matrix().is_err());
    }
}
