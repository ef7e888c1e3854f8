//! Ranking of candidate equilibria under a chosen objective

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::model::{Equilibrium, Seat};
use crate::trail::{snapshot, ExplanationTrail, StageRecorder};

pub const STAGE: &str = "strategy_recommender";

/// Scores closer than this are treated as tied
const SCORE_TIE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Objective {
    /// Highest expected payoff for `player`
    MaxExpectedValue { player: Seat },
    /// Smallest gap between the best expected payoff on offer and the worst
    /// payoff `player` can realize under the candidate
    MinimaxRegret { player: Seat },
    /// Expected payoff minus `risk_aversion` times the payoff variance proxy
    RiskAdjusted { player: Seat, risk_aversion: f64 },
}

impl Objective {
    pub fn player(&self) -> Seat {
        match *self {
            Objective::MaxExpectedValue { player }
            | Objective::MinimaxRegret { player }
            | Objective::RiskAdjusted { player, .. } => player,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Objective::MaxExpectedValue { .. } => "max_expected_value",
            Objective::MinimaxRegret { .. } => "minimax_regret",
            Objective::RiskAdjusted { .. } => "risk_adjusted",
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Objective::RiskAdjusted { risk_aversion, .. } = *self {
            if !risk_aversion.is_finite() || risk_aversion < 0.0 {
                return Err(EngineError::validation(format!(
                    "risk_aversion must be a finite number >= 0, got {risk_aversion}"
                )));
            }
        }
        Ok(())
    }

    fn lower_is_better(&self) -> bool {
        matches!(self, Objective::MinimaxRegret { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEquilibrium {
    /// Position in the solver's output
    pub solver_index: usize,
    pub score: f64,
    pub equilibrium: Equilibrium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub equilibrium: Equilibrium,
    pub objective: Objective,
    pub objective_score: f64,
    /// Every candidate, best first
    pub considered: Vec<ScoredEquilibrium>,
}

impl Recommendation {
    pub fn target_player(&self) -> Seat {
        self.objective.player()
    }

    pub fn candidate_count(&self) -> usize {
        self.considered.len()
    }
}

/// Rank `equilibria` by `objective` and select the best one.
///
/// Equal scores keep solver order, so the lowest index wins a tie.
pub fn recommend(
    equilibria: &[Equilibrium],
    objective: Objective,
    trail: &mut ExplanationTrail,
) -> Result<Recommendation> {
    let mut stage = StageRecorder::begin(
        STAGE,
        json!({ "objective": objective, "candidates": equilibria.len() }),
    );
    let result = rank(equilibria, objective, &mut stage);
    let outputs = match &result {
        Ok(rec) => json!({
            "selected_solver_index": rec.considered[0].solver_index,
            "objective_score": rec.objective_score,
            "ranking": rec
                .considered
                .iter()
                .map(|c| json!({ "solver_index": c.solver_index, "score": c.score }))
                .collect::<Vec<_>>(),
        }),
        Err(err) => snapshot(&err.envelope()),
    };
    stage.finish(trail, outputs);
    result
}

fn rank(equilibria: &[Equilibrium], objective: Objective, stage: &mut StageRecorder) -> Result<Recommendation> {
    objective.validate()?;
    if equilibria.is_empty() {
        return Err(EngineError::NoEquilibrium);
    }

    let player = objective.player();
    let best_expected = equilibria
        .iter()
        .map(|e| e.expected_payoff(player))
        .fold(f64::NEG_INFINITY, f64::max);

    let scores: Vec<f64> = equilibria
        .iter()
        .map(|e| match objective {
            Objective::MaxExpectedValue { .. } => e.expected_payoff(player),
            Objective::MinimaxRegret { .. } => best_expected - e.worst_case_payoff(player),
            Objective::RiskAdjusted { risk_aversion, .. } => {
                e.expected_payoff(player) - risk_aversion * e.payoff_variance(player)
            }
        })
        .collect();

    let lower_is_better = objective.lower_is_better();
    let mut order: Vec<usize> = (0..equilibria.len()).collect();
    order.sort_by(|&a, &b| rank_order(scores[a], scores[b], lower_is_better).then(a.cmp(&b)));

    // Scores within tolerance of the leader tie; the lowest solver index wins.
    let leader = scores[order[0]];
    let tied: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| (scores[i] - leader).abs() <= SCORE_TIE_TOLERANCE)
        .collect();
    let selected = tied.iter().copied().min().unwrap_or(order[0]);
    if tied.len() > 1 {
        let mut sorted = tied.clone();
        sorted.sort_unstable();
        stage.note(format!(
            "candidates {sorted:?} tie on {}; lowest solver index {selected} selected",
            objective.name(),
        ));
        if let Some(pos) = order.iter().position(|&i| i == selected) {
            order[..=pos].rotate_right(1);
        }
    }
    let best = scores[selected];
    for (idx, eq) in equilibria.iter().enumerate() {
        if !eq.is_pure() && eq.is_degenerate() {
            stage.note(format!(
                "candidate {idx} is an unverified uniform fallback, not a true equilibrium"
            ));
        }
    }

    let considered: Vec<ScoredEquilibrium> = order
        .iter()
        .map(|&i| ScoredEquilibrium {
            solver_index: i,
            score: scores[i],
            equilibrium: equilibria[i].clone(),
        })
        .collect();

    debug!(
        objective = objective.name(),
        candidates = equilibria.len(),
        selected,
        score = best,
        "equilibrium selected"
    );

    Ok(Recommendation {
        equilibrium: equilibria[selected].clone(),
        objective,
        objective_score: best,
        considered,
    })
}

/// Best-first total order on scores
fn rank_order(a: f64, b: f64, lower_is_better: bool) -> Ordering {
    if lower_is_better {
        a.total_cmp(&b)
    } else {
        b.total_cmp(&a)
    }
}
