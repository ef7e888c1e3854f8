//! Iterated elimination of strictly dominated pure strategies
//!
//! A strictly dominated strategy is never played with positive probability in
//! any Nash equilibrium, so the survivors bound the supports worth
//! enumerating. Each round removes at most one row strategy and then at most
//! one column strategy, always the lowest-index dominated strategy, which
//! makes the elimination order deterministic.

use serde::Serialize;

use crate::model::{PayoffModel, Seat, StrategyIndex};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EliminationStep {
    pub round: usize,
    pub seat: Seat,
    pub dominated: StrategyIndex,
    pub dominated_by: StrategyIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Elimination {
    pub surviving_rows: Vec<StrategyIndex>,
    pub surviving_cols: Vec<StrategyIndex>,
    pub steps: Vec<EliminationStep>,
}

impl Elimination {
    pub fn surviving(&self, seat: Seat) -> &[StrategyIndex] {
        match seat {
            Seat::Row => &self.surviving_rows,
            Seat::Column => &self.surviving_cols,
        }
    }
}

/// Run elimination to a fixed point. `tolerance` is the margin a dominating
/// strategy must beat the dominated one by against every surviving opponent
/// strategy.
pub fn iterated_strict_elimination(model: &PayoffModel, tolerance: f64) -> Elimination {
    let mut rows: Vec<StrategyIndex> = (0..model.rows()).collect();
    let mut cols: Vec<StrategyIndex> = (0..model.cols()).collect();
    let mut steps = Vec::new();

    for round in 1.. {
        let mut changed = false;
        if let Some((dominated, dominated_by)) = find_dominated(model, Seat::Row, &rows, &cols, tolerance) {
            rows.retain(|&r| r != dominated);
            steps.push(EliminationStep { round, seat: Seat::Row, dominated, dominated_by });
            changed = true;
        }
        if let Some((dominated, dominated_by)) = find_dominated(model, Seat::Column, &cols, &rows, tolerance) {
            cols.retain(|&c| c != dominated);
            steps.push(EliminationStep { round, seat: Seat::Column, dominated, dominated_by });
            changed = true;
        }
        if !changed {
            break;
        }
    }

    Elimination {
        surviving_rows: rows,
        surviving_cols: cols,
        steps,
    }
}

fn find_dominated(
    model: &PayoffModel,
    seat: Seat,
    own: &[StrategyIndex],
    opponent: &[StrategyIndex],
    tolerance: f64,
) -> Option<(StrategyIndex, StrategyIndex)> {
    if own.len() < 2 {
        return None;
    }
    let payoff = |mine: StrategyIndex, theirs: StrategyIndex| match seat {
        Seat::Row => model.payoff(Seat::Row, mine, theirs),
        Seat::Column => model.payoff(Seat::Column, theirs, mine),
    };
    for &candidate in own {
        for &other in own.iter().filter(|&&o| o != candidate) {
            if opponent
                .iter()
                .all(|&t| payoff(other, t) > payoff(candidate, t) + tolerance)
            {
                return Some((candidate, other));
            }
        }
    }
    None
}
