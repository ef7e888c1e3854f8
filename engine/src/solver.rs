//! Nash equilibrium search for two-player normal-form games
//!
//! Pure equilibria come from a best-response scan over the full matrix.
//! Mixed equilibria come from the closed-form indifference solution for 2×2
//! games and from support enumeration otherwise.
//!
//! Support enumeration only visits strategies that survive iterated strict
//! dominance. All support pairs of one size are independent linear systems,
//! so each size class is solved in parallel with Rayon; `collect` keeps the
//! enumeration order, so the output is identical from run to run.
//!
//! Output order: pure equilibria by (row, column), then mixed equilibria by
//! total support size.

use rayon::prelude::*;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::{SolverConfig, TiePolicy};
use crate::dominance::iterated_strict_elimination;
use crate::error::{EngineError, Result};
use crate::linalg::solve_linear_system;
use crate::model::{Equilibrium, PayoffModel, Seat, StrategyIndex};
use crate::trail::{snapshot, ExplanationTrail, StageRecorder};

pub const STAGE: &str = "equilibrium_solver";

/// A set of tied best responses by one seat against one opposing strategy
#[derive(Debug, Clone, PartialEq, Eq)]
struct BestResponseTie {
    seat: Seat,
    against: StrategyIndex,
    tied: Vec<StrategyIndex>,
}

impl BestResponseTie {
    fn describe(&self, model: &PayoffModel) -> String {
        let player = model.player(self.seat);
        let opponent = model.player(self.seat.opponent());
        format!(
            "{} is indifferent between strategies {:?} against {}'s strategy {} ({}); lowest index {} is the tie-break",
            player.name(),
            self.tied,
            opponent.name(),
            self.against,
            opponent.strategy_label(self.against).unwrap_or("?"),
            self.tied[0],
        )
    }
}

struct PureScan {
    equilibria: Vec<Equilibrium>,
    ties: Vec<BestResponseTie>,
}

/// Outcome of solving one indifference equation of the 2×2 closed form
#[derive(Debug, Clone, Copy, PartialEq)]
enum Indifference {
    Weight(f64),
    ZeroDenominator,
    OutOfRange(f64),
}

impl Indifference {
    fn describe(self) -> String {
        match self {
            Indifference::Weight(x) => format!("{x:.6}"),
            Indifference::ZeroDenominator => "undefined (zero denominator)".to_string(),
            Indifference::OutOfRange(x) => format!("{x:.6} (outside [0, 1])"),
        }
    }
}

struct SupportSearch {
    found: Vec<Equilibrium>,
    truncated: bool,
}

/// Equilibrium solver for two-player games
#[derive(Debug, Clone, Copy, Default)]
pub struct EquilibriumSolver {
    config: SolverConfig,
}

impl EquilibriumSolver {
    pub fn new(config: SolverConfig) -> Self {
        EquilibriumSolver { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Enumerate equilibria of `model`.
    ///
    /// Mixed equilibria are searched when `include_mixed` is set or when no
    /// pure equilibrium exists. Appends one `equilibrium_solver` entry to
    /// `trail`.
    pub fn solve(
        &self,
        model: &PayoffModel,
        include_mixed: bool,
        trail: &mut ExplanationTrail,
    ) -> Result<Vec<Equilibrium>> {
        let mut stage = StageRecorder::begin(
            STAGE,
            json!({
                "players": model.players(),
                "game_matrix": model.game_matrix(),
                "include_mixed": include_mixed,
                "config": self.config,
            }),
        );
        let result = self.run(model, include_mixed, &mut stage);
        let outputs = match &result {
            Ok(equilibria) => json!({ "equilibria": equilibria }),
            Err(err) => snapshot(&err.envelope()),
        };
        stage.finish(trail, outputs);
        result
    }

    fn run(&self, model: &PayoffModel, include_mixed: bool, stage: &mut StageRecorder) -> Result<Vec<Equilibrium>> {
        self.check_bounds(model)?;

        let scan = self.scan_pure(model);
        for tie in &scan.ties {
            stage.note(tie.describe(model));
        }
        if !scan.ties.is_empty() && self.config.tie_policy == TiePolicy::Reject {
            return Err(EngineError::DegenerateGame(format!(
                "{} best-response ties; first: {}",
                scan.ties.len(),
                scan.ties[0].describe(model)
            )));
        }

        let mut equilibria = scan.equilibria;
        debug!(
            rows = model.rows(),
            cols = model.cols(),
            pure = equilibria.len(),
            ties = scan.ties.len(),
            "pure strategy scan complete"
        );
        stage.note(format!("{} pure equilibria found", equilibria.len()));

        if !include_mixed && !equilibria.is_empty() {
            return Ok(equilibria);
        }

        if model.is_two_by_two() {
            match self.mixed_two_by_two(model, stage) {
                Some(mixed) => equilibria.push(mixed),
                None if self.config.uniform_fallback && equilibria.is_empty() => {
                    equilibria.push(self.uniform_fallback(model, stage)?);
                }
                None => {}
            }
            if equilibria.is_empty() {
                return Err(EngineError::SolverIncomplete {
                    max_support: 2,
                    partial: equilibria,
                });
            }
            return Ok(equilibria);
        }

        let search = self.support_enumeration(model, stage);
        let mut mixed = search.found;
        mixed.sort_by_key(Equilibrium::support_size);
        if mixed.is_empty() && (search.truncated || equilibria.is_empty()) {
            warn!(
                max_support = self.config.max_support,
                pure = equilibria.len(),
                truncated = search.truncated,
                "bounded support enumeration found no mixed equilibrium"
            );
            return Err(EngineError::SolverIncomplete {
                max_support: self.config.max_support,
                partial: equilibria,
            });
        }
        equilibria.extend(mixed);
        Ok(equilibria)
    }

    fn check_bounds(&self, model: &PayoffModel) -> Result<()> {
        for seat in Seat::BOTH {
            let count = model.strategy_count(seat);
            if count > self.config.max_strategies {
                return Err(EngineError::validation(format!(
                    "player '{}' has {count} strategies, the solver accepts at most {}",
                    model.player(seat).name(),
                    self.config.max_strategies
                )));
            }
        }
        Ok(())
    }

    /// A cell is a pure equilibrium iff each player's payoff there is within
    /// tolerance of its best response to the other's strategy.
    fn scan_pure(&self, model: &PayoffModel) -> PureScan {
        let tol = self.config.tolerance;
        let (rows, cols) = (model.rows(), model.cols());

        // Row player's best payoff in each column, column player's in each row.
        let column_best: Vec<f64> = (0..cols)
            .map(|j| (0..rows).map(|i| model.payoff(Seat::Row, i, j)).fold(f64::NEG_INFINITY, f64::max))
            .collect();
        let row_best: Vec<f64> = (0..rows)
            .map(|i| (0..cols).map(|j| model.payoff(Seat::Column, i, j)).fold(f64::NEG_INFINITY, f64::max))
            .collect();

        let row_responses: Vec<Vec<StrategyIndex>> = (0..cols)
            .map(|j| (0..rows).filter(|&i| model.payoff(Seat::Row, i, j) >= column_best[j] - tol).collect())
            .collect();
        let column_responses: Vec<Vec<StrategyIndex>> = (0..rows)
            .map(|i| (0..cols).filter(|&j| model.payoff(Seat::Column, i, j) >= row_best[i] - tol).collect())
            .collect();

        let mut ties = Vec::new();
        for (against, tied) in row_responses.iter().enumerate().filter(|(_, r)| r.len() > 1) {
            ties.push(BestResponseTie { seat: Seat::Row, against, tied: tied.clone() });
        }
        for (against, tied) in column_responses.iter().enumerate().filter(|(_, r)| r.len() > 1) {
            ties.push(BestResponseTie { seat: Seat::Column, against, tied: tied.clone() });
        }

        let mut equilibria = Vec::new();
        for i in 0..rows {
            for j in 0..cols {
                if row_responses[j].contains(&i) && column_responses[i].contains(&j) {
                    let degenerate = row_responses[j].len() > 1 || column_responses[i].len() > 1;
                    equilibria.push(Equilibrium::pure(model, i, j, degenerate));
                }
            }
        }

        PureScan { equilibria, ties }
    }

    /// Closed-form mixed equilibrium of a 2×2 game.
    ///
    /// `q` (column player on column 0) makes the row player indifferent
    /// between rows; `p` (row player on row 0) makes the column player
    /// indifferent between columns.
    fn mixed_two_by_two(&self, model: &PayoffModel, stage: &mut StageRecorder) -> Option<Equilibrium> {
        let u = |seat, i, j| model.payoff(seat, i, j);
        let q = self.indifference(u(Seat::Row, 0, 0), u(Seat::Row, 0, 1), u(Seat::Row, 1, 0), u(Seat::Row, 1, 1));
        let p = self.indifference(
            u(Seat::Column, 0, 0),
            u(Seat::Column, 1, 0),
            u(Seat::Column, 0, 1),
            u(Seat::Column, 1, 1),
        );
        stage.note(format!("2x2 closed form: p = {}, q = {}", p.describe(), q.describe()));

        let (Indifference::Weight(p), Indifference::Weight(q)) = (p, q) else {
            stage.note("no mixed equilibrium of the closed form exists");
            return None;
        };
        let is_vertex = |x: f64| x == 0.0 || x == 1.0;
        if is_vertex(p) && is_vertex(q) {
            stage.note("closed-form solution coincides with a pure profile; not repeated");
            return None;
        }
        Equilibrium::mixed(model, vec![p, 1.0 - p], vec![q, 1.0 - q], false).ok()
    }

    /// Uniform profile tagged degenerate, emitted when a 2×2 search finds nothing.
    ///
    /// With no pure equilibrium, best responses in a 2×2 game cycle strictly,
    /// both closed-form denominators exceed twice the tolerance and the closed
    /// form succeeds. This only fires if that reasoning is broken by rounding.
    fn uniform_fallback(&self, model: &PayoffModel, stage: &mut StageRecorder) -> Result<Equilibrium> {
        let uniform = Equilibrium::mixed(model, vec![0.5, 0.5], vec![0.5, 0.5], true)?;
        stage.note("uniform fallback profile added and tagged degenerate; it is not a verified equilibrium");
        warn!("2x2 search found no equilibrium, emitting degenerate uniform fallback");
        Ok(uniform)
    }

    /// Solve `x·a + (1 - x)·b = x·c + (1 - x)·d` for x.
    fn indifference(&self, a: f64, b: f64, c: f64, d: f64) -> Indifference {
        let tol = self.config.tolerance;
        let denominator = a - b - c + d;
        if denominator.abs() <= tol {
            return Indifference::ZeroDenominator;
        }
        let x = (d - b) / denominator;
        if !(-tol..=1.0 + tol).contains(&x) {
            return Indifference::OutOfRange(x);
        }
        Indifference::Weight(x.clamp(0.0, 1.0))
    }

    fn support_enumeration(&self, model: &PayoffModel, stage: &mut StageRecorder) -> SupportSearch {
        let elimination = iterated_strict_elimination(model, self.config.tolerance);
        for step in &elimination.steps {
            let player = model.player(step.seat);
            stage.note(format!(
                "round {}: eliminated {}'s strategy {} ({}), strictly dominated by {} ({})",
                step.round,
                player.name(),
                step.dominated,
                player.strategy_label(step.dominated).unwrap_or("?"),
                step.dominated_by,
                player.strategy_label(step.dominated_by).unwrap_or("?"),
            ));
        }

        let rows = &elimination.surviving_rows;
        let cols = &elimination.surviving_cols;
        let largest = rows.len().min(cols.len());
        let bound = largest.min(self.config.max_support);
        let truncated = largest > self.config.max_support;

        let mut found = Vec::new();
        for size in 2..=bound {
            let row_supports = subsets(rows, size);
            let col_supports = subsets(cols, size);
            let pairs: Vec<(&[StrategyIndex], &[StrategyIndex])> = row_supports
                .iter()
                .flat_map(|r| col_supports.iter().map(move |c| (r.as_slice(), c.as_slice())))
                .collect();
            let solved: Vec<Equilibrium> = pairs
                .par_iter()
                .map(|&(r, c)| self.solve_support(model, r, c))
                .collect::<Vec<Option<Equilibrium>>>()
                .into_iter()
                .flatten()
                .collect();
            stage.note(format!(
                "support size {size}: {} pairs tried, {} feasible",
                pairs.len(),
                solved.len()
            ));
            found.extend(solved);
        }
        if truncated {
            stage.note(format!(
                "supports larger than {} were not enumerated",
                self.config.max_support
            ));
        }

        SupportSearch { found, truncated }
    }

    /// Solve the indifference systems of one support pair and check that no
    /// strategy outside the supports is a profitable deviation.
    fn solve_support(
        &self,
        model: &PayoffModel,
        row_support: &[StrategyIndex],
        col_support: &[StrategyIndex],
    ) -> Option<Equilibrium> {
        let tol = self.config.tolerance;

        // Column weights that leave the row player indifferent across its support.
        let (q, row_value) = indifference_system(row_support.len(), |eq, var| {
            model.payoff(Seat::Row, row_support[eq], col_support[var])
        })?;
        // Row weights that leave the column player indifferent across its support.
        let (p, col_value) = indifference_system(col_support.len(), |eq, var| {
            model.payoff(Seat::Column, row_support[var], col_support[eq])
        })?;

        if p.iter().chain(&q).any(|&w| w <= tol || w > 1.0 + tol) {
            return None;
        }

        let mut row_probs = vec![0.0_f64; model.rows()];
        for (&i, &w) in row_support.iter().zip(&p) {
            row_probs[i] = w;
        }
        let mut col_probs = vec![0.0_f64; model.cols()];
        for (&j, &w) in col_support.iter().zip(&q) {
            col_probs[j] = w;
        }
        normalize(&mut row_probs);
        normalize(&mut col_probs);

        let row_deviation_ok = (0..model.rows()).filter(|i| !row_support.contains(i)).all(|i| {
            let value: f64 = (0..model.cols()).map(|j| col_probs[j] * model.payoff(Seat::Row, i, j)).sum();
            value <= row_value + tol
        });
        let col_deviation_ok = (0..model.cols()).filter(|j| !col_support.contains(j)).all(|j| {
            let value: f64 = (0..model.rows()).map(|i| row_probs[i] * model.payoff(Seat::Column, i, j)).sum();
            value <= col_value + tol
        });
        if !(row_deviation_ok && col_deviation_ok) {
            return None;
        }

        Equilibrium::mixed(model, row_probs, col_probs, false).ok()
    }
}

/// Build and solve `Σ_var w[var]·coef(eq, var) - v = 0` for every equation,
/// plus `Σ w = 1`. Returns the weights and the common value `v`.
fn indifference_system(k: usize, coefficient: impl Fn(usize, usize) -> f64) -> Option<(Vec<f64>, f64)> {
    let mut a = vec![vec![0.0_f64; k + 1]; k + 1];
    let mut b = vec![0.0_f64; k + 1];
    for (eq, row) in a.iter_mut().take(k).enumerate() {
        for (var, cell) in row.iter_mut().take(k).enumerate() {
            *cell = coefficient(eq, var);
        }
        row[k] = -1.0;
    }
    for cell in a[k].iter_mut().take(k) {
        *cell = 1.0;
    }
    b[k] = 1.0;

    let mut x = solve_linear_system(a, b)?;
    let value = x.pop()?;
    Some((x, value))
}

fn normalize(weights: &mut [f64]) {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    }
}

/// All subsets of `items` with exactly `size` elements, in lexicographic order
fn subsets(items: &[StrategyIndex], size: usize) -> Vec<Vec<StrategyIndex>> {
    fn extend(items: &[StrategyIndex], size: usize, start: usize, current: &mut Vec<StrategyIndex>, out: &mut Vec<Vec<StrategyIndex>>) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for idx in start..items.len() {
            current.push(items[idx]);
            extend(items, size, idx + 1, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    if size <= items.len() {
        extend(items, size, 0, &mut Vec::with_capacity(size), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_games;

    fn solve(model: &PayoffModel, include_mixed: bool) -> Result<Vec<Equilibrium>> {
        let mut trail = ExplanationTrail::new();
        EquilibriumSolver::default().solve(model, include_mixed, &mut trail)
    }

    fn mixed_parts(eq: &Equilibrium) -> (&[f64], &[f64], (f64, f64)) {
        match eq {
            Equilibrium::Mixed {
                player1_probabilities,
                player2_probabilities,
                expected_payoffs,
                ..
            } => (player1_probabilities, player2_probabilities, *expected_payoffs),
            other => panic!("expected mixed equilibrium, got {other:?}"),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_prisoners_dilemma_single_pure() {
        let model = test_games::prisoners_dilemma();
        for include_mixed in [false, true] {
            let eqs = solve(&model, include_mixed).unwrap();
            assert_eq!(
                eqs,
                vec![Equilibrium::Pure {
                    strategy_indices: (1, 1),
                    payoffs: (-2.0, -2.0),
                    degenerate: false,
                }]
            );
        }
    }

    #[test]
    fn test_matching_pennies_single_mixed() {
        let eqs = solve(&test_games::matching_pennies(), false).unwrap();
        assert_eq!(eqs.len(), 1);
        let (p, q, payoffs) = mixed_parts(&eqs[0]);
        assert!(close(p[0], 0.5) && close(q[0], 0.5));
        assert!(close(payoffs.0, 0.0) && close(payoffs.1, 0.0));
        assert!(!eqs[0].is_degenerate());
    }

    #[test]
    fn test_all_equal_every_cell_degenerate() {
        let eqs = solve(&test_games::all_equal(5.0), false).unwrap();
        let cells: Vec<(usize, usize)> = eqs
            .iter()
            .map(|e| match e {
                Equilibrium::Pure { strategy_indices, .. } => *strategy_indices,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(eqs.iter().all(Equilibrium::is_degenerate));
    }

    #[test]
    fn test_ties_are_noted_in_trail() {
        let mut trail = ExplanationTrail::new();
        EquilibriumSolver::default()
            .solve(&test_games::all_equal(5.0), false, &mut trail)
            .unwrap();
        let entry = trail.stage(STAGE).unwrap();
        assert!(entry.notes.iter().any(|n| n.contains("tie-break")));
    }

    #[test]
    fn test_reject_policy_surfaces_degenerate_game() {
        let config = SolverConfig {
            tie_policy: TiePolicy::Reject,
            ..SolverConfig::default()
        };
        let mut trail = ExplanationTrail::new();
        let err = EquilibriumSolver::new(config)
            .solve(&test_games::all_equal(1.0), false, &mut trail)
            .unwrap_err();
        assert!(matches!(err, EngineError::DegenerateGame(_)));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_battle_of_sexes_pure_then_mixed() {
        let eqs = solve(&test_games::battle_of_sexes(), true).unwrap();
        assert_eq!(eqs.len(), 3);
        assert!(eqs[0].is_pure() && eqs[1].is_pure());
        let (p, q, payoffs) = mixed_parts(&eqs[2]);
        assert!(close(p[0], 2.0 / 3.0));
        assert!(close(q[0], 1.0 / 3.0));
        assert!(close(payoffs.0, 2.0 / 3.0) && close(payoffs.1, 2.0 / 3.0));
    }

    #[test]
    fn test_battle_of_sexes_pure_only_by_default() {
        let eqs = solve(&test_games::battle_of_sexes(), false).unwrap();
        assert_eq!(eqs.len(), 2);
    }

    #[test]
    fn test_rock_paper_scissors_uniform() {
        let eqs = solve(&test_games::rock_paper_scissors(), false).unwrap();
        assert_eq!(eqs.len(), 1);
        let (p, q, payoffs) = mixed_parts(&eqs[0]);
        assert!(p.iter().chain(q).all(|&x| close(x, 1.0 / 3.0)));
        assert!(close(payoffs.0, 0.0));
    }

    #[test]
    fn test_support_bound_reports_incomplete() {
        let config = SolverConfig {
            max_support: 2,
            ..SolverConfig::default()
        };
        let mut trail = ExplanationTrail::new();
        let err = EquilibriumSolver::new(config)
            .solve(&test_games::rock_paper_scissors(), false, &mut trail)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::SolverIncomplete {
                max_support: 2,
                partial: vec![],
            }
        );
        let entry = trail.stage(STAGE).unwrap();
        assert_eq!(entry.outputs["error"]["kind"], "solver_incomplete_error");
        assert_eq!(entry.outputs["error"]["partial_equilibria"], json!([]));
        assert!(entry.outputs.get("partial_equilibria").is_none());
    }

    #[test]
    fn test_uniform_fallback_is_tagged_and_noted() {
        let solver = EquilibriumSolver::new(SolverConfig {
            uniform_fallback: true,
            ..SolverConfig::default()
        });
        let model = test_games::matching_pennies();
        let mut stage = StageRecorder::begin(STAGE, json!(null));
        let uniform = solver.uniform_fallback(&model, &mut stage).unwrap();
        assert!(uniform.is_degenerate());
        assert!(!uniform.is_pure());
        assert!(stage.notes()[0].contains("not a verified equilibrium"));

        let mut trail = ExplanationTrail::new();
        let rec = crate::recommend::recommend(
            &[uniform],
            crate::recommend::Objective::MaxExpectedValue { player: Seat::Row },
            &mut trail,
        )
        .unwrap();
        assert!(rec.equilibrium.is_degenerate());
        assert!(trail.entries()[0].notes.iter().any(|n| n.contains("unverified uniform fallback")));
    }

    #[test]
    fn test_closed_form_found_before_fallback_is_considered() {
        let solver = EquilibriumSolver::new(SolverConfig {
            uniform_fallback: true,
            ..SolverConfig::default()
        });
        let mut trail = ExplanationTrail::new();
        let eqs = solver.solve(&test_games::matching_pennies(), false, &mut trail).unwrap();
        assert_eq!(eqs.len(), 1);
        assert!(!eqs[0].is_degenerate());
    }

    #[test]
    fn test_dominance_solvable_complete_with_mixed_requested() {
        let mut trail = ExplanationTrail::new();
        let eqs = EquilibriumSolver::default()
            .solve(&test_games::dominance_solvable(), true, &mut trail)
            .unwrap();
        assert_eq!(eqs.len(), 1);
        assert_eq!(eqs[0], Equilibrium::pure(&test_games::dominance_solvable(), 1, 1, false));
        let notes = &trail.stage(STAGE).unwrap().notes;
        assert_eq!(notes.iter().filter(|n| n.contains("eliminated")).count(), 4);
    }

    #[test]
    fn test_two_by_three_skips_dominated_column() {
        let model = test_games::pennies_with_dominated_column();
        let eqs = solve(&model, false).unwrap();
        assert_eq!(eqs.len(), 1);
        let (p, q, _) = mixed_parts(&eqs[0]);
        assert!(close(p[0], 0.5) && close(p[1], 0.5));
        assert!(close(q[0], 0.5) && close(q[1], 0.5) && q[2] == 0.0);
    }

    #[test]
    fn test_strategy_bound_enforced() {
        let config = SolverConfig {
            max_strategies: 2,
            ..SolverConfig::default()
        };
        let mut trail = ExplanationTrail::new();
        let err = EquilibriumSolver::new(config)
            .solve(&test_games::rock_paper_scissors(), false, &mut trail)
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_solve_is_deterministic() {
        let model = test_games::battle_of_sexes();
        assert_eq!(solve(&model, true).unwrap(), solve(&model, true).unwrap());
        let model = test_games::rock_paper_scissors();
        assert_eq!(solve(&model, true).unwrap(), solve(&model, true).unwrap());
    }

    #[test]
    fn test_subsets_lexicographic() {
        assert_eq!(
            subsets(&[0, 2, 3], 2),
            vec![vec![0, 2], vec![0, 3], vec![2, 3]]
        );
        assert!(subsets(&[1], 2).is_empty());
    }

    #[test]
    fn test_indifference_outcomes() {
        let solver = EquilibriumSolver::default();
        assert_eq!(solver.indifference(1.0, 1.0, 1.0, 1.0), Indifference::ZeroDenominator);
        assert_eq!(solver.indifference(2.0, 0.0, 0.0, 1.0), Indifference::Weight(1.0 / 3.0));
        assert!(matches!(solver.indifference(1.0, 0.0, 0.0, -3.0), Indifference::OutOfRange(_)));
    }
}
