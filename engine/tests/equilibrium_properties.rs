use proptest::prelude::*;
use stratagem_engine::recommend::{recommend, Objective};
use stratagem_engine::{
    EngineError, Equilibrium, EquilibriumSolver, ExplanationTrail, PayoffModel, Seat,
    SettlementValuator,
};

fn game(payoffs: impl Strategy<Value = i32> + Clone) -> impl Strategy<Value = PayoffModel> {
    (2usize..=4, 2usize..=4)
        .prop_flat_map(move |(rows, cols)| {
            prop::collection::vec(
                prop::collection::vec((payoffs.clone(), payoffs.clone()), cols),
                rows,
            )
        })
        .prop_map(|cells| {
            let matrix = cells
                .into_iter()
                .map(|row| row.into_iter().map(|(a, b)| [a as f64, b as f64]).collect())
                .collect();
            PayoffModel::from_game_matrix(matrix).expect("generated game is valid")
        })
}

fn solve(model: &PayoffModel) -> Result<Vec<Equilibrium>, EngineError> {
    let mut trail = ExplanationTrail::new();
    EquilibriumSolver::default().solve(model, true, &mut trail)
}

/// Best payoff `seat` could get by deviating to a pure strategy
fn best_deviation(model: &PayoffModel, seat: Seat, p: &[f64], q: &[f64]) -> f64 {
    match seat {
        Seat::Row => (0..model.rows())
            .map(|i| (0..model.cols()).map(|j| q[j] * model.payoff(Seat::Row, i, j)).sum::<f64>())
            .fold(f64::NEG_INFINITY, f64::max),
        Seat::Column => (0..model.cols())
            .map(|j| (0..model.rows()).map(|i| p[i] * model.payoff(Seat::Column, i, j)).sum::<f64>())
            .fold(f64::NEG_INFINITY, f64::max),
    }
}

proptest! {
    #[test]
    fn property_only_incomplete_search_can_fail(model in game(-5..=5)) {
        if let Err(err) = solve(&model) {
            let is_incomplete = matches!(err, EngineError::SolverIncomplete { .. });
            prop_assert!(is_incomplete, "unexpected error {err:?}");
        }
    }

    #[test]
    fn property_mixed_probabilities_normalized(model in game(-5..=5)) {
        for eq in solve(&model).unwrap_or_default() {
            if let Equilibrium::Mixed { player1_probabilities, player2_probabilities, .. } = &eq {
                for probs in [player1_probabilities, player2_probabilities] {
                    let total: f64 = probs.iter().sum();
                    prop_assert!((total - 1.0).abs() <= 1e-6, "sum {total}");
                    prop_assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
                }
            }
        }
    }

    #[test]
    fn property_pure_equilibria_are_best_responses(model in game(-5..=5)) {
        for eq in solve(&model).unwrap_or_default() {
            if let Equilibrium::Pure { strategy_indices: (i, j), .. } = eq {
                for other in 0..model.rows() {
                    prop_assert!(model.payoff(Seat::Row, i, j) >= model.payoff(Seat::Row, other, j));
                }
                for other in 0..model.cols() {
                    prop_assert!(model.payoff(Seat::Column, i, j) >= model.payoff(Seat::Column, i, other));
                }
            }
        }
    }

    #[test]
    fn property_mixed_equilibria_admit_no_profitable_deviation(model in game(-5..=5)) {
        for eq in solve(&model).unwrap_or_default() {
            if let Equilibrium::Mixed { player1_probabilities: p, player2_probabilities: q, expected_payoffs, .. } = &eq {
                prop_assert!(best_deviation(&model, Seat::Row, p, q) <= expected_payoffs.0 + 1e-6);
                prop_assert!(best_deviation(&model, Seat::Column, p, q) <= expected_payoffs.1 + 1e-6);
            }
        }
    }

    #[test]
    fn property_solve_is_deterministic(model in game(-5..=5)) {
        prop_assert_eq!(solve(&model), solve(&model));
    }

    #[test]
    fn property_settlement_bounds_hold(model in game(-100..=100), discount in 0.0f64..=1.0) {
        let mut trail = ExplanationTrail::new();
        let Ok(eqs) = EquilibriumSolver::default().solve(&model, true, &mut trail) else {
            return Ok(());
        };
        let rec = recommend(&eqs, Objective::MaxExpectedValue { player: Seat::Column }, &mut trail).unwrap();
        let est = SettlementValuator::default().valuate(&rec, discount, &mut trail).unwrap();
        prop_assert!(est.low <= est.point_value && est.point_value <= est.high);
        prop_assert!(est.confidence > 0.0 && est.confidence <= 1.0);
        prop_assert_eq!(trail.len(), 3);
    }

    #[test]
    fn property_higher_discount_strictly_lowers_positive_value(
        model in game(1..=20),
        low in 0.0f64..0.5,
        step in 0.01f64..0.5,
    ) {
        let mut trail = ExplanationTrail::new();
        let Ok(eqs) = EquilibriumSolver::default().solve(&model, false, &mut trail) else {
            return Ok(());
        };
        let rec = recommend(&eqs, Objective::MaxExpectedValue { player: Seat::Row }, &mut trail).unwrap();
        let valuator = SettlementValuator::default();
        let a = valuator.valuate(&rec, low, &mut trail).unwrap().point_value;
        let b = valuator.valuate(&rec, low + step, &mut trail).unwrap().point_value;
        prop_assert!(b < a, "{b} !< {a}");
    }
}

#[test]
fn prisoners_dilemma_literal_matrix() {
    let model = PayoffModel::from_game_matrix(vec![
        vec![[-1.0, -1.0], [-3.0, 0.0]],
        vec![[0.0, -3.0], [-2.0, -2.0]],
    ])
    .unwrap();
    let eqs = solve(&model).unwrap();
    assert_eq!(eqs.len(), 1);
    assert_eq!(eqs[0].expected_payoffs(), (-2.0, -2.0));
}
