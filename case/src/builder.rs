//! Payoff matrix construction from case signals
//!
//! For the cell `(s1, s2)` each player receives
//! `success_probability(own, opponent) · base_value − cost(own) − delay(own, opponent)`,
//! where `own` is that player's strategy in the cell. Success odds depend on
//! the pair of strategies, which is why the result is a matrix and not two
//! independent payoff vectors.

use std::collections::BTreeMap;

use serde_json::json;
use stratagem_engine::trail::{snapshot, ExplanationTrail, StageRecorder};
use stratagem_engine::{EngineError, PayoffModel, Player, Result, Seat};
use tracing::debug;

use crate::signals::{CaseSignals, PlayerSpec};

pub const STAGE: &str = "payoff_matrix_builder";

/// Build the payoff model for two players from their case signals.
///
/// The first player takes the row seat. Appends one `payoff_matrix_builder`
/// entry to `trail`.
pub fn build(
    players: &[PlayerSpec],
    case_signals: &BTreeMap<String, CaseSignals>,
    trail: &mut ExplanationTrail,
) -> Result<PayoffModel> {
    let mut stage = StageRecorder::begin(
        STAGE,
        json!({ "players": players, "case_signals": case_signals }),
    );
    let result = from_signals(players, case_signals, &mut stage);
    finish(stage, trail, &result);
    result
}

/// Wrap a caller-supplied `[row payoff, column payoff]` matrix in a model.
///
/// Without player specs the players are `player1` / `player2` with strategies
/// `s0`, `s1`, ... Appends one `payoff_matrix_builder` entry to `trail`.
pub fn build_from_matrix(
    players: &[PlayerSpec],
    matrix: &[Vec<[f64; 2]>],
    trail: &mut ExplanationTrail,
) -> Result<PayoffModel> {
    let mut stage = StageRecorder::begin(
        STAGE,
        json!({ "players": players, "game_matrix": matrix }),
    );
    let result = if players.is_empty() {
        stage.note("no players named; using player1/player2 with default strategy labels");
        PayoffModel::from_game_matrix(matrix.to_vec())
    } else {
        seat_players(players).and_then(|[row, col]| PayoffModel::new(row, col, matrix.to_vec()))
    };
    finish(stage, trail, &result);
    result
}

fn finish(stage: StageRecorder, trail: &mut ExplanationTrail, result: &Result<PayoffModel>) {
    let outputs = match result {
        Ok(model) => json!({
            "rows": model.rows(),
            "cols": model.cols(),
            "game_matrix": model.game_matrix(),
        }),
        Err(err) => snapshot(&err.envelope()),
    };
    stage.finish(trail, outputs);
}

fn seat_players(players: &[PlayerSpec]) -> Result<[Player; 2]> {
    match players {
        [row, col] => Ok([row.to_player()?, col.to_player()?]),
        _ => Err(EngineError::validation(format!(
            "exactly two players are supported, got {}",
            players.len()
        ))),
    }
}

fn from_signals(
    players: &[PlayerSpec],
    case_signals: &BTreeMap<String, CaseSignals>,
    stage: &mut StageRecorder,
) -> Result<PayoffModel> {
    let [row, col] = seat_players(players)?;

    for name in case_signals.keys() {
        if name != row.name() && name != col.name() {
            return Err(EngineError::validation(format!(
                "case_signals names unknown player '{name}'"
            )));
        }
    }
    let signals_for = |player: &Player| {
        case_signals.get(player.name()).ok_or_else(|| {
            EngineError::validation(format!("case_signals has no entry for player '{}'", player.name()))
        })
    };
    let row_signals = signals_for(&row)?;
    let col_signals = signals_for(&col)?;
    row_signals.validate(&row, &col)?;
    col_signals.validate(&col, &row)?;

    let mut fallbacks = 0usize;
    let mut matrix = Vec::with_capacity(row.strategy_count());
    for s1 in row.strategies() {
        let mut cells = Vec::with_capacity(col.strategy_count());
        for s2 in col.strategies() {
            let row_payoff = payoff(&row, row_signals, s1, s2, &mut fallbacks)?;
            let col_payoff = payoff(&col, col_signals, s2, s1, &mut fallbacks)?;
            cells.push([row_payoff, col_payoff]);
        }
        matrix.push(cells);
    }
    if fallbacks > 0 {
        stage.note(format!(
            "{fallbacks} strategy pairs used the scalar success_probability"
        ));
    }

    let model = PayoffModel::new(row, col, matrix)?;
    debug!(
        rows = model.rows(),
        cols = model.cols(),
        row_player = model.player(Seat::Row).name(),
        column_player = model.player(Seat::Column).name(),
        "payoff matrix built"
    );
    Ok(model)
}

fn payoff(player: &Player, signals: &CaseSignals, own: &str, opponent: &str, fallbacks: &mut usize) -> Result<f64> {
    let by_pair = signals
        .success_probability_by_pair
        .get(own)
        .and_then(|row| row.get(opponent))
        .is_some();
    let probability = signals.success_probability(own, opponent).ok_or_else(|| {
        EngineError::validation(format!(
            "case_signals.{} has no success probability for '{own}' against '{opponent}'",
            player.name()
        ))
    })?;
    if !by_pair {
        *fallbacks += 1;
    }
    Ok(probability * signals.base_value - signals.cost(own) - signals.delay_penalty(own, opponent))
}
