//! End-to-end analysis: request in, equilibria, recommendation and settlement out
//!
//! Stages run in order and each appends one trail entry:
//! payoff_matrix_builder → equilibrium_solver → strategy_recommender →
//! settlement_valuator → bargaining (when requested). Any failure ends the
//! call with the error; no partial response is produced.

use serde::de::DeserializeOwned;
use stratagem_engine::{
    analyze_bargaining, recommend, EngineConfig, EngineError, EquilibriumSolver, ExplanationTrail, Result,
    SettlementValuator,
};
use tracing::{debug, info};

use crate::builder;
use crate::request::{AnalysisRequest, AnalysisResponse, SolveRequest, SolveResponse};

pub fn analyze(request: &AnalysisRequest, config: &EngineConfig) -> Result<AnalysisResponse> {
    debug!(players = request.players.len(), include_mixed = ?request.include_mixed, "analysis requested");
    config.validate()?;
    validate_request(request)?;

    let mut trail = ExplanationTrail::new();
    let model = match (&request.case_signals, &request.game_matrix) {
        (Some(signals), None) => builder::build(&request.players, signals, &mut trail)?,
        (None, Some(matrix)) => builder::build_from_matrix(&request.players, matrix, &mut trail)?,
        (Some(_), Some(_)) => {
            return Err(EngineError::validation(
                "case_signals and game_matrix are mutually exclusive",
            ))
        }
        (None, None) => return Err(EngineError::validation("provide case_signals or game_matrix")),
    };
    let objective = request.objective.resolve(&model)?;

    let include_mixed = request.include_mixed.unwrap_or(config.solver.include_mixed);
    let equilibria = EquilibriumSolver::new(config.solver).solve(&model, include_mixed, &mut trail)?;
    let recommendation = recommend(&equilibria, objective, &mut trail)?;
    let settlement_estimate =
        SettlementValuator::new(config.valuation).valuate(&recommendation, request.risk_discount, &mut trail)?;
    let bargaining = request
        .bargaining
        .as_ref()
        .map(|inputs| analyze_bargaining(inputs, &mut trail))
        .transpose()?;

    info!(
        equilibria = equilibria.len(),
        objective = objective.name(),
        point_value = settlement_estimate.point_value,
        stages = trail.len(),
        "analysis complete"
    );

    Ok(AnalysisResponse {
        equilibria,
        recommendation,
        settlement_estimate,
        bargaining,
        trail: trail.into_entries(),
    })
}

/// Enumerate the equilibria of a caller-supplied matrix.
pub fn solve_request(request: &SolveRequest, config: &EngineConfig) -> Result<SolveResponse> {
    config.validate()?;
    let matrix = request.matrix()?;

    let mut trail = ExplanationTrail::new();
    let model = builder::build_from_matrix(&request.players, &matrix, &mut trail)?;
    let include_mixed = request.include_mixed.unwrap_or(config.solver.include_mixed);
    let equilibria = EquilibriumSolver::new(config.solver).solve(&model, include_mixed, &mut trail)?;
    info!(equilibria = equilibria.len(), "solve complete");

    Ok(SolveResponse {
        equilibria,
        trail: trail.into_entries(),
    })
}

/// Parse a JSON analysis request and run it. Malformed JSON is a validation error.
pub fn analyze_str(input: &str, config: &EngineConfig) -> Result<AnalysisResponse> {
    analyze(&parse_request(input)?, config)
}

/// Parse a JSON solve request and run it.
pub fn solve_str(input: &str, config: &EngineConfig) -> Result<SolveResponse> {
    solve_request(&parse_request(input)?, config)
}

/// Deserialize a JSON request. Malformed JSON is a validation error.
pub fn parse_request<T: DeserializeOwned>(input: &str) -> Result<T> {
    serde_json::from_str(input).map_err(|err| EngineError::validation(format!("invalid request: {err}")))
}

fn validate_request(request: &AnalysisRequest) -> Result<()> {
    let discount = request.risk_discount;
    if !(0.0..=1.0).contains(&discount) {
        return Err(EngineError::validation(format!(
            "risk_discount must be in [0, 1], got {discount}"
        )));
    }
    if let Some(aversion) = request.objective.risk_aversion {
        if !aversion.is_finite() || aversion < 0.0 {
            return Err(EngineError::validation(format!(
                "risk_aversion must be a finite number >= 0, got {aversion}"
            )));
        }
    }
    Ok(())
}
