//! Bargaining analysis: BATNA, zone of possible agreement, Nash bargaining point
//!
//! Complements the equilibrium view with the classic two-party negotiation
//! frame. Figures are in the same currency unit as the judgment.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::trail::{ExplanationTrail, StageRecorder};

pub const STAGE: &str = "bargaining";

fn default_power() -> f64 {
    0.5
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BargainingInputs {
    /// Probability the plaintiff prevails at trial
    pub win_probability: f64,
    /// Judgment awarded if the plaintiff prevails
    pub expected_judgment: f64,
    pub plaintiff_trial_costs: f64,
    pub defendant_trial_costs: f64,
    /// Plaintiff's share of the surplus; 0.5 splits the zone evenly
    #[serde(default = "default_power")]
    pub plaintiff_bargaining_power: f64,
}

impl BargainingInputs {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("win_probability", self.win_probability),
            ("plaintiff_bargaining_power", self.plaintiff_bargaining_power),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::validation(format!("{name} must be in [0, 1], got {value}")));
            }
        }
        if !self.expected_judgment.is_finite() {
            return Err(EngineError::validation("expected_judgment must be finite"));
        }
        for (name, value) in [
            ("plaintiff_trial_costs", self.plaintiff_trial_costs),
            ("defendant_trial_costs", self.defendant_trial_costs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::validation(format!("{name} must be a finite number >= 0, got {value}")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgreementZone {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BargainingAnalysis {
    /// Least the plaintiff should accept: expected trial value net of costs
    pub plaintiff_batna: f64,
    /// Most the defendant should pay: expected judgment plus its own costs
    pub defendant_batna: f64,
    pub zopa: Option<AgreementZone>,
    pub nash_solution: Option<f64>,
}

/// Compute BATNAs, the agreement zone and the Nash bargaining point.
/// Appends one `bargaining` entry to `trail`.
pub fn analyze_bargaining(inputs: &BargainingInputs, trail: &mut ExplanationTrail) -> Result<BargainingAnalysis> {
    let mut stage = StageRecorder::begin(STAGE, json!(inputs));
    let result = inputs.validate().map(|()| {
        let expected_award = inputs.win_probability * inputs.expected_judgment;
        let plaintiff_batna = expected_award - inputs.plaintiff_trial_costs;
        let defendant_batna = expected_award + inputs.defendant_trial_costs;

        let zopa = (plaintiff_batna <= defendant_batna).then_some(AgreementZone {
            low: plaintiff_batna,
            high: defendant_batna,
        });
        let nash_solution =
            zopa.map(|z| z.low + inputs.plaintiff_bargaining_power * (z.high - z.low));
        match zopa {
            Some(z) => stage.note(format!("agreement zone spans {:.2}", z.high - z.low)),
            None => stage.note("no zone of possible agreement"),
        }
        debug!(plaintiff_batna, defendant_batna, ?nash_solution, "bargaining analysis complete");

        BargainingAnalysis {
            plaintiff_batna,
            defendant_batna,
            zopa,
            nash_solution,
        }
    });
    stage.finish_with(trail, &result);
    result
}
