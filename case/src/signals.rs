//! Case-signal inputs: the per-player figures a payoff matrix is built from

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stratagem_engine::{EngineError, Player, Result};

/// Nested `{own_strategy: {opponent_strategy: value}}` lookup
pub type PairTable = BTreeMap<String, BTreeMap<String, f64>>;

/// A player as named in a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerSpec {
    pub name: String,
    pub strategies: Vec<String>,
}

impl PlayerSpec {
    pub fn to_player(&self) -> Result<Player> {
        Player::new(self.name.clone(), self.strategies.clone())
    }
}

/// Outcome signals for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseSignals {
    /// Value at stake if this player prevails
    pub base_value: f64,
    /// Probability used for any strategy pair without its own entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub success_probability_by_pair: PairTable,
    /// Cost of pursuing each of this player's strategies
    pub cost_per_strategy: BTreeMap<String, f64>,
    /// Time cost of each strategy pair; missing pairs cost nothing
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub delay_penalty_by_pair: PairTable,
}

impl CaseSignals {
    /// Check the signals against the player they describe and its opponent.
    pub fn validate(&self, own: &Player, opponent: &Player) -> Result<()> {
        let name = own.name();
        if !self.base_value.is_finite() {
            return Err(EngineError::validation(format!(
                "case_signals.{name}.base_value must be finite"
            )));
        }
        if let Some(p) = self.success_probability {
            check_probability(p, || format!("case_signals.{name}.success_probability"))?;
        }

        check_pair_table(&self.success_probability_by_pair, own, opponent, "success_probability_by_pair")?;
        for (own_label, row) in &self.success_probability_by_pair {
            for (opp_label, &p) in row {
                check_probability(p, || {
                    format!("case_signals.{name}.success_probability_by_pair.{own_label}.{opp_label}")
                })?;
            }
        }

        check_pair_table(&self.delay_penalty_by_pair, own, opponent, "delay_penalty_by_pair")?;
        for (own_label, row) in &self.delay_penalty_by_pair {
            for (opp_label, penalty) in row {
                if !penalty.is_finite() {
                    return Err(EngineError::validation(format!(
                        "case_signals.{name}.delay_penalty_by_pair.{own_label}.{opp_label} must be finite"
                    )));
                }
            }
        }

        for label in self.cost_per_strategy.keys() {
            if own.strategy_index(label).is_none() {
                return Err(EngineError::validation(format!(
                    "case_signals.{name}.cost_per_strategy names unknown strategy '{label}'"
                )));
            }
        }
        for label in own.strategies() {
            match self.cost_per_strategy.get(label) {
                None => {
                    return Err(EngineError::validation(format!(
                        "case_signals.{name}.cost_per_strategy is missing strategy '{label}'"
                    )))
                }
                Some(cost) if !cost.is_finite() => {
                    return Err(EngineError::validation(format!(
                        "case_signals.{name}.cost_per_strategy.{label} must be finite"
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Success probability of `own` against `opponent`, falling back to the
    /// scalar probability when the pair has no entry.
    pub fn success_probability(&self, own: &str, opponent: &str) -> Option<f64> {
        self.success_probability_by_pair
            .get(own)
            .and_then(|row| row.get(opponent))
            .copied()
            .or(self.success_probability)
    }

    pub fn delay_penalty(&self, own: &str, opponent: &str) -> f64 {
        self.delay_penalty_by_pair
            .get(own)
            .and_then(|row| row.get(opponent))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn cost(&self, own: &str) -> f64 {
        self.cost_per_strategy.get(own).copied().unwrap_or(0.0)
    }
}

fn check_probability(p: f64, field: impl FnOnce() -> String) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(EngineError::validation(format!("{} must be in [0, 1], got {p}", field())))
    }
}

fn check_pair_table(table: &PairTable, own: &Player, opponent: &Player, field: &str) -> Result<()> {
    for (own_label, row) in table {
        if own.strategy_index(own_label).is_none() {
            return Err(EngineError::validation(format!(
                "case_signals.{}.{field} names unknown strategy '{own_label}'",
                own.name()
            )));
        }
        for opp_label in row.keys() {
            if opponent.strategy_index(opp_label).is_none() {
                return Err(EngineError::validation(format!(
                    "case_signals.{}.{field}.{own_label} names unknown opponent strategy '{opp_label}'",
                    own.name()
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, strategies: &[&str]) -> Player {
        Player::new(name, strategies.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn signals() -> CaseSignals {
        serde_json::from_str(
            r#"{
                "base_value": 100.0,
                "success_probability": 0.5,
                "success_probability_by_pair": {"litigate": {"settle": 0.9}},
                "cost_per_strategy": {"litigate": 20.0, "settle": 5.0}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_pair_probability_falls_back_to_scalar() {
        let s = signals();
        assert_eq!(s.success_probability("litigate", "settle"), Some(0.9));
        assert_eq!(s.success_probability("settle", "settle"), Some(0.5));
        let no_scalar = CaseSignals {
            success_probability: None,
            ..signals()
        };
        assert_eq!(no_scalar.success_probability("settle", "litigate"), None);
        assert_eq!(s.delay_penalty("litigate", "settle"), 0.0);
    }

    #[test]
    fn test_validate_accepts_well_formed_signals() {
        let own = player("plaintiff", &["litigate", "settle"]);
        let opp = player("defendant", &["litigate", "settle"]);
        assert!(signals().validate(&own, &opp).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_probability() {
        let own = player("plaintiff", &["litigate", "settle"]);
        let opp = player("defendant", &["litigate", "settle"]);
        let mut bad = signals();
        bad.success_probability_by_pair
            .get_mut("litigate")
            .unwrap()
            .insert("litigate".into(), 1.5);
        let err = bad.validate(&own, &opp).unwrap_err();
        assert!(err.to_string().contains("litigate.litigate"));
    }

    #[test]
    fn test_validate_requires_every_cost() {
        let own = player("plaintiff", &["litigate", "settle", "mediate"]);
        let opp = player("defendant", &["litigate", "settle"]);
        let err = signals().validate(&own, &opp).unwrap_err();
        assert!(err.to_string().contains("missing strategy 'mediate'"));
    }

    #[test]
    fn test_validate_rejects_unknown_opponent_strategy() {
        let own = player("plaintiff", &["litigate", "settle"]);
        let opp = player("defendant", &["litigate", "mediate"]);
        let err = signals().validate(&own, &opp).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let parsed: std::result::Result<CaseSignals, _> =
            serde_json::from_str(r#"{"base_value": 1.0, "cost_per_strategy": {}, "damages": 3}"#);
        assert!(parsed.is_err());
    }
}
