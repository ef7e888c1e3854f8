//! stratagem Engine - Game-theoretic strategy and settlement valuation
//!
//! This crate turns a two-player payoff matrix into Nash equilibria, ranks
//! them under a negotiating objective, and values the chosen equilibrium as
//! a settlement range. Every stage appends to an `ExplanationTrail` so the
//! final figure can be audited step by step.
//!
//! The engine is pure and synchronous: no I/O, no shared mutable state.
//! Every call builds its own model, equilibria and trail.

pub mod bargaining;
pub mod bench;
pub mod config;
pub mod dominance;
pub mod error;
pub mod linalg;
pub mod model;
pub mod recommend;
pub mod settlement;
pub mod solver;
pub mod test_games;
pub mod trail;

pub use bargaining::{analyze_bargaining, BargainingAnalysis, BargainingInputs};
pub use config::{EngineConfig, SolverConfig, TiePolicy, ValuationConfig};
pub use error::{EngineError, ErrorEnvelope, Result};
pub use model::{Equilibrium, PayoffModel, Player, Seat, StrategyIndex, MAX_STRATEGIES};
pub use recommend::{recommend, Objective, Recommendation};
pub use settlement::{SettlementEstimate, SettlementValuator};
pub use solver::EquilibriumSolver;
pub use trail::{ExplanationTrail, TrailEntry};
