//! stratagem Case - Turns negotiation inputs into games and runs the analysis
//!
//! Requests name the players, their strategies and either per-player case
//! signals or a ready-made payoff matrix. This crate builds the payoff model
//! and drives the engine stages over it.

pub mod analysis;
pub mod builder;
pub mod request;
pub mod signals;

pub use analysis::{analyze, analyze_str, parse_request, solve_request, solve_str};
pub use builder::{build, build_from_matrix};
pub use request::{AnalysisRequest, AnalysisResponse, ObjectiveKind, ObjectiveSpec, SolveRequest, SolveResponse};
pub use signals::{CaseSignals, PlayerSpec};
