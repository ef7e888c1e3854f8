//! Game model definitions
//!
//! This module defines the two-player normal-form game the engine reasons
//! about: players, their strategy lists, the payoff matrix, and the
//! equilibria found on it. Everything is immutable once constructed.
//! Strategies are addressed by index within their player's list; labels are
//! carried for display only and are never used for comparison.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Hard upper bound on strategies per player.
///
/// Support enumeration is exponential in this number, so the bound is
/// enforced when a player is constructed.
pub const MAX_STRATEGIES: usize = 6;

/// Tolerance for probability vectors summing to one
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Index of a strategy within its player's list
pub type StrategyIndex = usize;

/// Seat of a player in a two-player game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// Chooses the row of the payoff matrix (first player)
    Row,
    /// Chooses the column of the payoff matrix (second player)
    Column,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::Row, Seat::Column];

    /// Get the opponent of this seat
    pub fn opponent(self) -> Seat {
        match self {
            Seat::Row => Seat::Column,
            Seat::Column => Seat::Row,
        }
    }

    /// Position of this seat inside payoff tuples
    pub fn index(self) -> usize {
        match self {
            Seat::Row => 0,
            Seat::Column => 1,
        }
    }
}

/// A negotiating party and its ordered strategy list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    name: String,
    strategies: Vec<String>,
}

impl Player {
    /// Create a player. Fails on an empty name, zero strategies, more than
    /// `MAX_STRATEGIES` strategies, or duplicate/blank labels.
    pub fn new(name: impl Into<String>, strategies: Vec<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EngineError::validation("player name must not be empty"));
        }
        if strategies.is_empty() {
            return Err(EngineError::validation(format!(
                "player '{name}' declares zero strategies"
            )));
        }
        if strategies.len() > MAX_STRATEGIES {
            return Err(EngineError::validation(format!(
                "player '{name}' declares {} strategies, at most {MAX_STRATEGIES} are supported",
                strategies.len()
            )));
        }
        for (idx, label) in strategies.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(EngineError::validation(format!(
                    "player '{name}' has a blank strategy label at index {idx}"
                )));
            }
            if strategies[..idx].contains(label) {
                return Err(EngineError::validation(format!(
                    "player '{name}' lists strategy '{label}' twice"
                )));
            }
        }
        Ok(Player { name, strategies })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategies(&self) -> &[String] {
        &self.strategies
    }

    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    pub fn strategy_label(&self, index: StrategyIndex) -> Option<&str> {
        self.strategies.get(index).map(String::as_str)
    }

    pub fn strategy_index(&self, label: &str) -> Option<StrategyIndex> {
        self.strategies.iter().position(|s| s == label)
    }
}

/// Two-player payoff matrix
///
/// Cells are stored row-major in a flat array: `cells[row * cols + col]`
/// holds `[row player payoff, column player payoff]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffModel {
    players: [Player; 2],
    rows: usize,
    cols: usize,
    cells: Vec<[f64; 2]>,
}

impl PayoffModel {
    /// Build a model from nested rows of `[row payoff, column payoff]` cells.
    ///
    /// Dimensions must match the strategy counts and every payoff must be finite.
    pub fn new(
        row_player: Player,
        column_player: Player,
        matrix: Vec<Vec<[f64; 2]>>,
    ) -> Result<Self> {
        let rows = row_player.strategy_count();
        let cols = column_player.strategy_count();
        if matrix.len() != rows {
            return Err(EngineError::validation(format!(
                "payoff matrix has {} rows but '{}' declares {rows} strategies",
                matrix.len(),
                row_player.name()
            )));
        }
        if row_player.name() == column_player.name() {
            return Err(EngineError::validation(format!(
                "both players are named '{}'",
                row_player.name()
            )));
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (i, row) in matrix.into_iter().enumerate() {
            if row.len() != cols {
                return Err(EngineError::validation(format!(
                    "payoff matrix row {i} has {} cells but '{}' declares {cols} strategies",
                    row.len(),
                    column_player.name()
                )));
            }
            for (j, cell) in row.into_iter().enumerate() {
                if !cell.iter().all(|v| v.is_finite()) {
                    return Err(EngineError::validation(format!(
                        "payoff at ({i}, {j}) is not a finite number"
                    )));
                }
                cells.push(cell);
            }
        }

        Ok(PayoffModel {
            players: [row_player, column_player],
            rows,
            cols,
            cells,
        })
    }

    /// Build a model from a bare game matrix, naming the players `player1`
    /// and `player2` and their strategies `s0`, `s1`, ...
    pub fn from_game_matrix(matrix: Vec<Vec<[f64; 2]>>) -> Result<Self> {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);
        let row_player = Player::new("player1", default_labels(rows))?;
        let column_player = Player::new("player2", default_labels(cols))?;
        Self::new(row_player, column_player, matrix)
    }

    /// Build a model from one payoff matrix per player (both rows × cols)
    pub fn from_split_matrices(row_payoffs: &[Vec<f64>], column_payoffs: &[Vec<f64>]) -> Result<Self> {
        if row_payoffs.len() != column_payoffs.len() {
            return Err(EngineError::validation(format!(
                "player matrices have {} and {} rows",
                row_payoffs.len(),
                column_payoffs.len()
            )));
        }
        let matrix = row_payoffs
            .iter()
            .zip(column_payoffs)
            .enumerate()
            .map(|(i, (r, c))| {
                if r.len() != c.len() {
                    return Err(EngineError::validation(format!(
                        "row {i} has {} payoffs for player1 but {} for player2",
                        r.len(),
                        c.len()
                    )));
                }
                Ok(r.iter().zip(c).map(|(&a, &b)| [a, b]).collect())
            })
            .collect::<Result<Vec<Vec<[f64; 2]>>>>()?;
        Self::from_game_matrix(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Seat of the player with the given name
    pub fn seat_of(&self, name: &str) -> Option<Seat> {
        Seat::BOTH
            .into_iter()
            .find(|&seat| self.player(seat).name() == name)
    }

    pub fn strategy_count(&self, seat: Seat) -> usize {
        match seat {
            Seat::Row => self.rows,
            Seat::Column => self.cols,
        }
    }

    pub fn is_two_by_two(&self) -> bool {
        self.rows == 2 && self.cols == 2
    }

    /// Both payoffs at `(row, col)`
    pub fn payoffs(&self, row: StrategyIndex, col: StrategyIndex) -> [f64; 2] {
        self.cells[row * self.cols + col]
    }

    /// One seat's payoff at `(row, col)`
    pub fn payoff(&self, seat: Seat, row: StrategyIndex, col: StrategyIndex) -> f64 {
        self.payoffs(row, col)[seat.index()]
    }

    /// The matrix as nested rows of `[row payoff, column payoff]`
    pub fn game_matrix(&self) -> Vec<Vec<[f64; 2]>> {
        self.cells.chunks(self.cols).map(<[_]>::to_vec).collect()
    }
}

fn default_labels(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("s{i}")).collect()
}

/// A Nash equilibrium of a `PayoffModel`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Equilibrium {
    Pure {
        strategy_indices: (StrategyIndex, StrategyIndex),
        payoffs: (f64, f64),
        /// Either player's best response at this cell is tied
        degenerate: bool,
    },
    Mixed {
        player1_probabilities: Vec<f64>,
        player2_probabilities: Vec<f64>,
        expected_payoffs: (f64, f64),
        /// Probability-weighted squared deviation of each player's realized payoff
        payoff_variance: (f64, f64),
        /// Lowest payoff each player realizes with positive probability
        worst_case_payoffs: (f64, f64),
        /// Not a verified equilibrium (uniform fallback)
        degenerate: bool,
    },
}

impl Equilibrium {
    pub fn pure(model: &PayoffModel, row: StrategyIndex, col: StrategyIndex, degenerate: bool) -> Self {
        let [p1, p2] = model.payoffs(row, col);
        Equilibrium::Pure {
            strategy_indices: (row, col),
            payoffs: (p1, p2),
            degenerate,
        }
    }

    /// Build a mixed profile, checking both distributions and deriving the
    /// expected payoffs, variance proxy and worst realized payoff per player.
    pub fn mixed(
        model: &PayoffModel,
        player1_probabilities: Vec<f64>,
        player2_probabilities: Vec<f64>,
        degenerate: bool,
    ) -> Result<Self> {
        if player1_probabilities.len() != model.rows() || player2_probabilities.len() != model.cols() {
            return Err(EngineError::validation(format!(
                "mixed profile has {}×{} probabilities for a {}×{} game",
                player1_probabilities.len(),
                player2_probabilities.len(),
                model.rows(),
                model.cols()
            )));
        }
        check_distribution(&player1_probabilities)?;
        check_distribution(&player2_probabilities)?;

        let mut outcomes = Vec::with_capacity(model.rows() * model.cols());
        for (i, &p) in player1_probabilities.iter().enumerate() {
            for (j, &q) in player2_probabilities.iter().enumerate() {
                outcomes.push((p * q, model.payoffs(i, j)));
            }
        }

        let mut expected = [0.0_f64; 2];
        for (weight, cell) in &outcomes {
            expected[0] += weight * cell[0];
            expected[1] += weight * cell[1];
        }
        let mut variance = [0.0_f64; 2];
        let mut worst = [f64::INFINITY; 2];
        for (weight, cell) in outcomes.iter().filter(|(weight, _)| *weight > 0.0) {
            for k in 0..2 {
                variance[k] += weight * (cell[k] - expected[k]).powi(2);
                worst[k] = worst[k].min(cell[k]);
            }
        }

        Ok(Equilibrium::Mixed {
            player1_probabilities,
            player2_probabilities,
            expected_payoffs: (expected[0], expected[1]),
            payoff_variance: (variance[0], variance[1]),
            worst_case_payoffs: (worst[0], worst[1]),
            degenerate,
        })
    }

    pub fn is_pure(&self) -> bool {
        matches!(self, Equilibrium::Pure { .. })
    }

    pub fn is_degenerate(&self) -> bool {
        match self {
            Equilibrium::Pure { degenerate, .. } | Equilibrium::Mixed { degenerate, .. } => *degenerate,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Equilibrium::Pure { .. } => "pure",
            Equilibrium::Mixed { .. } => "mixed",
        }
    }

    pub fn expected_payoffs(&self) -> (f64, f64) {
        match self {
            Equilibrium::Pure { payoffs, .. } => *payoffs,
            Equilibrium::Mixed { expected_payoffs, .. } => *expected_payoffs,
        }
    }

    pub fn expected_payoff(&self, seat: Seat) -> f64 {
        pick(self.expected_payoffs(), seat)
    }

    /// Variance proxy for `seat`; zero for a pure equilibrium
    pub fn payoff_variance(&self, seat: Seat) -> f64 {
        match self {
            Equilibrium::Pure { .. } => 0.0,
            Equilibrium::Mixed { payoff_variance, .. } => pick(*payoff_variance, seat),
        }
    }

    /// Lowest payoff `seat` can realize under this profile
    pub fn worst_case_payoff(&self, seat: Seat) -> f64 {
        match self {
            Equilibrium::Pure { payoffs, .. } => pick(*payoffs, seat),
            Equilibrium::Mixed { worst_case_payoffs, .. } => pick(*worst_case_payoffs, seat),
        }
    }

    /// Total number of strategies played with positive probability
    pub fn support_size(&self) -> usize {
        match self {
            Equilibrium::Pure { .. } => 2,
            Equilibrium::Mixed {
                player1_probabilities,
                player2_probabilities,
                ..
            } => player1_probabilities
                .iter()
                .chain(player2_probabilities)
                .filter(|&&p| p > 0.0)
                .count(),
        }
    }
}

fn pick(pair: (f64, f64), seat: Seat) -> f64 {
    match seat {
        Seat::Row => pair.0,
        Seat::Column => pair.1,
    }
}

/// Check that `probabilities` lie in [0, 1] and sum to one within
/// `PROBABILITY_TOLERANCE`.
pub fn check_distribution(probabilities: &[f64]) -> Result<()> {
    if let Some(bad) = probabilities
        .iter()
        .find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0)
    {
        return Err(EngineError::validation(format!(
            "probability {bad} is outside [0, 1]"
        )));
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(EngineError::validation(format!(
            "probabilities sum to {total}, expected 1"
        )));
    }
    Ok(())
}
