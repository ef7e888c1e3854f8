//! Throughput helper for the CLI benchmark command

use std::time::Instant;

use crate::model::PayoffModel;
use crate::solver::EquilibriumSolver;
use crate::trail::ExplanationTrail;

/// Deterministic pseudo-random 3×3 games with integer payoffs in [-10, 10]
pub fn generate_games(sample_size: usize) -> Vec<PayoffModel> {
    let mut seed: u64 = 12345;
    let mut next = || {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345) & 0x7fffffff;
        (seed % 21) as f64 - 10.0
    };

    (0..sample_size)
        .filter_map(|_| {
            let matrix = (0..3)
                .map(|_| (0..3).map(|_| [next(), next()]).collect())
                .collect();
            PayoffModel::from_game_matrix(matrix).ok()
        })
        .collect()
}

/// Solve `sample_size` generated games (mixed search enabled) and return
/// `(solves_per_sec, duration_ms)`.
pub fn benchmark_solver(sample_size: usize) -> (f64, u64) {
    let games = generate_games(sample_size);
    let solver = EquilibriumSolver::default();

    // Warm-up
    for model in games.iter().take(1_000) {
        let mut trail = ExplanationTrail::new();
        let _ = solver.solve(model, true, &mut trail);
    }

    let start = Instant::now();
    for model in &games {
        let mut trail = ExplanationTrail::new();
        let _ = solver.solve(model, true, &mut trail);
    }
    let duration = start.elapsed();

    let solves_per_sec = games.len() as f64 / duration.as_secs_f64().max(f64::EPSILON);
    (solves_per_sec, duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_games_are_reproducible() {
        let a = generate_games(4);
        let b = generate_games(4);
        assert_eq!(a.len(), 4);
        assert_eq!(a, b);
        assert!(a.iter().all(|m| m.rows() == 3 && m.cols() == 3));
    }

    #[test]
    fn test_benchmark_runs() {
        let (rate, _) = benchmark_solver(20);
        assert!(rate > 0.0);
    }
}
