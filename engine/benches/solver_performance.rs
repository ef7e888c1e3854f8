//! Criterion benchmarks for equilibrium solver throughput

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use stratagem_engine::bench::generate_games;
use stratagem_engine::recommend::{recommend, Objective};
use stratagem_engine::test_games::{battle_of_sexes, rock_paper_scissors};
use stratagem_engine::{EquilibriumSolver, ExplanationTrail, Seat, SettlementValuator};

fn benchmark_two_by_two_solve(c: &mut Criterion) {
    let model = battle_of_sexes();
    let solver = EquilibriumSolver::default();
    c.bench_function("solve_2x2_with_mixed", |b| {
        b.iter_batched(
            ExplanationTrail::new,
            |mut trail| {
                let eqs = solver.solve(black_box(&model), true, &mut trail);
                black_box(eqs)
            },
            BatchSize::SmallInput,
        )
    });
}

fn benchmark_support_enumeration(c: &mut Criterion) {
    let model = rock_paper_scissors();
    let solver = EquilibriumSolver::default();
    c.bench_function("solve_3x3_support_enumeration", |b| {
        b.iter_batched(
            ExplanationTrail::new,
            |mut trail| {
                let eqs = solver.solve(black_box(&model), true, &mut trail);
                black_box(eqs)
            },
            BatchSize::SmallInput,
        )
    });
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let games = generate_games(64);
    let solver = EquilibriumSolver::default();
    let valuator = SettlementValuator::default();
    c.bench_function("pipeline_64_generated_games", |b| {
        b.iter(|| {
            for model in &games {
                let mut trail = ExplanationTrail::new();
                let Ok(eqs) = solver.solve(model, true, &mut trail) else {
                    continue;
                };
                let objective = Objective::MaxExpectedValue { player: Seat::Row };
                if let Ok(rec) = recommend(&eqs, objective, &mut trail) {
                    black_box(valuator.valuate(&rec, 0.2, &mut trail).ok());
                }
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_two_by_two_solve,
    benchmark_support_enumeration,
    benchmark_full_pipeline,
);
criterion_main!(benches);
