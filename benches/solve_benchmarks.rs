//! Benchmarks for solving Karnaugh map requests
//!
//! Covers the bundled minimizer on its own and the full request pipeline,
//! for each supported map size and both cover strategies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kmap_logic::{
    CoverStrategy, EspressoMinimizer, Form, KmapConfig, Minimizer, MinimizerConfig, SolveRequest,
    Solver,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A fixed pseudo-random function over `num_vars` variables
fn function(num_vars: usize, seed: u32) -> (BTreeSet<u32>, BTreeSet<u32>) {
    let mut state = seed;
    let mut on = BTreeSet::new();
    let mut dc = BTreeSet::new();
    for index in 0..1u32 << num_vars {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        match (state >> 16) % 5 {
            0 | 1 => {
                on.insert(index);
            }
            2 => {
                dc.insert(index);
            }
            _ => {}
        }
    }
    (on, dc)
}

fn bench_minimizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    for strategy in [CoverStrategy::Exact, CoverStrategy::Heuristic] {
        let minimizer = EspressoMinimizer::new(MinimizerConfig { strategy });
        for num_vars in 2..=4 {
            let variables: Vec<Arc<str>> = ["a", "b", "c", "d"][..num_vars]
                .iter()
                .map(|&n| Arc::from(n))
                .collect();
            let (on, dc) = function(num_vars, 7);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), num_vars),
                &num_vars,
                |b, _| {
                    b.iter(|| {
                        minimizer
                            .minimize(
                                black_box(&variables),
                                black_box(&on),
                                black_box(&dc),
                                Form::Sop,
                            )
                            .unwrap()
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    let solver = Solver::new(KmapConfig::default());
    let mut group = c.benchmark_group("solve");
    for form in [Form::Sop, Form::Pos] {
        for seed in [1, 2, 3] {
            let (on, dc) = function(4, seed);
            let request = SolveRequest::new()
                .with_variables("a,b,c,d")
                .with_minterms(on)
                .with_dontcares(dc)
                .with_form(form);
            group.bench_with_input(
                BenchmarkId::new(form.as_str(), seed),
                &request,
                |b, request| b.iter(|| solver.respond(black_box(request))),
            );
        }
    }
    group.finish();
}

fn bench_wire(c: &mut Criterion) {
    let solver = Solver::default();
    let body = r#"{
        "variables": "a,b,c,d",
        "minterms": ["0", "2", "5", "7", "8", "10", "13", "15"],
        "dontcares": ["1"],
        "form_type": "POS"
    }"#;
    c.bench_function("json_round_trip", |b| {
        b.iter(|| {
            let request: SolveRequest = serde_json::from_str(black_box(body)).unwrap();
            solver.respond(&request).to_json().unwrap()
        })
    });
}

criterion_group!(benches, bench_minimizer, bench_solver, bench_wire);
criterion_main!(benches);
