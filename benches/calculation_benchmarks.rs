//! Performance benchmarks for the pay component engine.
//!
//! Covers the hot paths of a payroll run:
//! - Formula parsing and evaluation
//! - Per-component dispatch
//! - Component runs over the default catalogue, directly and over HTTP
//! - Batches of employees
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use pay_component_engine::api::{AppState, create_router};
use pay_component_engine::calculation::{compute_amount, run_components};
use pay_component_engine::config::ConfigLoader;
use pay_component_engine::formula::{eval, parse};
use pay_component_engine::models::NumericContext;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const FORMULAS: &[(&str, &str)] = &[
    ("linear", "basic * 0.055"),
    ("capped", "max(min(basic * 0.0550, 500), 100)"),
    ("overtime", "basic / 176 * 1.5"),
    ("conditional", "gross * 0.02 if gross > 5000 else round(basic * 0.01)"),
];

/// Loads the default configuration.
fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn context(basic: i64) -> NumericContext {
    NumericContext::new(Decimal::new(basic, 0), Decimal::new(basic * 6 / 5, 0))
        .expect("valid context")
}

/// Benchmark: Parsing each formula shape.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, formula) in FORMULAS {
        group.bench_with_input(BenchmarkId::from_parameter(name), formula, |b, formula| {
            b.iter(|| black_box(parse(black_box(formula))))
        });
    }
    group.finish();
}

/// Benchmark: Evaluating an already-parsed formula.
fn bench_evaluate(c: &mut Criterion) {
    let ctx = context(5000);
    let mut group = c.benchmark_group("evaluate");
    for (name, formula) in FORMULAS {
        let ast = parse(formula).expect("benchmark formula parses");
        group.bench_with_input(BenchmarkId::from_parameter(name), &ast, |b, ast| {
            b.iter(|| black_box(eval(black_box(ast), &ctx)))
        });
    }
    group.finish();
}

/// Benchmark: Dispatching every catalogue component once.
fn bench_dispatch(c: &mut Criterion) {
    let config = load_config();
    let ctx = context(5000);

    c.bench_function("dispatch_catalogue", |b| {
        b.iter(|| {
            for component in config.components() {
                black_box(compute_amount(component, &ctx));
            }
        })
    });
}

/// Benchmark: A full component run for one employee.
fn bench_component_run(c: &mut Criterion) {
    let config = load_config();
    let ctx = context(5000);

    c.bench_function("component_run", |b| {
        b.iter(|| black_box(run_components(config.components(), black_box(&ctx))))
    });
}

/// Benchmark: Component runs for a batch of employees.
fn bench_batch(c: &mut Criterion) {
    let config = load_config();
    let contexts: Vec<NumericContext> = (0..1000).map(|i| context(2000 + i * 10)).collect();

    let mut group = c.benchmark_group("batch_processing");
    for size in [100_usize, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("employees", size), &size, |b, &size| {
            b.iter(|| {
                let runs: Vec<_> = contexts[..size]
                    .iter()
                    .map(|ctx| run_components(config.components(), ctx))
                    .collect();
                black_box(runs)
            })
        });
    }
    group.finish();
}

/// Benchmark: A component run through the HTTP router.
fn bench_http_compute(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::json!({"basic": "5000", "gross": "6000"}).to_string();

    c.bench_function("http_compute", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/components/compute")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_evaluate,
    bench_dispatch,
    bench_component_run,
    bench_batch,
    bench_http_compute,
);
criterion_main!(benches);
