//! Performance benchmarks for the Benefit Engine.
//!
//! This benchmark suite covers:
//! - A single childcare calculation called directly
//! - Direct versus itemized wage input
//! - A childcare request through the HTTP router
//! - A batch of 100 childcare requests through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use benefit_engine::api::{create_router, AppState};
use benefit_engine::calculation::{calculate, resolve_policy};
use benefit_engine::config::ConfigLoader;
use benefit_engine::models::{CalculationInput, OffsetRule, WageInput, example_income_items};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/benefits").expect("Failed to load config");
    AppState::new(config)
}

fn create_input(wage: WageInput, hours_after: i64) -> CalculationInput {
    CalculationInput {
        start_date: None,
        end_date: None,
        hours_before: Decimal::from(40),
        hours_after: Decimal::from(hours_after),
        wage,
        proration_ratio: Decimal::new(4839, 4),
        policy: resolve_policy("2026-01-01").expect("valid date"),
        offset: Some(OffsetRule::default()),
    }
}

fn create_form(hours_after: u32) -> String {
    serde_json::json!({
        "start_date": "2026-01-01",
        "end_date": "2026-01-15",
        "hours_before": "40",
        "hours_after": hours_after.to_string(),
        "ordinary_wage": "3,000,000",
        "total_monthly_pay": "3,400,000",
        "auto_policy": true,
        "auto_ratio": true,
        "apply_offset": true
    })
    .to_string()
}

/// Benchmark: Single childcare calculation without the HTTP layer.
fn bench_calculate(c: &mut Criterion) {
    let input = create_input(
        WageInput::Direct {
            ordinary_wage: Decimal::from(3_000_000),
            company_paid_override: None,
        },
        25,
    );

    c.bench_function("calculate_direct", |b| {
        b.iter(|| black_box(calculate(black_box(&input))))
    });
}

/// Benchmark: Direct versus itemized wage input.
fn bench_wage_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("wage_modes");

    let inputs = [
        (
            "direct",
            create_input(
                WageInput::Direct {
                    ordinary_wage: Decimal::from(3_000_000),
                    company_paid_override: Some(Decimal::from(3_400_000)),
                },
                30,
            ),
        ),
        (
            "detailed",
            create_input(
                WageInput::Detailed {
                    items: example_income_items(),
                },
                30,
            ),
        ),
    ];

    for (name, input) in &inputs {
        group.bench_with_input(BenchmarkId::new("calculate", name), input, |b, input| {
            b.iter(|| black_box(calculate(black_box(input))))
        });
    }

    group.finish();
}

/// Benchmark: One childcare request through the router.
fn bench_childcare_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_form(25);

    c.bench_function("childcare_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/childcare/calculate")
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

/// Benchmark: Batch of 100 childcare requests with varying hours.
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let requests: Vec<String> = (0..100).map(|i| create_form(15 + i % 25)).collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/childcare/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_calculate,
    bench_wage_modes,
    bench_childcare_request,
    bench_batch_100,
);
criterion_main!(benches);
