//! Performance benchmarks for the meetup engine.
//!
//! This benchmark suite covers:
//! - Expanding one month of the sample directory
//! - Expanding a full year, month by month
//! - Building an `.ics` file for one instance
//! - The pay calculator with growing numbers of days
//! - The month endpoint end to end through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use meetup_engine::api::{AppState, create_router};
use meetup_engine::calculation::{PayInput, calculate_pay};
use meetup_engine::calendar::{expand_month, find_instance};
use meetup_engine::config::ConfigLoader;
use meetup_engine::export::build_ics;
use meetup_engine::models::{CalendarMonth, DayEntry, LineItem};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Loads the sample configuration.
fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/fwf").expect("Failed to load config")
}

/// Creates a pay input with the given number of days, every third one long
/// enough to earn overtime.
fn create_pay_input(day_count: usize) -> PayInput {
    let days = (0..day_count)
        .map(|i| {
            let out_time = if i % 3 == 0 { "21:15" } else { "19:00" };
            DayEntry::new("07:00", out_time, "30").on(&format!("2026-02-{:02}", (i % 28) + 1))
        })
        .collect();

    PayInput {
        day_rate: "350".to_string(),
        miles: "62".to_string(),
        mileage_rate: "0.725".to_string(),
        days,
        line_items: vec![LineItem::new("Hard drive", "89.99"), LineItem::new("Parking", "12")],
    }
}

/// Benchmark: Expand a single month.
fn bench_expand_month(c: &mut Criterion) {
    let loader = load_config();
    let config = loader.config();
    let month = CalendarMonth::new(2026, 3).unwrap();

    c.bench_function("expand_month", |b| {
        b.iter(|| {
            let instances =
                expand_month(black_box(month), config.events(), config.timezone()).unwrap();
            black_box(instances)
        })
    });
}

/// Benchmark: Expand twelve consecutive months.
fn bench_expand_year(c: &mut Criterion) {
    let loader = load_config();
    let config = loader.config();
    let january = CalendarMonth::new(2026, 1).unwrap();

    let mut group = c.benchmark_group("calendar");
    group.throughput(Throughput::Elements(12));
    group.bench_function("expand_year", |b| {
        b.iter(|| {
            let mut month = january;
            let mut total = 0;
            for _ in 0..12 {
                total += expand_month(month, config.events(), config.timezone())
                    .unwrap()
                    .len();
                month = month.next();
            }
            black_box(total)
        })
    });
    group.finish();
}

/// Benchmark: Rebuild an instance from its id and export it.
fn bench_build_ics(c: &mut Criterion) {
    let loader = load_config();
    let config = loader.config();
    let now = Utc.with_ymd_and_hms(2026, 1, 2, 12, 0, 0).unwrap();

    c.bench_function("find_and_build_ics", |b| {
        b.iter(|| {
            let instance = find_instance(
                black_box("fwf-meetup-0-2026-01-06"),
                config.events(),
                config.timezone(),
            )
            .unwrap();
            let org = config.directory().find_by_id(&instance.org_id);
            black_box(build_ics(&instance, org, config.settings(), now).unwrap())
        })
    });
}

/// Benchmark: Pay calculator with various day counts to understand scaling
/// behavior.
fn bench_pay_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("pay_scaling");

    for day_count in [1, 5, 10, 20].iter() {
        let input = create_pay_input(*day_count);

        group.throughput(Throughput::Elements(*day_count as u64));
        group.bench_with_input(BenchmarkId::new("days", day_count), day_count, |b, _| {
            b.iter(|| black_box(calculate_pay(black_box(&input))))
        });
    }

    group.finish();
}

/// Benchmark: Month endpoint through the router.
fn bench_month_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));

    c.bench_function("month_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/calendar/2026/3")
                        .body(Body::empty())
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
    bench_expand_month,
    bench_expand_year,
    bench_build_ics,
    bench_pay_scaling,
    bench_month_endpoint,
);
criterion_main!(benches);
