//! Performance benchmarks for the Leave Policy Allocation Engine.
//!
//! Covers the `/calculate` preview endpoint, the pure per-policy calculation
//! and bulk assignment over growing employee counts.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, NaiveDate};
use leave_engine::api::{AppState, create_router};
use leave_engine::calculation::{AllocationContext, calculate_policy_allocations};
use leave_engine::config::ConfigLoader;
use leave_engine::error::EngineResult;
use leave_engine::models::{AssignmentBasis, AssignmentData, Employee, LeaveType};
use leave_engine::service::AllocationService;
use leave_engine::store::{InMemoryStore, LeaveTypeSource};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Creates a preview request for a mid-period joiner on an earned leave type.
fn create_calculate_body() -> String {
    serde_json::json!({
        "leave_type": {
            "name": "Privilege Leave",
            "is_earned_leave": true,
            "allocate_on_day": "date_of_joining",
            "rounding": "0.5"
        },
        "annual_allocation": "18",
        "assignment_based_on": "leave_period",
        "effective_from": "2025-01-01",
        "effective_to": "2025-12-31",
        "date_of_joining": "2025-03-10",
        "reference_date": "2025-09-15"
    })
    .to_string()
}

/// Creates a service whose store holds `employee_count` employees with
/// staggered joining dates.
fn create_service(
    config: &ConfigLoader,
    employee_count: usize,
) -> AllocationService<InMemoryStore, Vec<LeaveType>> {
    let store = InMemoryStore::new();
    config.seed_store(&store).unwrap();
    for i in 0..employee_count {
        store
            .insert_employee(Employee {
                id: format!("EMP-B{:05}", i),
                employee_name: format!("Bench Employee {}", i),
                date_of_joining: date(2024, 6, 1) + Duration::days((i % 365) as i64),
            })
            .unwrap();
    }
    let leave_types = config.fetch_leave_types().unwrap();
    AllocationService::new(store, leave_types, config.settings().float_precision)
}

/// Benchmark: Single `/calculate` preview through the router.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()).unwrap());
    let body = create_calculate_body();

    c.bench_function("calculate_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
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

/// Benchmark: Pure calculation of every leave type in a policy.
fn bench_policy_allocations(c: &mut Criterion) {
    let config = load_config();
    let policy = config.get_leave_policy("Standard Policy").unwrap().clone();
    let ctx = AllocationContext::new(
        Some(AssignmentBasis::LeavePeriod),
        date(2025, 1, 1),
        date(2025, 12, 31),
        date(2025, 3, 10),
        date(2025, 9, 15),
    );
    let lookup = |name: &str| -> EngineResult<LeaveType> { config.get_leave_type(name).cloned() };

    c.bench_function("policy_allocations", |b| {
        b.iter(|| black_box(calculate_policy_allocations(&policy, &ctx, true, lookup).unwrap()))
    });
}

/// Benchmark: Bulk assignment for growing employee counts.
fn bench_bulk_assignment(c: &mut Criterion) {
    let config = load_config();
    let data = AssignmentData {
        assignment_based_on: Some(AssignmentBasis::LeavePeriod),
        leave_policy: "Standard Policy".to_string(),
        effective_from: None,
        effective_to: None,
        leave_period: Some("FY 2025".to_string()),
        carry_forward: true,
    };

    let mut group = c.benchmark_group("bulk_assignment");

    for employee_count in [10usize, 100, 1000] {
        let employees: Vec<String> = (0..employee_count)
            .map(|i| format!("EMP-B{:05}", i))
            .collect();

        group.throughput(Throughput::Elements(employee_count as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employee_count),
            &employees,
            |b, employees| {
                b.iter_batched(
                    || create_service(&config, employees.len()),
                    |service| {
                        black_box(service.create_assignments_for_employees(
                            employees,
                            &data,
                            date(2025, 9, 15),
                        ))
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_calculate_endpoint,
    bench_policy_allocations,
    bench_bulk_assignment,
);
criterion_main!(benches);
