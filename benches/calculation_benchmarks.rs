//! Performance benchmarks for the payroll engine.
//!
//! Covers the calculation functions directly and through the HTTP router:
//! - Single monthly payroll
//! - Single severance settlement
//! - Payroll runs of 100 and 1000 employees
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use nomina_engine::api::{create_router, AppState};
use nomina_engine::calculation::{
    calculate_monthly_payroll, calculate_payroll_run, calculate_severance,
};
use nomina_engine::config::{ConfigLoader, StatutoryRateTable};
use nomina_engine::models::{Employee, TerminationCause};

use axum::{body::Body, http::Request, Router};
use tower::ServiceExt;

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/do").expect("Failed to load config");
    AppState::new(config)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Salaries spread across the exempt bracket and both contribution caps.
fn salary_for(i: usize) -> Decimal {
    Decimal::new(1_500_000 + (i as i64 % 40) * 1_000_000, 2)
}

fn create_employee(i: usize) -> Employee {
    Employee {
        id: format!("emp_{:04}", i),
        full_name: format!("Empleado {}", i),
        national_id: "001-0000000-1".to_string(),
        hire_date: date(2015 + (i % 9) as i32, 1 + (i % 12) as u32, 1),
        monthly_salary: salary_for(i),
        is_active: i % 25 != 0,
        job_title: None,
    }
}

fn employee_json(i: usize) -> serde_json::Value {
    let employee = create_employee(i);
    serde_json::json!({
        "id": employee.id,
        "full_name": employee.full_name,
        "national_id": employee.national_id,
        "hire_date": employee.hire_date,
        "monthly_salary": employee.monthly_salary,
        "is_active": employee.is_active
    })
}

async fn post(router: Router, uri: &str, body: String) -> axum::response::Response {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Benchmark: calculation functions without the HTTP layer.
fn bench_direct_calculations(c: &mut Criterion) {
    let table = StatutoryRateTable::dominican_republic_2024();
    let employee = create_employee(7);
    let termination = date(2024, 6, 15);

    let mut group = c.benchmark_group("direct");

    group.bench_function("monthly_payroll", |b| {
        b.iter(|| calculate_monthly_payroll(black_box(&employee), black_box(&table)))
    });

    group.bench_function("severance", |b| {
        b.iter(|| {
            calculate_severance(
                black_box(&employee),
                black_box(termination),
                TerminationCause::EmployerNoticeTermination,
                black_box(&table),
            )
        })
    });

    group.finish();
}

/// Benchmark: single monthly payroll request.
fn bench_monthly_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "employee": employee_json(7),
        "period": "2024-06-30"
    })
    .to_string();

    c.bench_function("monthly_request", |b| {
        b.to_async(&rt).iter(|| async {
            black_box(post(router.clone(), "/payroll/monthly", body.clone()).await)
        })
    });
}

/// Benchmark: single severance request.
fn bench_severance_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "employee": employee_json(7),
        "termination_date": "2024-06-15",
        "cause": "desahucio"
    })
    .to_string();

    c.bench_function("severance_request", |b| {
        b.to_async(&rt).iter(|| async {
            black_box(post(router.clone(), "/payroll/severance", body.clone()).await)
        })
    });
}

/// Benchmark: payroll runs at increasing headcount.
fn bench_payroll_run(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let table = StatutoryRateTable::dominican_republic_2024();
    let period = date(2024, 6, 30);

    let mut group = c.benchmark_group("payroll_run");

    for headcount in [100usize, 1000] {
        let employees: Vec<Employee> = (0..headcount).map(create_employee).collect();
        let body = serde_json::json!({
            "period": "2024-06-30",
            "employees": (0..headcount).map(employee_json).collect::<Vec<_>>()
        })
        .to_string();

        group.throughput(Throughput::Elements(headcount as u64));
        if headcount >= 1000 {
            group.sample_size(20);
        }

        group.bench_with_input(
            BenchmarkId::new("direct", headcount),
            &employees,
            |b, employees| b.iter(|| calculate_payroll_run(black_box(employees), period, &table)),
        );

        group.bench_with_input(BenchmarkId::new("http", headcount), &body, |b, body| {
            b.to_async(&rt).iter(|| async {
                black_box(post(router.clone(), "/payroll/run", body.clone()).await)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_direct_calculations,
    bench_monthly_request,
    bench_severance_request,
    bench_payroll_run,
);
criterion_main!(benches);
