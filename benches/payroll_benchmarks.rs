//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite verifies the hot paths stay fast:
//! - Single entry validation and composition
//! - Summary aggregation over growing record sets
//! - CSV batch ingestion throughput
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use std::str::FromStr;

use payroll_engine::compose::{compose_entry, PayrollDraft, TimestampInput};
use payroll_engine::ingest::{ingest_batch, template_csv};
use payroll_engine::models::{NewEmployee, PayrollRecord, RecordFilter};
use payroll_engine::service::PayrollService;
use payroll_engine::store::MemoryStore;
use payroll_engine::validation::{validate_amounts, GrossBound};
use payroll_engine::aggregate::summarize;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Seeds a service with one employee per index.
fn seeded_service(employees: usize) -> (PayrollService<MemoryStore>, Vec<u64>) {
    let service = PayrollService::new(MemoryStore::new());
    let ids = (0..employees)
        .map(|i| {
            service
                .add_employee(NewEmployee {
                    first_name: format!("Worker{i}"),
                    last_name: "Bench".to_string(),
                    email: format!("worker{i}@example.com"),
                    hire_date: chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                    position: "Laborer".to_string(),
                    status: Default::default(),
                })
                .expect("seed employee")
                .id
        })
        .collect();
    (service, ids)
}

fn draft_for_day(day: u32) -> PayrollDraft {
    PayrollDraft {
        daily_rate: dec("1000.00"),
        allowance: dec("25.00"),
        total_hours_worked: dec("9"),
        overtime_hour: Decimal::ZERO,
        overtime_pay: Decimal::ZERO,
        night_differential_hour: Decimal::ZERO,
        night_differential_pay: Decimal::ZERO,
        deductions: dec("50.00"),
        deduction_remarks: String::new(),
        subtotal: dec("1000.00"),
        time_in: TimestampInput::Text(format!("2025-01-{day:02} 08:00:00")),
        time_out: TimestampInput::Text(format!("2025-01-{day:02} 17:00:00")),
        project: None,
    }
}

/// Builds a record set by running real composed entries through a store.
fn seeded_records(count: usize) -> Vec<PayrollRecord> {
    let (service, ids) = seeded_service(count / 28 + 1);
    let mut inserted = 0;
    'outer: for id in &ids {
        for day in 1..=28 {
            if inserted == count {
                break 'outer;
            }
            service
                .compose_single_payroll(*id, draft_for_day(day))
                .expect("seed record");
            inserted += 1;
        }
    }
    service.list_payrolls(&RecordFilter::default())
}

/// Builds a CSV upload with one row per employee per day.
fn batch_csv(ids: &[u64], days: u32) -> Vec<u8> {
    let mut file = template_csv();
    for id in ids {
        for day in 1..=days {
            file.push_str(&format!(
                "{id},1000.00,25.00,9,0,0,0,0,50.00,SSS,1000.00,950.00,2025-01-{day:02},08:00:00,17:00:00,Tower A\n"
            ));
        }
    }
    file.into_bytes()
}

/// Benchmark: amount validation alone.
fn bench_validate_amounts(c: &mut Criterion) {
    let gross = dec("1000.00");
    let deductions = dec("50.00");

    c.bench_function("validate_amounts", |b| {
        b.iter(|| {
            black_box(validate_amounts(
                black_box(gross),
                black_box(deductions),
                GrossBound::Subtotal,
            ))
        })
    });
}

/// Benchmark: full single-entry composition including timestamp parsing.
fn bench_compose_entry(c: &mut Criterion) {
    c.bench_function("compose_entry", |b| {
        b.iter(|| black_box(compose_entry(1, black_box(draft_for_day(10)))))
    });
}

/// Benchmark: summary aggregation over growing record sets.
fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for count in [10usize, 100, 1000].iter() {
        let records = seeded_records(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("records", count), &records, |b, records| {
            b.iter(|| black_box(summarize(black_box(records))))
        });
    }

    group.finish();
}

/// Benchmark: CSV batch ingestion end to end, including the commit.
fn bench_ingest_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_batch");
    group.sample_size(20);

    for rows in [28usize, 280].iter() {
        let employees = rows / 28;
        let file = {
            let (_, ids) = seeded_service(employees);
            batch_csv(&ids, 28)
        };

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &file, |b, file| {
            // A fresh store per iteration so every insert is a real insert.
            b.iter_batched(
                || seeded_service(employees).0,
                |service| black_box(ingest_batch(service.store(), file)),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_validate_amounts,
    bench_compose_entry,
    bench_summarize,
    bench_ingest_batch,
);
criterion_main!(benches);
