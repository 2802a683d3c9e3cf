//! Benchmarks for the aggregate engine
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use regboard::charts::{ChartSet, Theme};
use regboard::dashboard::{aggregate, ColorAssignment, FilterSelection};
use regboard::data::{Table, TableLoader, UserRecord};

const CITIES: [&str; 12] = [
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia",
    "San Antonio", "San Diego", "Dallas", "Austin", "Seattle", "Denver",
];

fn create_test_table(rows: usize) -> Table {
    let origin = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..rows)
        .map(|i| {
            let day = origin + Duration::days((i % 365) as i64);
            UserRecord::new(day, CITIES[(i * 7) % CITIES.len()])
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [1_000, 10_000, 100_000] {
        let table = create_test_table(size);
        let all = FilterSelection::full_range(&table);
        let filtered = all.clone().cities(["Chicago", "Austin"]);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("all_cities_{}", size), |b| {
            b.iter(|| aggregate(black_box(&table), black_box(&all)))
        });

        group.bench_function(format!("two_cities_{}", size), |b| {
            b.iter(|| aggregate(black_box(&table), black_box(&filtered)))
        });
    }

    group.finish();
}

fn bench_charts(c: &mut Criterion) {
    let table = create_test_table(10_000);
    let colors = ColorAssignment::assign(table.cities());
    let aggregates = aggregate(&table, &FilterSelection::full_range(&table));

    c.bench_function("build_chart_set_10000", |b| {
        b.iter(|| ChartSet::build(black_box(&aggregates), &colors, Theme::Dark))
    });
}

fn bench_load(c: &mut Criterion) {
    let mut csv = String::from("Id,Created_At,City\n");
    for i in 0..10_000 {
        csv.push_str(&format!(
            "{},2024-{:02}-{:02} 12:00:00,{}\n",
            i,
            i % 12 + 1,
            i % 28 + 1,
            CITIES[i % CITIES.len()]
        ));
    }
    let loader = TableLoader::new();

    c.bench_function("load_csv_10000", |b| {
        b.iter(|| loader.load_reader(black_box(csv.as_bytes())).unwrap())
    });
}

criterion_group!(benches, bench_aggregate, bench_charts, bench_load);
criterion_main!(benches);
