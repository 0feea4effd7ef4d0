use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use metocean_rust::config::{ReportConfig, WaveSettings, WindSettings};
use metocean_rust::core::{ObservationSet, Variable};
use metocean_rust::models::ScatterRequest;
use metocean_rust::preprocessing::MetoceanData;
use metocean_rust::services::{build_nss_tables, build_scatter, build_scatter_report};

/// Deterministic pseudo-random year of hourly data.
fn dataset(rows: usize) -> MetoceanData {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 10_000) as f64 / 10_000.0
    };

    let mut columns: Vec<(Variable, Vec<f64>)> = vec![
        (Variable::WindSpeed, Vec::with_capacity(rows)),
        (Variable::WindDirection, Vec::with_capacity(rows)),
        (Variable::Hs, Vec::with_capacity(rows)),
        (Variable::WaveDirection, Vec::with_capacity(rows)),
        (Variable::Tp, Vec::with_capacity(rows)),
        (Variable::Tz, Vec::with_capacity(rows)),
    ];
    for _ in 0..rows {
        let speed = next() * 30.0;
        let hs = 0.1 + speed * 0.15 + next();
        let values = [
            speed,
            next() * 360.0,
            hs,
            next() * 360.0,
            4.0 + hs * 1.5 + next() * 2.0,
            3.0 + hs + next(),
        ];
        for ((_, column), value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
    }

    let observations = ObservationSet::with_hourly_index(columns).expect("valid dataset");
    let config = ReportConfig::new("Bench")
        .with_wind(WindSettings::new(1.0, 12))
        .with_wave(WaveSettings::new(0.5, 1.0, 12));
    MetoceanData::new(config, observations).expect("prepared dataset")
}

fn bench_single_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter_table");

    for rows in [8_760usize, 87_600] {
        let data = dataset(rows);
        let unfiltered = ScatterRequest::new(Variable::Hs, Variable::WindSpeed);
        let filtered = unfiltered
            .clone()
            .filtered(Variable::WindDirection, 3.0)
            .filtered(Variable::WaveDirection, 7.0);

        group.bench_with_input(BenchmarkId::new("unfiltered", rows), &data, |b, data| {
            b.iter(|| build_scatter(black_box(data), black_box(&unfiltered)));
        });
        group.bench_with_input(BenchmarkId::new("two_filters", rows), &data, |b, data| {
            b.iter(|| build_scatter(black_box(data), black_box(&filtered)));
        });
    }

    group.finish();
}

fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");
    group.sample_size(10);

    let data = dataset(8_760);
    group.bench_function("nss_tables", |b| {
        b.iter(|| build_nss_tables(black_box(&data)));
    });
    group.bench_function("scatter_report", |b| {
        b.iter(|| build_scatter_report(black_box(&data)));
    });

    group.finish();
}

criterion_group!(benches, bench_single_table, bench_reports);
criterion_main!(benches);
