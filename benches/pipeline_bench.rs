//! Benchmarks for the dashboard pipeline
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use epidash::charts::{composition_chart, peaks_chart, spread_chart, world_map, Theme};
use epidash::dataset::read_observations_str;
use epidash::selection::country_rows;
use epidash::signal::{find_peaks, PEAK_HEIGHT};

const LOCATIONS: [(&str, &str); 5] = [
    ("CHL", "Chile"),
    ("FRA", "France"),
    ("IND", "India"),
    ("NZL", "New Zealand"),
    ("OWID_WRL", "World"),
];

/// OWID-shaped CSV with one row per location per day
fn synthetic_csv(days: usize) -> String {
    let start = chrono::NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
    let mut csv = String::from("iso_code,location,date,total_cases,new_cases,total_deaths\n");

    for (loc_idx, (iso, name)) in LOCATIONS.iter().enumerate() {
        let mut total = 0.0;
        for day in 0..days {
            let date = start + chrono::Duration::days(day as i64);
            // Several waves of differing height
            let wave = ((day as f64) / 30.0).sin().abs();
            let new_cases = (wave * 5000.0 * (loc_idx + 1) as f64).round();
            total += new_cases;
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                iso,
                name,
                date.format("%Y-%m-%d"),
                total,
                new_cases,
                (total * 0.015).round()
            ));
        }
    }

    csv
}

fn bench_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");

    for days in [100, 1000] {
        let csv = synthetic_csv(days);
        group.throughput(Throughput::Elements((days * LOCATIONS.len()) as u64));

        group.bench_function(format!("read_{}_days", days), |b| {
            b.iter(|| read_observations_str(black_box(&csv)).unwrap())
        });
    }

    group.finish();
}

fn bench_find_peaks(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_peaks");

    for len in [1000, 100_000] {
        let series: Vec<f64> = (0..len)
            .map(|i| ((i as f64) / 20.0).sin() * 4000.0 + (i % 7) as f64 * 100.0)
            .collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_function(format!("series_{}", len), |b| {
            b.iter(|| find_peaks(black_box(&series), PEAK_HEIGHT))
        });
    }

    group.finish();
}

fn bench_figures(c: &mut Criterion) {
    let mut group = c.benchmark_group("figures");
    let table = read_observations_str(&synthetic_csv(1000)).unwrap();
    let rows = country_rows(&table, "India");

    group.bench_function("composition", |b| {
        b.iter(|| composition_chart(black_box(&rows), Theme::PlotlyDark))
    });

    group.bench_function("peaks", |b| {
        b.iter(|| peaks_chart(black_box(&rows), Theme::Seaborn))
    });

    group.bench_function("spread", |b| {
        b.iter(|| spread_chart(black_box(&table), Theme::Ggplot2))
    });

    group.bench_function("world_map", |b| {
        b.iter(|| world_map(black_box(&table), Theme::PlotlyWhite))
    });

    group.bench_function("spread_to_json", |b| {
        let figure = spread_chart(&table, Theme::PlotlyDark);
        b.iter(|| serde_json::to_vec(black_box(&figure)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_preprocess, bench_find_peaks, bench_figures);
criterion_main!(benches);
