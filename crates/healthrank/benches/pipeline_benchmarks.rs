//! Load, extract and validate benchmarks.
//!
//! Measures each pipeline stage across dataset sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use healthrank::{DualHeaderParser, IndicatorExtractor, QualityValidator, ValidationSchema};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate a dual-header file with `indicators` indicators (rawvalue, cilow, cihigh each).
fn generate_dataset(rows: usize, indicators: usize) -> String {
    let mut descriptions = vec![
        "5-digit FIPS Code".to_string(),
        "State Abbreviation".to_string(),
        "Name".to_string(),
        "Release Year".to_string(),
    ];
    let mut keys = vec![
        "fipscode".to_string(),
        "state".to_string(),
        "county".to_string(),
        "year".to_string(),
    ];
    for i in 1..=indicators {
        for suffix in ["rawvalue", "cilow", "cihigh"] {
            descriptions.push(format!("Measure {} {}", i, suffix));
            keys.push(format!("v{:03}_{}", i, suffix));
        }
    }

    let mut data = String::new();
    data.push_str(&descriptions.join(","));
    data.push('\n');
    data.push_str(&keys.join(","));
    data.push('\n');

    for row in 0..rows {
        data.push_str(&format!(
            "{:05},S{:02},County {},2025",
            row + 1000,
            row % 50,
            row
        ));
        for i in 0..indicators {
            // Every seventh cell missing
            if (row + i) % 7 == 0 {
                data.push_str(",,,");
                continue;
            }
            let value = ((row * 31 + i * 17) % 1000) as f64 / 10.0;
            data.push_str(&format!(",{:.1},{:.1},{:.1}", value, value - 1.5, value + 1.5));
        }
        data.push('\n');
    }
    data
}

fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for rows in [100, 1_000, 3_000] {
        let data = generate_dataset(rows, 30);
        let file = create_temp_file(&data);
        let parser = DualHeaderParser::new();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &file, |b, file| {
            b.iter(|| parser.parse_file(black_box(file.path())).unwrap())
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for indicators in [10, 100, 300] {
        let data = generate_dataset(1, indicators);
        let (descriptions, keys, _) = DualHeaderParser::new().parse_bytes(data.as_bytes()).unwrap();

        group.throughput(Throughput::Elements(keys.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(indicators),
            &(descriptions, keys),
            |b, (descriptions, keys)| {
                b.iter(|| IndicatorExtractor::extract(black_box(keys), black_box(descriptions)))
            },
        );
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let validator = QualityValidator::new(ValidationSchema::default()).unwrap();

    for rows in [100, 1_000, 3_000] {
        let data = generate_dataset(rows, 30);
        let (descriptions, keys, table) =
            DualHeaderParser::new().parse_bytes(data.as_bytes()).unwrap();
        let catalog = IndicatorExtractor::extract(&keys, &descriptions);

        group.throughput(Throughput::Elements(table.cell_count() as u64));
        group.bench_function(BenchmarkId::from_parameter(rows), |b| {
            b.iter(|| validator.run_all(black_box(&table), &keys, &catalog))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_extract, bench_validate);
criterion_main!(benches);
