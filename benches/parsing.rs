//! Benchmarking grid parsing & formatting
extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pcv_grid::prelude::{to_writer, Antenna, FormattingOptions};

/// Full resolution (1° x 1°) azimuth dependent grid
fn full_resolution_grid() -> String {
    let mut content = String::from("ANT: LEIAR25.R4 LEIT\nZEN: 0 90 1\nAZI: 0 360 1\n");
    for z in 0..90 {
        for a in 0..360 {
            let value = -6.0 * (2.0 * (z as f64).to_radians()).sin()
                + 0.5 * (a as f64).to_radians().cos();
            content.push_str(&format!("{:.3}\n", value));
        }
    }
    content
}

fn grid_parsing(content: &str) -> Vec<Antenna> {
    pcv_grid::from_str(content).unwrap()
}

fn benchmark(c: &mut Criterion) {
    let content = full_resolution_grid();
    let antennas = grid_parsing(&content);

    let mut parsing_grp = c.benchmark_group("parsing");
    parsing_grp.bench_function("GRD/1x1", |b| {
        b.iter(|| {
            grid_parsing(black_box(&content));
        })
    });
    parsing_grp.finish();

    let mut formatting_grp = c.benchmark_group("formatting");
    formatting_grp.bench_function("GRD/1x1", |b| {
        b.iter(|| {
            let mut buf = Vec::<u8>::with_capacity(content.len());
            to_writer(&mut buf, &antennas, &FormattingOptions::default()).unwrap();
        })
    });
    formatting_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
