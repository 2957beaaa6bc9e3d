use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use bridge_thermal::algorithms::{
    estimate, ProfileSource, ThermalEffectSynthesizer, UnitResponseField, LoadCase,
};
use bridge_thermal::core::{Point, ResponseKind};
use bridge_thermal::transformations::SavitzkyGolay;

/// One simulated day per minute with a sinusoidal air temperature
fn weather(minutes: usize) -> (Vec<f64>, Vec<f64>) {
    (0..minutes)
        .map(|m| {
            let phase = m as f64 / 1440.0 * std::f64::consts::TAU;
            let air = 15.0 + 8.0 * phase.sin();
            let solar = (600.0 * phase.sin()).max(0.0);
            (air, solar)
        })
        .unzip()
}

fn deck_points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new(i as f64 * 0.5, 0.0, (i % 7) as f64 - 3.0))
        .collect()
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("through_thickness");

    for days in [1usize, 30] {
        let (air, solar) = weather(days * 1440);
        group.bench_with_input(BenchmarkId::new("estimate", days), &days, |b, _| {
            b.iter(|| estimate(black_box(&air), black_box(&solar), 60));
        });
    }

    group.finish();
}

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");
    let kind = ResponseKind::Strain;
    let (air, solar) = weather(1440);

    for n_points in [10usize, 200] {
        let points = deck_points(n_points);
        let uniform = UnitResponseField::from_values(
            kind,
            LoadCase::Uniform,
            points.iter().map(|p| (*p, 1e-5 * p.x)).collect(),
        );
        let linear = UnitResponseField::from_values(
            kind,
            LoadCase::Linear,
            points.iter().map(|p| (*p, 4e-6 * p.z)).collect(),
        );
        let synthesizer = ThermalEffectSynthesizer::new(kind, 17.0);

        group.bench_with_input(BenchmarkId::new("one_day", n_points), &points, |b, points| {
            b.iter(|| {
                let source = ProfileSource::weather(air.clone(), solar.clone(), 60);
                synthesizer.synthesize(black_box(points), source, &uniform, &linear)
            });
        });
    }

    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");
    let filter = SavitzkyGolay::new(20, 3).unwrap();
    let (air, _) = weather(7 * 1440);

    group.bench_function("savitzky_golay_week", |b| {
        b.iter(|| filter.smooth(black_box(&air)));
    });

    group.finish();
}

criterion_group!(benches, bench_estimate, bench_synthesis, bench_smoothing);
criterion_main!(benches);
