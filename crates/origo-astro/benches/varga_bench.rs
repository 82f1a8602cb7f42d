use criterion::{black_box, criterion_group, criterion_main, Criterion};
use origo_astro::vedic::{project_sign, render_chart, ChartInputs, ChartSet, Divisor};

fn sample_inputs() -> ChartInputs {
    let names = ["Sun", "Moon", "Mars", "Mercury", "Jupiter", "Venus", "Saturn", "Rahu", "Ketu"];
    names
        .iter()
        .enumerate()
        .fold(ChartInputs::new(Some(15.0)), |inputs, (i, name)| {
            inputs.with_body(*name, Some(i as f64 * 37.3))
        })
}

fn bench_project_sign(c: &mut Criterion) {
    c.bench_function("project_sign_d60", |b| {
        b.iter(|| project_sign(black_box(217.45), black_box(Divisor::new(60).unwrap())))
    });
}

fn bench_build_chart_set(c: &mut Criterion) {
    let inputs = sample_inputs();
    c.bench_function("build_chart_set", |b| {
        b.iter(|| ChartSet::build(black_box(&inputs)))
    });
}

fn bench_render_chart(c: &mut Criterion) {
    let set = ChartSet::build(&sample_inputs()).unwrap();
    let d9 = set.get(Divisor::D9);
    c.bench_function("render_chart_d9", |b| b.iter(|| render_chart(black_box(d9))));
}

criterion_group!(benches, bench_project_sign, bench_build_chart_set, bench_render_chart);
criterion_main!(benches);
