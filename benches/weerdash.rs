use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weerdash::{
    build_frame, compute_bounds, LocationFrame, SelectionRange, TemperatureFilterExt, TimeAxis,
    VariableSeries, DAILY_VARIABLES,
};

const JAN_1_2021: i64 = 1_609_459_200;
const DAYS: usize = 4 * 365;

fn series(name: &str, offset: f64) -> VariableSeries {
    let values: Vec<f64> = (0..DAYS)
        .map(|day| {
            if day % 97 == 0 {
                f64::NAN
            } else {
                offset + 10.0 * (day as f64 / 58.0).sin()
            }
        })
        .collect();
    VariableSeries::from_f64(name, &values)
}

fn daily_columns() -> Vec<VariableSeries> {
    DAILY_VARIABLES
        .iter()
        .enumerate()
        .map(|(i, name)| series(name, i as f64))
        .collect()
}

fn bench_dashboard(c: &mut Criterion) {
    let axis = TimeAxis::from_unix(JAN_1_2021, JAN_1_2021 + DAYS as i64 * 86_400, 86_400).unwrap();
    let frame = LocationFrame::new(build_frame(&axis, daily_columns()).unwrap()).unwrap();
    let frames = vec![frame.clone(), frame.clone(), frame.clone()];
    let selection = SelectionRange::new(0, 8).unwrap();

    c.bench_function("build_frame", |b| {
        b.iter(|| build_frame(black_box(&axis), daily_columns()))
    });
    c.bench_function("compute_bounds", |b| {
        b.iter(|| compute_bounds(black_box(&frames)))
    });
    c.bench_function("filter_temperature", |b| {
        b.iter(|| black_box(&frame).filter_temperature(&selection))
    });
}

criterion_group!(benches, bench_dashboard);
criterion_main!(benches);
