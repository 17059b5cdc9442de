use criterion::{black_box, criterion_group, criterion_main, Criterion};

use curve_plane::basics::PointD;
use curve_plane::{CurveModel, PathBuilder, Viewport};

fn viewport() -> Viewport {
    Viewport {
        width: 1920.0,
        height: 1080.0,
        origin: PointD::new(960.0, 540.0),
        scale: 40.0,
    }
}

fn bench_explicit(c: &mut Criterion) {
    let builder = PathBuilder::new(viewport());
    let mut smooth = CurveModel::explicit_y(|x| x.sin() * 3.0);
    smooth.anchor_to_canvas(builder.viewport());
    let mut tangent = CurveModel::explicit_y(|x| x.tan());
    tangent.anchor_to_canvas(builder.viewport());

    c.bench_function("explicit_sin_1920", |b| {
        b.iter(|| builder.build(black_box(&smooth)))
    });
    c.bench_function("explicit_tan_1920", |b| {
        b.iter(|| builder.build(black_box(&tangent)))
    });
}

fn bench_closed(c: &mut Criterion) {
    let builder = PathBuilder::new(viewport());
    let rose = CurveModel::polar(|theta| 5.0 * (4.0 * theta).cos()).theta_step(0.001);
    let lissajous =
        CurveModel::parametric(|t| PointD::new((3.0 * t).sin() * 8.0, (2.0 * t).sin() * 8.0))
            .domain_t(0.0, std::f64::consts::TAU)
            .t_step(0.001);

    c.bench_function("polar_rose", |b| b.iter(|| builder.build(black_box(&rose))));
    c.bench_function("parametric_lissajous", |b| {
        b.iter(|| builder.build(black_box(&lissajous)))
    });
}

criterion_group!(benches, bench_explicit, bench_closed);
criterion_main!(benches);
