#![deny(warnings)]

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use pathf::*;
use std::{hint::black_box, time::Duration};

/// Path with every kind of command repeated `count` times
fn mixed_path(count: usize) -> Path {
    let mut path = Path::new();
    for index in 0..count {
        let offset = 50.0 * index as Scalar;
        path.move_to((offset, 0.0))
            .line_to((offset + 10.0, 5.0))
            .quad_to((offset + 25.0, -20.0), (offset + 30.0, 10.0))
            .cubic_to(
                (offset + 70.0, 0.0),
                (offset - 20.0, 15.0),
                (offset + 40.0, 40.0),
            )
            .add_arc(
                (offset, 40.0),
                (offset + 40.0, 60.0),
                30.0,
                200.0,
                index % 2 == 0,
            )
            .close();
    }
    path
}

fn curve_benchmark(c: &mut Criterion) {
    let cubic = Cubic::new((158.0, 70.0), (210.0, 250.0), (25.0, 190.0), (219.0, 89.0));
    let arc = EllipArc::new((0.0, 0.0), (120.0, 40.0), 30.0, 300.0, true);
    let mut group = c.benchmark_group("curve");
    group
        .throughput(Throughput::Elements(1))
        .bench_function("cubic bbox", |b| b.iter(|| black_box(cubic).bbox(None)))
        .bench_function("arc bbox", |b| b.iter(|| black_box(arc).bbox(None)));
    group.finish();
}

fn path_benchmark(c: &mut Criterion) {
    let path = mixed_path(1000);
    let mut group = c.benchmark_group("path");
    group.throughput(Throughput::Elements(path.operations_count() as u64));
    group
        .bench_function("bounds", |b| {
            // transformed copy does not carry cached bounds
            b.iter_batched(
                || path.transform(Transform::identity()),
                |path| path.bounds(),
                BatchSize::LargeInput,
            )
        })
        .bench_function("bounds cached", |b| {
            let _ = path.bounds();
            b.iter(|| path.bounds())
        })
        .bench_function("rotate", |b| {
            b.iter_with_large_drop(|| path.rotate_around(black_box(30.0), (0.0, 0.0)))
        });
    group.finish();
}

fn shapes_benchmark(c: &mut Criterion) {
    let rect = BBox::from_rect(10.0, 20.0, 300.0, 200.0);
    let mut group = c.benchmark_group("shapes");
    group
        .bench_function("ellipse", |b| {
            b.iter_with_large_drop(|| {
                let mut path = Path::new();
                path.append_ellipse(black_box(rect));
                path
            })
        })
        .bench_function("rounded rectangle", |b| {
            b.iter_with_large_drop(|| {
                let mut path = Path::new();
                path.append_rounded_rectangle(black_box(rect), 25.0, true);
                path
            })
        });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().warm_up_time(Duration::new(1, 0));
    targets = curve_benchmark, path_benchmark, shapes_benchmark
);
criterion_main!(benches);
