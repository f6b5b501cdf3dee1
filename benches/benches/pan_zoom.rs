// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Size};
use loupe_engine::{PanZoomEngine, PointerEvent, Touch};
use loupe_event_state::velocity::VelocityTracker;
use loupe_view2d::{ClampLimits, ViewMode, ViewportState, clamp_offset};

fn engine(natural: Size) -> PanZoomEngine<()> {
    let mut engine = PanZoomEngine::new(());
    let _ = engine.resize(Size::new(1280.0, 800.0), false);
    engine.set_expanded(true, 0);
    let _ = engine.image_loaded(natural, 0);
    engine
}

fn bench_clamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("view2d/clamp_offset");
    let viewport = Size::new(1280.0, 800.0);
    let limits = ClampLimits::pan(300.0);

    // Called on every pointer move and every inertia frame.
    for width in [640.0, 1280.0, 12_800.0] {
        let content = Size::new(width, width * 0.75);
        group.bench_with_input(
            BenchmarkId::from_parameter(width),
            &content,
            |b, &content| {
                b.iter(|| {
                    clamp_offset(
                        black_box(Point::new(-500.0, 120.0)),
                        content,
                        viewport,
                        limits,
                    )
                });
            },
        );
    }
    group.finish();
}

fn bench_rescale(c: &mut Criterion) {
    c.bench_function("view2d/rescale_about", |b| {
        b.iter_batched(
            || {
                ViewportState::fit(
                    Size::new(1280.0, 800.0),
                    Size::new(20_000.0, 12_500.0),
                    ViewMode::Expanded,
                )
            },
            |mut view| {
                for _ in 0..32 {
                    view.rescale_about(1.05, Point::new(0.3, 0.6), ClampLimits::default());
                }
                black_box(view);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_velocity(c: &mut Criterion) {
    c.bench_function("event_state/velocity_sample", |b| {
        let mut tracker = VelocityTracker::default();
        let mut t = 0_u64;
        b.iter(|| {
            t += 16;
            tracker.sample(black_box(Point::new(t as f64 * 0.5, 10.0)), t);
            black_box(tracker.speed())
        });
    });
}

fn bench_pan_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/pan_session");

    for moves in [16_u64, 128, 1_024] {
        group.throughput(Throughput::Elements(moves));
        group.bench_with_input(BenchmarkId::from_parameter(moves), &moves, |b, &moves| {
            b.iter_batched(
                || {
                    let mut e = engine(Size::new(8000.0, 5000.0));
                    let _ = e.zoom_in(0);
                    let _ = e.zoom_in(1);
                    e
                },
                |mut e| {
                    let _ = e.pointer_down(PointerEvent::primary(Point::new(640.0, 400.0), 10));
                    for i in 1..=moves {
                        let p = Point::new(640.0 - i as f64, 400.0 - (i % 7) as f64);
                        let _ = e.pointer_move(PointerEvent::primary(p, 10 + i * 8));
                    }
                    let release = Point::new(0.0, 400.0);
                    let _ = e.pointer_up(PointerEvent::primary(release, 20 + moves * 8));
                    black_box(e.viewport().offset());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_pinch_session(c: &mut Criterion) {
    c.bench_function("engine/pinch_session", |b| {
        b.iter_batched(
            || engine(Size::new(8000.0, 5000.0)),
            |mut e| {
                let _ = e.touch_start(
                    &[
                        Touch::new(1, Point::new(600.0, 400.0)),
                        Touch::new(2, Point::new(680.0, 400.0)),
                    ],
                    0,
                );
                for i in 1..=64_u64 {
                    let spread = i as f64 * 4.0;
                    let _ = e.touch_move(
                        &[
                            Touch::new(1, Point::new(600.0 - spread, 400.0)),
                            Touch::new(2, Point::new(680.0 + spread, 400.0)),
                        ],
                        i * 16,
                    );
                }
                let _ = e.touch_end(&[], &[], 64 * 16 + 8);
                black_box(e.viewport().zoom_percent());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_clamp,
    bench_rescale,
    bench_velocity,
    bench_pan_session,
    bench_pinch_session
);
criterion_main!(benches);
