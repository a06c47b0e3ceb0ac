//! Benchmarks for session entry points and frame rendering.
//!
//! Run with: cargo bench -p paneltree-web

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use paneltree_core::geometry::{Point, Rect};
use paneltree_core::input::{PointerSample, TouchSample};
use paneltree_layout::{Node, Orientation};
use paneltree_web::SessionController;
use std::hint::black_box;
use std::time::Duration;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

fn balanced(depth: u32, counter: &mut usize) -> Node {
    *counter += 1;
    let n = *counter;
    if depth == 0 {
        return Node::panel(format!("panel-{n}"));
    }
    let orientation = if depth % 2 == 0 {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    let left = balanced(depth - 1, counter);
    let right = balanced(depth - 1, counter);
    Node::split(format!("split-{n}"), orientation, 0.5, left, right)
}

fn session(depth: u32) -> SessionController {
    let mut session = match SessionController::new(balanced(depth, &mut 0)) {
        Ok(session) => session,
        Err(err) => panic!("balanced tree is valid: {err}"),
    };
    session.set_viewport(VIEWPORT);
    session
}

fn bench_mouse_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/mouse");
    for depth in [2u32, 4, 6] {
        let base = session(depth);
        let panels = base.tree().panel_ids();
        let (Some(source), Some(target)) = (panels.first(), panels.last()) else {
            continue;
        };
        let (source, target) = (source.as_str().to_owned(), target.as_str().to_owned());
        let bounds = base.layout().rect(&target).unwrap_or(VIEWPORT);
        let pointer = PointerSample::new(bounds.center(), Duration::from_millis(16));
        group.bench_with_input(BenchmarkId::new("drag_drop", depth), &base, |b, base| {
            b.iter_batched(
                || base.clone(),
                |mut session| {
                    session.mouse_drag_start(&source, None);
                    session.mouse_drag_over(&target, bounds, pointer);
                    black_box(session.mouse_drop())
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_touch_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/touch");
    for depth in [2u32, 4, 6] {
        let mut active = session(depth);
        let source = active
            .tree()
            .panel_ids()
            .first()
            .map(|id| id.as_str().to_owned())
            .unwrap_or_default();
        active.touch_start(&source, TouchSample::new(1, Point::new(1.0, 1.0), Duration::ZERO));
        active.touch_tick(Duration::from_millis(500));
        group.bench_with_input(BenchmarkId::new("move", depth), &active, |b, active| {
            b.iter_batched(
                || active.clone(),
                |mut session| {
                    black_box(session.touch_move(TouchSample::new(
                        1,
                        Point::new(1500.0, 900.0),
                        Duration::from_millis(600),
                    )))
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for depth in [2u32, 4, 6, 8] {
        let session = session(depth);
        group.bench_with_input(BenchmarkId::new("frame", depth), &session, |b, session| {
            b.iter(|| black_box(session.render()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mouse_cycle, bench_touch_move, bench_render);
criterion_main!(benches);
