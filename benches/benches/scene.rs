// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for scene hit testing, transforms, event bubbling and stage updates.
//!
//! The scene is a deterministic synthetic grid of panels, each holding a column of rows
//! with small buttons inside, roughly the shape of a settings page.

use canopy_scene::{
    Event, EventData, EventKind, InputFrame, MouseButtons, NodeId, Scene, Stage, StageConfig,
};
use core::time::Duration;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};

const STAGE: Size = Size::new(1200.0, 800.0);

struct Built {
    scene: Scene,
    leaves: Vec<NodeId>,
}

fn build_scene(panels_x: u32, panels_y: u32, rows: u32) -> Built {
    let mut scene = Scene::new(STAGE);
    let root = scene.root();
    let mut leaves = Vec::new();
    let pw = STAGE.width / f64::from(panels_x);
    let ph = STAGE.height / f64::from(panels_y);
    let rh = ph / f64::from(rows);
    for py in 0..panels_y {
        for px in 0..panels_x {
            let panel = scene.create_node();
            scene.add_child(root, panel).unwrap();
            scene.set_position(panel, Point::new(f64::from(px) * pw, f64::from(py) * ph));
            scene.set_size(panel, Size::new(pw, ph));
            for r in 0..rows {
                let row = scene.create_node();
                scene.add_child(panel, row).unwrap();
                scene.set_position(row, Point::new(0.0, f64::from(r) * rh));
                scene.set_size(row, Size::new(pw, rh));
                let button = scene.create_node();
                scene.add_child(row, button).unwrap();
                scene.set_size(button, Size::new(rh, rh * 0.8));
                scene.set_pivot(button, Vec2::new(0.5, 0.5), true);
                scene.set_position(button, Point::new(pw - rh, rh * 0.5));
                scene.set_rotation(button, 0.05 * f64::from(r));
                leaves.push(button);
            }
        }
    }
    Built { scene, leaves }
}

fn points() -> Vec<Point> {
    let mut out = Vec::new();
    for iy in 0..=8 {
        for ix in 0..=12 {
            out.push(Point::new(f64::from(ix) * 100.0, f64::from(iy) * 100.0));
        }
    }
    out.extend([
        Point::new(0.0, 0.0),
        Point::new(1199.0, 0.0),
        Point::new(0.0, 799.0),
        Point::new(1199.0, 799.0),
        Point::new(600.0, 400.0),
    ]);
    out
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("canopy_scene/hit_test");
    let pts = points();
    for (px, py, rows) in [(4, 4, 8), (8, 8, 16)] {
        let built = build_scene(px, py, rows);
        let root = built.scene.root();
        group.bench_function(format!("grid({px}x{py},rows={rows})"), |b| {
            b.iter(|| {
                for &p in &pts {
                    black_box(built.scene.hit_test(root, black_box(p)));
                }
            });
        });
    }
    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("canopy_scene/transforms");
    let mut built = build_scene(8, 8, 16);
    let leaf = built.leaves[built.leaves.len() / 2];

    group.bench_function("local_to_global(leaf)", |b| {
        b.iter(|| {
            let p = black_box(Point::new(3.0, 4.0));
            black_box(built.scene.local_to_global(leaf, p))
        });
    });
    group.bench_function("global_to_local(leaf)", |b| {
        b.iter(|| {
            let p = black_box(Point::new(600.0, 400.0));
            black_box(built.scene.global_to_local(leaf, p))
        });
    });

    let mut toggle = false;
    group.bench_function("set_rotation(leaf)", |b| {
        b.iter(|| {
            toggle = !toggle;
            built.scene.set_rotation(leaf, if toggle { 0.1 } else { 0.2 });
        });
    });
    group.finish();
}

fn bench_bubble(c: &mut Criterion) {
    let mut group = c.benchmark_group("canopy_scene/bubble");
    let mut built = build_scene(4, 4, 8);
    let leaf = built.leaves[0];
    // One listener on every ancestor of the leaf.
    for node in built.scene.path_to_root(leaf) {
        built.scene.on(node, EventKind::Click, |_, e| {
            black_box(e.current_target);
        });
    }

    group.bench_function("click(depth=4)", |b| {
        b.iter(|| {
            let mut event = Event::new(EventKind::Click, Some(leaf), EventData::None);
            black_box(built.scene.bubble(leaf, &mut event))
        });
    });
    group.bench_function("mouse_move(no listeners)", |b| {
        b.iter(|| {
            let mut event = Event::new(EventKind::MouseMove, Some(leaf), EventData::None);
            black_box(built.scene.bubble(leaf, &mut event))
        });
    });
    group.finish();
}

fn bench_stage_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("canopy_scene/stage");
    let dt = Duration::from_millis(16);
    let pts = points();

    group.bench_function("pointer_sweep(8x8,rows=16)", |b| {
        b.iter_batched(
            || {
                let mut stage = Stage::new(StageConfig {
                    size: STAGE,
                    ..StageConfig::default()
                });
                *stage.scene_mut() = build_scene(8, 8, 16).scene;
                stage
            },
            |mut stage| {
                for (i, &p) in pts.iter().enumerate() {
                    let buttons = if i % 4 == 1 {
                        MouseButtons::PRIMARY
                    } else {
                        MouseButtons::empty()
                    };
                    stage.update(dt, &InputFrame::mouse_at(p).with_buttons(buttons));
                }
                stage
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_hit_test,
    bench_transforms,
    bench_bubble,
    bench_stage_update
);
criterion_main!(benches);
