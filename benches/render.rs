use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vectorlab::{
    DisplayFlags, ProjectionEngine, SceneEngine, Vector, ViewTransform, Viewport, World,
};

fn world_with(count: usize, depth: bool) -> World {
    let mut world = World::new();
    for i in 0..count {
        let t = i as f64 * 0.7;
        let vector = if depth {
            Vector::new_3d(t.cos() * 4.0, t.sin() * 3.0, 1.0 + t * 0.1)
        } else {
            Vector::new_2d(t.cos() * 4.0, t.sin() * 3.0)
        };
        // add only fails on non-finite components
        let _ = world.add(vector);
    }
    world
}

fn bench_projection(c: &mut Criterion) {
    let engine = ProjectionEngine::default();
    let viewport = Viewport::new(800.0, 600.0);
    let mut group = c.benchmark_group("projection_render");
    for count in [2usize, 8, 32] {
        let world = world_with(count, false);
        group.bench_with_input(BenchmarkId::from_parameter(count), &world, |b, world| {
            b.iter(|| engine.render(black_box(world), DisplayFlags::all(), viewport))
        });
    }
    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let engine = SceneEngine::default();
    let view = ViewTransform::default();
    let mut group = c.benchmark_group("scene_render");
    for count in [2usize, 8, 32] {
        let world = world_with(count, true);
        group.bench_with_input(BenchmarkId::from_parameter(count), &world, |b, world| {
            b.iter(|| engine.render(black_box(world), DisplayFlags::SCENE, &view))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_projection, bench_scene);
criterion_main!(benches);
