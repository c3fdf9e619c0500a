use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use phys_demos::{ScenarioController, ScenarioKind};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    for kind in [ScenarioKind::Pendulum, ScenarioKind::Collisions, ScenarioKind::WaveMotion] {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            let mut controller = ScenarioController::new(kind).unwrap();
            b.iter(|| {
                controller.tick().unwrap();
                black_box(controller.get_time())
            });
        });
    }
    group.finish();
}

fn bench_crowded_collisions(c: &mut Criterion) {
    let mut controller = ScenarioController::new(ScenarioKind::Collisions).unwrap();
    for i in 0..40 {
        let x = 100.0 + (i % 10) as f64 * 80.0;
        let y = 100.0 + (i / 10) as f64 * 90.0;
        controller.pointer_down(x, y);
    }
    c.bench_function("collisions_43_balls", |b| {
        b.iter(|| {
            controller.tick().unwrap();
            black_box(controller.get_state().bodies.len())
        })
    });
}

criterion_group!(benches, bench_tick, bench_crowded_collisions);
criterion_main!(benches);
