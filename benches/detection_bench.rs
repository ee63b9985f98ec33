use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rect_collide::{Body, BodyStorage, CollisionConfig, CollisionDetector, OverlapResolver, Storage, Vector2};

#[derive(Clone, Copy)]
struct Scenario {
    name: &'static str,
    bodies: usize,
    parallel: bool,
}

fn build_bodies(s: Scenario) -> BodyStorage<Body> {
    let mut bodies = BodyStorage::new();
    for i in 0..s.bodies {
        let x = ((i * 13) % 2000) as f32;
        let y = ((i * 17) % 2000) as f32;
        let side = 4.0 + (i % 12) as f32;
        let body = if i % 10 == 0 {
            Body::new_static(Vector2::new(x, y), Vector2::new(side, side))
        } else {
            Body::new_dynamic(Vector2::new(x, y), Vector2::new(side, side))
        };
        bodies.add(body);
    }
    bodies
}

fn config_for(s: Scenario) -> CollisionConfig {
    CollisionConfig {
        parallel: s.parallel,
        ..CollisionConfig::with_cell_size(200.0)
    }
}

fn bench_detection(c: &mut Criterion) {
    let scenarios = [
        Scenario { name: "detect_10k_sequential", bodies: 10_000, parallel: false },
        Scenario { name: "detect_10k_parallel", bodies: 10_000, parallel: true },
    ];

    for scenario in scenarios {
        let mut detector = CollisionDetector::new(&config_for(scenario));
        let mut bodies = build_bodies(scenario);

        c.bench_function(scenario.name, |b| {
            b.iter(|| black_box(detector.detect(&mut bodies)))
        });
    }
}

fn bench_tick(c: &mut Criterion) {
    let scenarios = [
        Scenario { name: "tick_10k_sequential", bodies: 10_000, parallel: false },
        Scenario { name: "tick_10k_parallel", bodies: 10_000, parallel: true },
    ];

    for scenario in scenarios {
        let config = config_for(scenario);
        let resolver = OverlapResolver::new(&config);

        c.bench_function(scenario.name, |b| {
            b.iter_batched(
                || (build_bodies(scenario), CollisionDetector::new(&config)),
                |(mut bodies, mut detector)| {
                    detector.detect(&mut bodies);
                    resolver.resolve(&mut bodies);
                    bodies
                },
                BatchSize::PerIteration,
            )
        });
    }
}

criterion_group!(benches, bench_detection, bench_tick);
criterion_main!(benches);
