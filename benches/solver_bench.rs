use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hyperfruit::{
    collision::pairs::{pair_count, pair_from_index},
    Dispatcher, Fruit, HemisphereBoundary, PhysicsObject, PhysicsSolver, SerialDispatcher,
    SolverConfig, ThreadPool, Vec4,
};
use std::hint::black_box;

const DT: f32 = 1.0 / 60.0;

fn prepare_solver<D: Dispatcher + 'static>(count: usize, dispatcher: D) -> PhysicsSolver {
    let mut solver = PhysicsSolver::new(SolverConfig::default(), Box::new(dispatcher)).unwrap();
    solver.add_boundary(HemisphereBoundary::default());

    let side = (count as f32).cbrt().ceil() as usize;
    for i in 0..count {
        let (x, z, w) = (i % side, (i / side) % side, i / (side * side));
        let position = Vec4::new(
            (x as f32 - side as f32 * 0.5) * 0.7,
            -1.5,
            (z as f32 - side as f32 * 0.5) * 0.7,
            (w as f32 - side as f32 * 0.5) * 0.7,
        );
        let fruit = if i % 2 == 0 { Fruit::Cherry } else { Fruit::Strawberry };
        solver
            .add_object(PhysicsObject::new(position, fruit, true, false).fully_grown())
            .unwrap();
    }
    solver
}

fn bench_solver_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_update");
    for &count in &[25usize, 50, 100] {
        group.bench_with_input(BenchmarkId::new("serial", count), &count, |b, &count| {
            let mut solver = prepare_solver(count, SerialDispatcher::new());
            b.iter(|| solver.update(black_box(DT)))
        });
        group.bench_with_input(
            BenchmarkId::new("thread_pool", count),
            &count,
            |b, &count| {
                let mut solver = prepare_solver(count, ThreadPool::with_default_threads().unwrap());
                b.iter(|| solver.update(black_box(DT)))
            },
        );
        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("rayon", count), &count, |b, &count| {
            let mut solver = prepare_solver(count, hyperfruit::RayonDispatcher::new());
            b.iter(|| solver.update(black_box(DT)))
        });
    }
    group.finish();
}

fn bench_pair_inversion(c: &mut Criterion) {
    c.bench_function("pair_from_index_100", |b| {
        let total = pair_count(100);
        b.iter(|| {
            let mut acc = 0usize;
            for k in 0..total {
                let (i, j) = pair_from_index(black_box(k), 100);
                acc += i ^ j;
            }
            acc
        })
    });
}

criterion_group!(benches, bench_solver_update, bench_pair_inversion);
criterion_main!(benches);
