use cachetrace::{Cache, MemoryEngine, STORE_OPERATION};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn store_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    group.bench_function("memory", |b| {
        b.iter_batched(
            || Cache::new(MemoryEngine::new()).unwrap(),
            |mut cache| {
                for i in 0..100_i64 {
                    cache.store(i).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn get_bench(c: &mut Criterion) {
    let mut cache = Cache::new(MemoryEngine::new()).unwrap();
    let keys: Vec<String> = (0..1000_i64).map(|i| cache.store(i).unwrap()).collect();
    let mut rng = SmallRng::seed_from_u64(7);

    let mut group = c.benchmark_group("get");
    group.bench_function("memory_get_int", |b| {
        b.iter(|| {
            let key = &keys[rng.gen_range(0..keys.len())];
            cache.get_int(key).unwrap()
        })
    });
    group.finish();
}

fn replay_bench(c: &mut Criterion) {
    let mut cache = Cache::new(MemoryEngine::new()).unwrap();
    for i in 0..1000_i64 {
        cache.store(i).unwrap();
    }

    c.bench_function("replay_1000_calls", |b| {
        b.iter(|| cache.replay(STORE_OPERATION).unwrap().to_string())
    });
}

criterion_group!(benches, store_bench, get_bench, replay_bench);
criterion_main!(benches);
