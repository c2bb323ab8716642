use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tiercache::{CacheEngine, Op, WritePolicy};

fn bench_read_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_hit");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    for policy in WritePolicy::ALL {
        group.bench_function(policy.as_str(), |b| {
            let mut engine = CacheEngine::new(policy, 1000).unwrap();

            // Warm every line
            for addr in 0..100u64 {
                engine.read(addr);
            }

            let mut counter = 0u64;
            b.iter(|| {
                engine.read(black_box(counter % 100));
                counter += 1;
            });
        });
    }

    group.finish();
}

fn bench_mixed_60_40(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    for policy in WritePolicy::ALL {
        group.bench_function(format!("60_read_40_write_{}", policy), |b| {
            let mut engine = CacheEngine::new(policy, 5).unwrap();

            let mut counter = 0u64;
            b.iter(|| {
                let addr = (counter * 7) % 20;
                let op = if counter % 5 < 3 { Op::Read } else { Op::Write };
                engine.access(op, black_box(addr), None);
                counter += 1;
            });
        });
    }

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("write_back_dirty_victim", |b| {
        let mut engine = CacheEngine::new(WritePolicy::WriteBack, 10).unwrap();
        let data = vec![b'x'; 64];

        // Every write misses and displaces a dirty line
        let mut counter = 0u64;
        b.iter(|| {
            engine.write(black_box(counter), data.clone());
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_read_hit, bench_mixed_60_40, bench_eviction);
criterion_main!(benches);
