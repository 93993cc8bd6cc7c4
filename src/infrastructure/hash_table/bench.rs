use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Import the map wrappers and interface from the crate
use slotbucket::infrastructure::hash_table::{
    HashMapInterface, HashTable, HashTableWrapper, LinkedHashMapWrapper, StdHashMapWrapper,
};

// Test configuration
const OPERATIONS: usize = 10_000;

fn table_wrapper() -> HashTableWrapper<u32, &'static str> {
    // Small on purpose so the run includes several growth steps
    HashTableWrapper::new(HashTable::new(64, 4).unwrap())
}

// Insert, read back and remove every key
fn run_single_threaded<M: HashMapInterface<u32, &'static str>>(map: &mut M) {
    for i in 0..OPERATIONS {
        map.insert(i as u32, "test_value");
    }
    for i in 0..OPERATIONS {
        assert!(map.get(&(i as u32)).is_some());
    }
    for i in 0..OPERATIONS {
        map.remove(&(i as u32));
    }
}

// 90% reads, 10% writes over a pre-populated map
fn run_read_heavy<M: HashMapInterface<u32, &'static str>>(map: &mut M) {
    for i in 0..OPERATIONS {
        map.insert(i as u32, "test_value");
    }
    for i in 0..OPERATIONS {
        if i % 10 == 0 {
            map.insert(i as u32, "updated_value");
        } else {
            black_box(map.get(&(i as u32)));
        }
    }
}

// Remove every other key, then insert fresh keys into the holes
fn run_churn<M: HashMapInterface<u32, &'static str>>(map: &mut M) {
    for i in 0..OPERATIONS {
        map.insert(i as u32, "test_value");
    }
    for i in (0..OPERATIONS).step_by(2) {
        map.remove(&(i as u32));
    }
    for i in 0..OPERATIONS / 2 {
        map.insert((OPERATIONS + i) as u32, "fresh_value");
    }
}

pub fn bench_single_threaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("SingleThreaded");

    group.bench_function("StdHashMap", |b| {
        b.iter(|| run_single_threaded(&mut StdHashMapWrapper::new()))
    });
    group.bench_function("LinkedHashMap", |b| {
        b.iter(|| run_single_threaded(&mut LinkedHashMapWrapper::new()))
    });
    group.bench_function("HashTable", |b| {
        b.iter(|| run_single_threaded(&mut table_wrapper()))
    });

    group.finish();
}

pub fn bench_read_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("ReadHeavy");

    group.bench_function("StdHashMap", |b| {
        b.iter(|| run_read_heavy(&mut StdHashMapWrapper::new()))
    });
    group.bench_function("LinkedHashMap", |b| {
        b.iter(|| run_read_heavy(&mut LinkedHashMapWrapper::new()))
    });
    group.bench_function("HashTable", |b| b.iter(|| run_read_heavy(&mut table_wrapper())));

    group.finish();
}

pub fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("Churn");

    group.bench_function("StdHashMap", |b| {
        b.iter(|| run_churn(&mut StdHashMapWrapper::new()))
    });
    group.bench_function("LinkedHashMap", |b| {
        b.iter(|| run_churn(&mut LinkedHashMapWrapper::new()))
    });
    group.bench_function("HashTable", |b| b.iter(|| run_churn(&mut table_wrapper())));

    group.finish();
}

// Effect of the bucket/slot split at a fixed capacity of 4096
pub fn bench_bucket_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("BucketShapes");

    for (buckets, slots) in [(4096, 1), (1024, 4), (256, 16), (64, 64)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", buckets, slots)),
            &(buckets, slots),
            |b, &(buckets, slots)| {
                b.iter(|| {
                    let mut table: HashTable<u32, u32> = HashTable::new(buckets, slots).unwrap();
                    for i in 0..4096u32 {
                        table.add(i, i).unwrap();
                    }
                    for i in 0..4096u32 {
                        black_box(table.get(&i).unwrap());
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_threaded,
    bench_read_heavy,
    bench_churn,
    bench_bucket_shapes
);

criterion_main!(benches);
