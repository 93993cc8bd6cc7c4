use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

// Import the hash algorithms from the main crate
use slotbucket::infrastructure::hash::HashAlgorithm;

// Generate a random string of specified length
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

// Benchmark every algorithm on a string of the given length
fn bench_string_length(c: &mut Criterion, group_name: &str, length: usize) {
    let s = generate_random_string(length);

    let mut group = c.benchmark_group(group_name);
    for algorithm in HashAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| b.iter(|| algorithm.hash(black_box(&s))));
    }
    group.finish();
}

pub fn bench_short_strings(c: &mut Criterion) {
    bench_string_length(c, "ShortStrings", 10);
}

pub fn bench_medium_strings(c: &mut Criterion) {
    bench_string_length(c, "MediumStrings", 100);
}

pub fn bench_long_strings(c: &mut Criterion) {
    bench_string_length(c, "LongStrings", 1000);
}

// Benchmark keys shaped like the ones the word counter sees
pub fn bench_formatted_keys(c: &mut Criterion) {
    let keys: Vec<String> = (0..1000).map(|i| format!("key{}", i)).collect();

    let mut group = c.benchmark_group("FormattedKeys");
    for algorithm in HashAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| {
                for key in &keys {
                    black_box(algorithm.hash(key));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_short_strings,
    bench_medium_strings,
    bench_long_strings,
    bench_formatted_keys
);

criterion_main!(benches);
