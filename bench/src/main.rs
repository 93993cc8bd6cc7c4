//! Slotbucket Benchmark Tool

use clap::Parser;
use rand::SeedableRng;
use slotbucket::IntegerHashProvider;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

mod metrics;
mod scenarios;

use metrics::Metrics;
use scenarios::{BenchTable, Scenario};

#[derive(Parser, Debug, Clone)]
#[command(name = "slotbucket-bench")]
#[command(about = "Slotbucket hash table benchmark tool")]
struct Args {
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,

    #[arg(short = 'd', long, default_value = "10")]
    duration: u64,

    /// insert, point_lookup, read_write or churn
    #[arg(short = 's', long, default_value = "point_lookup")]
    scenario: String,

    #[arg(long, default_value = "100000")]
    rows: u64,

    #[arg(long, default_value = "1024")]
    buckets: usize,

    #[arg(long, default_value = "4")]
    slots_per_bucket: usize,

    #[arg(long, default_value = "0")]
    seed: u64,
}

// Each thread works on a table of its own
fn run_thread(
    thread_id: usize,
    scenario: Arc<dyn Scenario>,
    stop_flag: Arc<AtomicBool>,
    metrics: Arc<Metrics>,
    args: Args,
) {
    let seed = args
        .seed
        .wrapping_add(thread_id as u64 * 0x9e3779b97f4a7c15);
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let mut table: BenchTable =
        match BenchTable::with_hasher(args.buckets, args.slots_per_bucket, IntegerHashProvider) {
            Ok(table) => table,
            Err(err) => {
                eprintln!("Thread {}: failed to create table: {}", thread_id, err);
                metrics.record_error();
                return;
            }
        };
    if let Err(err) = scenario.prepare(&mut table) {
        eprintln!("Thread {}: failed to prepare: {}", thread_id, err);
        metrics.record_error();
        return;
    }

    while !stop_flag.load(Ordering::Relaxed) {
        let start = Instant::now();
        let result = scenario.execute(&mut table, &mut rng);
        let elapsed = start.elapsed();

        match result {
            Ok(()) => metrics.record_op(elapsed),
            Err(_) => metrics.record_error(),
        }
    }
}

fn main() {
    let args = Args::parse();

    if args.rows == 0 {
        eprintln!("--rows must be greater than zero");
        std::process::exit(1);
    }

    let scenario: Arc<dyn Scenario> = match scenarios::by_name(&args.scenario, args.rows) {
        Some(scenario) => Arc::from(scenario),
        None => {
            eprintln!("Unknown scenario: {}", args.scenario);
            std::process::exit(1);
        }
    };

    println!("Slotbucket Benchmark Tool");
    println!("=========================");
    println!("Started: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("Scenario: {}", scenario.name());
    println!("Threads: {}", args.threads);
    println!("Duration: {}s", args.duration);
    println!("Rows: {}", args.rows);
    println!("Shape: {} buckets x {} slots", args.buckets, args.slots_per_bucket);
    println!();

    let stop_flag = Arc::new(AtomicBool::new(false));
    let metrics = Arc::new(Metrics::new());

    println!("Running benchmark...");
    let start_time = Instant::now();

    let mut handles = Vec::new();
    for i in 0..args.threads {
        let scenario = Arc::clone(&scenario);
        let stop = Arc::clone(&stop_flag);
        let metrics = Arc::clone(&metrics);
        let thread_args = args.clone();

        let handle = std::thread::spawn(move || {
            run_thread(i, scenario, stop, metrics, thread_args);
        });
        handles.push(handle);
    }

    std::thread::sleep(Duration::from_secs(args.duration));
    stop_flag.store(true, Ordering::Relaxed);

    for handle in handles {
        let _ = handle.join();
    }

    let report = metrics.snapshot(start_time.elapsed());

    println!();
    println!("Table statistics:");
    println!("    operations:        {:>12} ({:.1} ops/s)", report.ops, report.ops_per_sec);
    println!(
        "    latency:           {:8.3} us (avg), {:8.3} us (max)",
        report.avg_latency_us, report.max_latency_us
    );
    println!("    threads: {}", args.threads);
    println!("    errors: {}", report.errors);
}
