//! Slotbucket word counter: tallies stdin words in first-seen order

// Use jemalloc as global allocator
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{debug, error, info};

use slotbucket::logger::initialize_logger;
use slotbucket::{HashTable, HashtableConfig, HashtableResult, StringHashProvider};

type WordTable = HashTable<String, u64, StringHashProvider>;

#[derive(Parser, Debug)]
#[command(name = "slotbucket")]
#[command(about = "Count words from stdin with a bucket-and-slot hash table")]
struct Args {
    /// JSON table configuration
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print only the first N words seen
    #[arg(short = 'n', long)]
    top: Option<usize>,
}

fn count_words(table: &mut WordTable, input: impl BufRead) -> HashtableResult<()> {
    for line in input.lines() {
        let line = line?;
        for word in line.split_whitespace() {
            if let Ok(count) = table.get_mut(word) {
                *count += 1;
                continue;
            }
            table.add(word.to_string(), 1)?;
        }
    }
    Ok(())
}

fn run(args: &Args) -> HashtableResult<()> {
    let config = match &args.config {
        Some(path) => HashtableConfig::load(path)?,
        None => HashtableConfig::default(),
    };
    info!(
        "Counting words with {} buckets x {} slots, {} hash",
        config.buckets,
        config.slots_per_bucket,
        config.hash_algorithm.name()
    );

    let mut table = WordTable::from_config(&config, config.string_provider())?;
    count_words(&mut table, io::stdin().lock())?;

    let stats = table.stats();
    debug!("Final table statistics: {:?}", stats);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let limit = args.top.unwrap_or(usize::MAX);
    for (word, count) in table.iter().take(limit) {
        writeln!(out, "{} {}", word, count)?;
    }
    out.flush()?;

    info!("{} distinct words", table.len());
    Ok(())
}

fn main() {
    initialize_logger();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        error!("slotbucket failed: {}", err);
        process::exit(1);
    }
}
