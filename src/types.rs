//! Global type definitions
//!
//! Stores constants and type aliases shared by the hash table and its tools

/// Position of an entry inside a table's ordered entry store
pub type Position = usize;

/// Default number of buckets
pub const DEFAULT_BUCKETS: usize = 16;

/// Default number of slots in each bucket
pub const DEFAULT_SLOTS_PER_BUCKET: usize = 4;

/// Default capacity multiplier applied when a full table grows
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Smallest growth factor that still makes capacity strictly increase
pub const MIN_GROWTH_FACTOR: usize = 2;

/// Seed used for xxHash64 string hashing
pub const XXH64_SEED: u64 = 0;
