//! Slotbucket: bucket-and-slot addressed hash table library

// Global type definitions
pub mod types;

// Logger setup
pub mod logger;

// Hashing and container modules
pub mod infrastructure;

// Re-export hash table items for easier access
pub use infrastructure::hash_table::{
    Cursor, Direction, HashTable, HashtableConfig, HashtableError, HashtableResult,
    HashtableStats,
};

// Re-export hash items for easier access
pub use infrastructure::hash::{
    HashAlgorithm, HashProvider, IntegerHashProvider, SipHashProvider, StringHashProvider,
};
