//! Infrastructure: hash functions and the hash table built on them

pub mod hash;
pub mod hash_table;
