// Hash functions for strings and the providers that feed the hash table

use serde::{Deserialize, Serialize};

use crate::types::XXH64_SEED;

pub mod provider;

pub use provider::{HashProvider, IntegerHashProvider, IntegerKey, SipHashProvider, StringHashProvider};

/// String hash algorithm selectable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// FNV-1a, 64-bit
    #[default]
    Fnv1a,
    /// djb2 (hash * 33 + c)
    Djb2,
    /// MurmurHash3 x64-128, first half
    Murmur3,
    /// xxHash64
    Xxh64,
    /// CRC32 widened to 64 bits
    Crc32,
}

impl HashAlgorithm {
    /// All algorithms, in declaration order
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Fnv1a,
        HashAlgorithm::Djb2,
        HashAlgorithm::Murmur3,
        HashAlgorithm::Xxh64,
        HashAlgorithm::Crc32,
    ];

    /// Hash a string with this algorithm
    pub fn hash(self, s: &str) -> u64 {
        match self {
            HashAlgorithm::Fnv1a => fnv1a_hash(s),
            HashAlgorithm::Djb2 => djb2_hash(s),
            HashAlgorithm::Murmur3 => murmur3_hash(s),
            HashAlgorithm::Xxh64 => xxh64_hash(s),
            HashAlgorithm::Crc32 => crc32_hash(s),
        }
    }

    /// Short lowercase name, as used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Fnv1a => "fnv1a",
            HashAlgorithm::Djb2 => "djb2",
            HashAlgorithm::Murmur3 => "murmur3",
            HashAlgorithm::Xxh64 => "xxh64",
            HashAlgorithm::Crc32 => "crc32",
        }
    }
}

/// FNV-1a hash implementation for strings
/// Returns a 64-bit integer hash value
pub fn fnv1a_hash(s: &str) -> u64 {
    const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
    const FNV_PRIME: u64 = 1099511628211;

    s.as_bytes().iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ *byte as u64).wrapping_mul(FNV_PRIME)
    })
}

/// djb2 hash implementation for strings
/// Returns a 64-bit integer hash value
pub fn djb2_hash(s: &str) -> u64 {
    const DJB2_MAGIC_NUMBER: u64 = 5381;

    s.as_bytes().iter().fold(DJB2_MAGIC_NUMBER, |hash, byte| {
        // hash * 33 + c
        hash.wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(*byte as u64)
    })
}

/// MurmurHash3 x64-128 for strings
/// Returns the first 64 bits of the 128-bit result
pub fn murmur3_hash(s: &str) -> u64 {
    const C1: u64 = 0x87c37b91114253d5;
    const C2: u64 = 0x4cf5ad432745937f;

    let data = s.as_bytes();
    let mut h1: u64 = 0;
    let mut h2: u64 = 0;

    let mut blocks = data.chunks_exact(16);
    for block in &mut blocks {
        let (lo, hi) = block.split_at(8);
        let k1 = read_u64_le(lo);
        let k2 = read_u64_le(hi);

        h1 ^= k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2);
        h1 = h1.rotate_left(27).wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x52dce729);

        h2 ^= k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1);
        h2 = h2.rotate_left(31).wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(0x38495ab5);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let (lo, hi) = tail.split_at(tail.len().min(8));
        let k1 = read_u64_le(lo);
        let k2 = read_u64_le(hi);
        if !hi.is_empty() {
            h2 ^= k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1);
        }
        h1 ^= k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2);
    }

    let len = data.len() as u64;
    h1 ^= len;
    h2 ^= len;
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    h1 = fmix64(h1);
    h2 = fmix64(h2);
    h1.wrapping_add(h2)
}

// Little-endian value of up to 8 bytes, missing high bytes read as zero
fn read_u64_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0, |value, byte| (value << 8) | u64::from(*byte))
}

// Murmur3 finalization mix
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^= k >> 33;
    k
}

/// xxHash64 for strings
pub fn xxh64_hash(s: &str) -> u64 {
    xxhash_rust::xxh64::xxh64(s.as_bytes(), XXH64_SEED)
}

/// CRC32 for strings, widened to 64 bits
pub fn crc32_hash(s: &str) -> u64 {
    crc32fast::hash(s.as_bytes()) as u64
}

/// Hash a string and return an integer
/// Uses FNV-1a as the default hash algorithm
pub fn hash_string(s: &str) -> u64 {
    HashAlgorithm::default().hash(s)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
