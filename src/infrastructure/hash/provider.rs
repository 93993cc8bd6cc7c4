// Hash providers: how a table turns a key into a 64-bit hash

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::HashAlgorithm;

/// Strategy that hashes keys of type `K`
///
/// The table reduces the result modulo its bucket count, so two keys that
/// compare equal must produce the same hash.
pub trait HashProvider<K: ?Sized> {
    /// Hash a key
    fn hash(&self, key: &K) -> u64;
}

/// Hashes any `Hash` key with the standard library's SipHash
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SipHashProvider;

impl<K: Hash + ?Sized> HashProvider<K> for SipHashProvider {
    fn hash(&self, key: &K) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

/// Integer keys usable with [`IntegerHashProvider`]
pub trait IntegerKey {
    /// The key reinterpreted as an unsigned 64-bit value
    fn as_u64(&self) -> u64;
}

macro_rules! impl_integer_key {
    ($($t:ty),*) => {
        $(
            impl IntegerKey for $t {
                fn as_u64(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

impl_integer_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Identity hash for integer keys
///
/// Key `k` lands in bucket `k % buckets`, which makes bucket placement
/// predictable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerHashProvider;

impl<K: IntegerKey + ?Sized> HashProvider<K> for IntegerHashProvider {
    fn hash(&self, key: &K) -> u64 {
        key.as_u64()
    }
}

/// Hashes string-like keys with a selectable [`HashAlgorithm`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringHashProvider {
    algorithm: HashAlgorithm,
}

impl StringHashProvider {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl<K: AsRef<str> + ?Sized> HashProvider<K> for StringHashProvider {
    fn hash(&self, key: &K) -> u64 {
        self.algorithm.hash(key.as_ref())
    }
}
