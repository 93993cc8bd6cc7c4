use super::*;

#[test]
fn test_fnv1a_hash_known_values() {
    // Offset basis for the empty string
    assert_eq!(fnv1a_hash(""), 0xcbf29ce484222325);
    assert_eq!(fnv1a_hash("a"), 0xaf63dc4c8601ec8c);
}

#[test]
fn test_djb2_hash_known_values() {
    assert_eq!(djb2_hash(""), 5381);
    // 5381 * 33 + 'a'
    assert_eq!(djb2_hash("a"), 5381 * 33 + 97);
}

#[test]
fn test_crc32_hash_matches_crc32fast() {
    let s = "hello world";
    assert_eq!(crc32_hash(s), crc32fast::hash(s.as_bytes()) as u64);
    assert!(crc32_hash(s) <= u32::MAX as u64);
}

#[test]
fn test_hash_string_uses_default_algorithm() {
    let s = "hello world";
    assert_eq!(hash_string(s), fnv1a_hash(s));
    assert_eq!(HashAlgorithm::default(), HashAlgorithm::Fnv1a);
}

#[test]
fn test_every_algorithm_is_consistent() {
    let s = "This is a very long string that should test the hash function's ability to handle longer inputs efficiently.";

    for algorithm in HashAlgorithm::ALL {
        assert_eq!(algorithm.hash(s), algorithm.hash(s), "{}", algorithm.name());
        assert_eq!(algorithm.hash(""), algorithm.hash(""), "{}", algorithm.name());
    }
}

#[test]
fn test_every_algorithm_separates_similar_strings() {
    let inputs = ["hello", "world", "hello world", "test string 1", "test string 2"];

    for algorithm in HashAlgorithm::ALL {
        for (i, a) in inputs.iter().enumerate() {
            for b in inputs.iter().skip(i + 1) {
                assert_ne!(
                    algorithm.hash(a),
                    algorithm.hash(b),
                    "{} collides on {:?} / {:?}",
                    algorithm.name(),
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_murmur3_tail_lengths() {
    // Cover every tail length from 0 to 16 bytes plus a full block
    let base = "abcdefghijklmnopqrstuvwxyz0123456789";
    let hashes: Vec<u64> = (0..=17).map(|len| murmur3_hash(&base[..len])).collect();

    for (i, a) in hashes.iter().enumerate() {
        for b in hashes.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_murmur3_known_value() {
    assert_eq!(murmur3_hash("hello"), 0xcbd8a7b341bd9b02);
}

#[test]
fn test_read_u64_le() {
    let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(read_u64_le(&bytes), u64::from_le_bytes(bytes));
    assert_eq!(read_u64_le(&[0x34, 0x12]), 0x1234);
    assert_eq!(read_u64_le(&[]), 0);
}

#[test]
fn test_algorithm_serde_names() {
    for algorithm in HashAlgorithm::ALL {
        let json = serde_json::to_string(&algorithm).unwrap();
        assert_eq!(json, format!("\"{}\"", algorithm.name()));
    }

    let parsed: HashAlgorithm = serde_json::from_str("\"xxh64\"").unwrap();
    assert_eq!(parsed, HashAlgorithm::Xxh64);
}

#[test]
fn test_string_provider_treats_str_and_string_alike() {
    let provider = StringHashProvider::new(HashAlgorithm::Murmur3);
    let owned = String::from("key1");

    assert_eq!(
        HashProvider::<String>::hash(&provider, &owned),
        HashProvider::<str>::hash(&provider, "key1")
    );
    assert_eq!(HashProvider::<str>::hash(&provider, "key1"), murmur3_hash("key1"));
}

#[test]
fn test_sip_provider_treats_str_and_string_alike() {
    let provider = SipHashProvider;
    let owned = String::from("key1");

    assert_eq!(
        HashProvider::<String>::hash(&provider, &owned),
        HashProvider::<str>::hash(&provider, "key1")
    );
}

#[test]
fn test_integer_provider_is_identity() {
    let provider = IntegerHashProvider;

    assert_eq!(HashProvider::<u32>::hash(&provider, &42), 42);
    assert_eq!(HashProvider::<usize>::hash(&provider, &7), 7);
    assert_eq!(HashProvider::<i64>::hash(&provider, &-1), u64::MAX);
}
