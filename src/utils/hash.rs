use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

// ----------------------------------------------
// PreHashedKeyMap / IdentityHasher
// ----------------------------------------------

#[derive(Default)]
pub struct IdentityHasher {
    hash: u64,
}

// Hasher for maps where the key is a u64 that is already unique
// (a pre-computed hash or a native handle address), so no further
// hashing is needed. Just returns the value as is.
impl Hasher for IdentityHasher {
    fn write(&mut self, _: &[u8]) {
        panic!("Only write_u64 is supported!");
    }

    fn write_u64(&mut self, h: u64) {
        self.hash = h;
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}

pub type PreHashedKeyMap<K, V> = HashMap<K, V, BuildHasherDefault<IdentityHasher>>;

// Native handle address as a map key.
#[inline]
pub fn address_key<T>(ptr: *const T) -> u64 {
    ptr as usize as u64
}

// ----------------------------------------------
// FNV-1a hash utilities
// ----------------------------------------------

pub type FNV1aHash = u64;
pub type StringHash = FNV1aHash;
pub const NULL_HASH: FNV1aHash = 0;

pub const fn fnv1a_from_str(s: &str) -> FNV1aHash {
    if s.is_empty() {
        return NULL_HASH;
    }

    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let bytes = s.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;

    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }

    hash
}

#[test]
fn test_identity_map_with_address_keys() {
    let a = Box::new(1u64);
    let b = Box::new(2u64);

    let mut map: PreHashedKeyMap<u64, &str> = PreHashedKeyMap::default();
    map.insert(address_key(&*a), "a");
    map.insert(address_key(&*b), "b");

    assert_eq!(map.get(&address_key(&*a)), Some(&"a"));
    assert_eq!(map.get(&address_key(&*b)), Some(&"b"));
    assert_ne!(address_key(&*a), address_key(&*b));
}
