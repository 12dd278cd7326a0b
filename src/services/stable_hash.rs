//! Run-independent string hashing for domain-based assignment.
//!
//! 64-bit FNV-1a over the UTF-8 bytes. Unlike `std::collections::hash_map`'s
//! default hasher this is not seeded per process, so a domain lands on the
//! same voice and base note on every run and on every machine.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hashes `input` with 64-bit FNV-1a.
pub fn stable_hash(input: &str) -> u64 {
    input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}
