//! 32-bit rolling name hash.
//!
//! The recurrence is `acc = acc * 31 + unit` with two's-complement wrap after
//! every step. Units are UTF-16 code units, so names written in the Basic
//! Multilingual Plane hash over their code points and supplementary
//! characters hash over their surrogate pairs. Stored results depend on this
//! exact definition; do not change it.

const MULTIPLIER: i32 = 31;

/// Hashes `name` into a signed 32-bit value. Never fails; `""` hashes to `0`.
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_mul(MULTIPLIER).wrapping_add(i32::from(unit))
    })
}

/// Absolute value of a hash, saturating `i32::MIN` to `i32::MAX`.
///
/// The result is always in `0..=i32::MAX`.
pub fn hash_magnitude(hash: i32) -> u32 {
    hash.saturating_abs().unsigned_abs()
}
