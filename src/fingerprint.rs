//! A fixed-width digest used to name and deduplicate states.

use std::hash::{BuildHasher, Hash, Hasher};

/// A state identifier. See [`fingerprint`].
///
/// `0` is reserved to mean "no predecessor" (see [`crate::model::NO_PREDECESSOR`]).
/// Collisions are not detected: two distinct states that hash to the same
/// fingerprint cause under-exploration. Acceptable for the state-space sizes
/// this checker targets (spec §3).
pub type Fingerprint = u64;

/// Converts a value to a [`Fingerprint`] using a general-purpose,
/// high-quality hash. Equal values always produce equal fingerprints.
///
/// Uses `ahash`, the same hashing crate the rest of this codebase reaches for
/// (see `Cargo.toml`), rather than the defaultly-slower `std` `SipHasher`.
pub fn fingerprint<T: Hash>(value: &T) -> Fingerprint {
    let mut hasher = ahash::RandomState::with_seeds(1, 2, 3, 4).build_hasher();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn is_deterministic() {
        assert_eq!(fingerprint(&(1u8, 2u8)), fingerprint(&(1u8, 2u8)));
    }

    #[test]
    fn distinguishes_distinct_values() {
        assert_ne!(fingerprint(&(1u8, 2u8)), fingerprint(&(2u8, 1u8)));
    }
}
