//! Random identifiers for simulated commits.

use rand::Rng;
use uuid::{Builder, Uuid};

/// Number of hex digits in a short commit hash.
pub const SHORT_HASH_LEN: usize = 7;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Draw a short hash of [`SHORT_HASH_LEN`] lowercase hex digits.
pub fn short_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SHORT_HASH_LEN)
        .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
        .collect()
}

/// Draw a commit node id (`commit-<uuid>`) from the same random source.
pub fn commit_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let uuid: Uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
    format!("commit-{}", uuid.simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn short_hash_is_seven_lowercase_hex_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let hash = short_hash(&mut rng);
            assert_eq!(hash.len(), SHORT_HASH_LEN);
            assert!(hash
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn seeded_rng_reproduces_hashes() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        assert_eq!(short_hash(&mut a), short_hash(&mut b));
        assert_eq!(commit_id(&mut a), commit_id(&mut b));
    }

    #[test]
    fn commit_ids_are_prefixed_and_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = commit_id(&mut rng);
        let second = commit_id(&mut rng);

        assert!(first.starts_with("commit-"));
        assert_eq!(first.len(), "commit-".len() + 32);
        assert_ne!(first, second);
    }
}
