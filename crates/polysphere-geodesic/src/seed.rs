//! Deterministic seed derivation for per-level random streams.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Stream tag for per-polygon display colors.
pub(crate) const COLOR_STREAM: u64 = 0xC010_0000_0000_0000;
/// Stream tag for per-edge ridge strengths.
pub(crate) const RIDGE_STREAM: u64 = 0x81D6_0000_0000_0000;

/// Combine a world seed with a stream key into a well-distributed `u64`.
///
/// Uses SipHash (via std's `DefaultHasher`) so that neighbouring stream keys
/// produce unrelated seeds.
pub fn derive_seed(world_seed: u64, stream: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    stream.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for one `(world_seed, stream)` pair.
pub fn stream_rng(world_seed: u64, stream: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(world_seed, stream))
}
