use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::source::{NoiseKind, NoiseSource};

/// Uncorrelated per-pixel noise.
///
/// Each value is a hash of `(seed, x, y, z)` rather than a draw from a shared generator, so frames
/// rendered on different threads come out the same regardless of scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WhiteNoise {
    seed: u64,
}

impl WhiteNoise {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl NoiseSource for WhiteNoise {
    fn kind(&self) -> NoiseKind {
        NoiseKind::White
    }

    fn evaluate(&self, x: f64, y: f64, z: f64) -> f32 {
        let mut key = [0u8; 24];
        key[0..8].copy_from_slice(&(x.floor() as i64).to_le_bytes());
        key[8..16].copy_from_slice(&(y.floor() as i64).to_le_bytes());
        key[16..24].copy_from_slice(&(z.floor() as i64).to_le_bytes());
        let h = xxh3_64_with_seed(&key, self.seed);
        // Top 24 bits fit an f32 mantissa exactly.
        (h >> 40) as f32 / (1u32 << 24) as f32
    }
}
