//! Deterministic random number generation.
//!
//! RULE: Nothing in the pipeline may call any platform RNG.
//! All randomness flows through a SeedStream derived from the
//! seed string on the active GenerationConfig.
//!
//! The single exception is `random_seed()`, which invents a new seed
//! string for the user. Producing the seed need not be reproducible;
//! consuming it must be.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Fold a seed string into a 64-bit seed with FNV-1a.
/// Stable across platforms and compiler releases, unlike `DefaultHasher`.
pub fn fold_seed(seed: &str) -> u64 {
    seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// A seeded, reproducible random stream.
///
/// Cloning a stream copies its cursor: both clones then yield the same
/// sequence. The feed relies on this to generate a page against a
/// snapshot and only adopt the advanced cursor when the page commits.
#[derive(Clone, Debug)]
pub struct SeedStream {
    inner: Pcg64Mcg,
    draws: u64,
}

impl SeedStream {
    pub fn new(seed: &str) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(fold_seed(seed)),
            draws: 0,
        }
    }

    /// Number of raw draws consumed since seeding.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.draws += 1;
        self.inner.next_u64()
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll an integer in [0, bound).
    pub fn next_below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be > 0");
        (self.next_u64() % bound as u64) as usize
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one element uniformly. Panics on an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_below(items.len())]
    }

    /// A lowercase base36 token of `len` characters.
    pub fn token(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| BASE36[self.next_below(BASE36.len())] as char)
            .collect()
    }
}

/// Invent a fresh 8-character seed from the unseeded thread RNG.
pub fn random_seed() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
