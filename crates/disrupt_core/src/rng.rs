//! Deterministic random number generation for path simulation.
//!
//! Every trajectory owns its own [`Mulberry32`] stream, seeded from the
//! request seed plus a fixed odd stride per ensemble member, so that a batch
//! is reproducible regardless of how its members are scheduled.

use rand::RngCore;
use rand::rand_core::{SeedableRng, impls};
use rand_distr::Distribution;

/// Stride between the seeds of consecutive ensemble members.
pub const SEED_STRIDE: u32 = 7919;

/// Substituted for a zero first uniform draw so the logarithm stays finite.
pub const BOX_MULLER_EPSILON: f64 = 1e-4;

const INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Seed of the `index`-th member of an ensemble seeded with `base`.
#[inline]
pub fn derive_seed(base: u32, index: usize) -> u32 {
    base.wrapping_add((index as u32).wrapping_mul(SEED_STRIDE))
}

/// 32-bit Mulberry32 generator.
///
/// The state advances by a fixed odd increment and is mixed by two
/// multiply-xor-shift rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Uniform value in [0, 1) with 32 bits of resolution.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        unit_f64(self.next_u32())
    }
}

#[inline]
fn unit_f64(bits: u32) -> f64 {
    bits as f64 / TWO_POW_32
}

impl RngCore for Mulberry32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Standard normal sampler using the cosine branch of Box-Muller.
///
/// Each sample consumes exactly two 32-bit draws from the generator; the
/// sine branch is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxMuller;

impl Distribution<f64> for BoxMuller {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u1 = unit_f64(rng.next_u32());
        let u2 = unit_f64(rng.next_u32());
        let u1 = if u1 == 0.0 { BOX_MULLER_EPSILON } else { u1 };
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}
