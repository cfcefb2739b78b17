//! Game-compatible deterministic pseudo-random number generator.
//!
//! Reimplements the xorshift128 state machine the game uses for its
//! environment rolls, including the multiply-and-increment seed expansion.
//! Forecasts are only correct if this generator reproduces the game's draw
//! sequence bit for bit, so every operation is exact 32-bit wraparound
//! arithmetic. Do not substitute a stdlib or crate RNG here.

/// Seed expansion multiplier (shared with the Mersenne-family initializers).
const SEED_MULTIPLIER: u32 = 1_812_433_253;

/// Four-word xorshift128 generator matching the game's environment RNG.
///
/// This is a plain value, not a shared singleton: every weather or wind
/// computation creates (or reseeds) its own instance, so concurrent callers
/// never observe each other's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValheimRng {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl ValheimRng {
    /// Create a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        let mut rng = Self { a: 0, b: 0, c: 0, d: 0 };
        rng.reseed(seed);
        rng
    }

    /// Reset the state from a seed, discarding whatever came before.
    ///
    /// Expands the seed into the four words with three rounds of
    /// `state * 1812433253 + 1`, wrapping at 32 bits.
    pub fn reseed(&mut self, seed: u32) {
        self.a = seed;
        self.b = self.a.wrapping_mul(SEED_MULTIPLIER).wrapping_add(1);
        self.c = self.b.wrapping_mul(SEED_MULTIPLIER).wrapping_add(1);
        self.d = self.c.wrapping_mul(SEED_MULTIPLIER).wrapping_add(1);
    }

    /// Advance the state and return the next 32-bit word.
    pub fn next_u32(&mut self) -> u32 {
        let t = self.a ^ (self.a << 11);
        self.a = self.b;
        self.b = self.c;
        self.c = self.d;
        self.d = (self.d ^ (self.d >> 19)) ^ (t ^ (t >> 8));
        self.d
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform draw in `[min, max)`.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// Seed a fresh generator and take `n` uniform draws in one step.
///
/// Callers that need "the draws for time index X" should use this instead of
/// holding a generator across calls; seeding and drawing atomically removes
/// the possibility of reading from stale state.
pub fn seeded_draws(seed: u32, n: usize) -> Vec<f64> {
    let mut rng = ValheimRng::new(seed);
    (0..n).map(|_| rng.next_f64()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_expansion_from_zero() {
        let rng = ValheimRng::new(0);
        assert_eq!(rng.a, 0);
        assert_eq!(rng.b, 1);
        assert_eq!(rng.c, 1_812_433_254);
        assert_eq!(rng.d, 1_900_727_103);
    }

    /// First 20 draws from seed 0, pinned against the game's generator.
    /// If this test breaks, forecast output no longer matches the game.
    #[test]
    fn known_sequence_from_seed_zero() {
        let expected = [
            0.4425471476279199,
            0.44254703586921096,
            0.130221888422966,
            0.02493458380922675,
            0.12950201542116702,
            0.02470679022371769,
            0.5872120321728289,
            0.5029332698322833,
            0.6001597661525011,
            0.023700981168076396,
            0.0485911937430501,
            0.553981157951057,
            0.20454039704054594,
            0.7222048044204712,
            0.21817125007510185,
            0.21740320743992925,
            0.8954214844852686,
            0.3052303430158645,
            0.6623422510456294,
            0.6397434202954173,
        ];
        let mut rng = ValheimRng::new(0);
        for (i, want) in expected.iter().enumerate() {
            let got = rng.next_f64();
            assert!(
                (got - want).abs() < 1e-15,
                "draw {i}: got {got}, want {want}"
            );
        }
    }

    #[test]
    fn determinism_same_seed_same_output() {
        let mut a = ValheimRng::new(42);
        let mut b = ValheimRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn reseed_restarts_the_sequence() {
        let mut rng = ValheimRng::new(7);
        let first = rng.next_f64();
        for _ in 0..100 {
            rng.next_f64();
        }
        rng.reseed(7);
        assert_eq!(rng.next_f64(), first);
    }

    #[test]
    fn draws_stay_in_unit_range() {
        let mut rng = ValheimRng::new(12345);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "draw out of range: {v}");
        }
    }

    #[test]
    fn range_f64_within_bounds() {
        let mut rng = ValheimRng::new(777);
        for _ in 0..10_000 {
            let v = rng.range_f64(1.5, 3.5);
            assert!((1.5..3.5).contains(&v), "range_f64 out of range: {v}");
        }
    }

    #[test]
    fn seeded_draws_match_manual_sequence() {
        let draws = seeded_draws(1000, 3);
        let mut rng = ValheimRng::new(1000);
        for (i, d) in draws.iter().enumerate() {
            assert_eq!(*d, rng.next_f64(), "draw {i} diverged");
        }
    }
}
