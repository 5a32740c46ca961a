//! Seedable randomness for unit generation, spawn placement and the opponent.
//!
//! [`RngOracle`] is a stateless mixer (same seed, same output). [`SeededRandom`]
//! drives it with a game seed and a running nonce, so a whole session is
//! reproducible from one `u64`. Anything that needs a random choice takes
//! `&mut dyn RandomSource`, which lets tests script the outcomes.

/// Stateless generator: maps a seed to a 32-bit value.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;
}

/// PCG-XSH-RR output permutation over one LCG step.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the game seed, the draw counter and a per-purpose context into one seed.
pub fn compute_seed(game_seed: u64, nonce: u64, context: RollContext) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// What a draw is for. Keeps independent decisions on independent streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Generation = 0,
    Placement = 1,
    AiUnit = 2,
    AiMove = 3,
}

/// Source of random choices, injected wherever the rules need one.
pub trait RandomSource: Send {
    fn next_u32(&mut self, context: RollContext) -> u32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, context: RollContext, len: usize) -> usize {
        debug_assert!(len > 0, "index() called with an empty range");
        (self.next_u32(context) as usize) % len.max(1)
    }
}

/// Deterministic [`RandomSource`] backed by an [`RngOracle`].
#[derive(Clone, Debug)]
pub struct SeededRandom<R: RngOracle = PcgRng> {
    oracle: R,
    game_seed: u64,
    nonce: u64,
}

impl SeededRandom<PcgRng> {
    pub fn new(game_seed: u64) -> Self {
        Self::with_oracle(PcgRng, game_seed)
    }
}

impl<R: RngOracle> SeededRandom<R> {
    pub fn with_oracle(oracle: R, game_seed: u64) -> Self {
        Self {
            oracle,
            game_seed,
            nonce: 0,
        }
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// Number of draws taken so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

impl<R: RngOracle> RandomSource for SeededRandom<R> {
    fn next_u32(&mut self, context: RollContext) -> u32 {
        let seed = compute_seed(self.game_seed, self.nonce, context);
        self.nonce += 1;
        self.oracle.next_u32(seed)
    }
}
