//! Board geometry and randomness the rules consult without owning.
mod board;
mod rng;

pub use board::{Board, PlacementError, place_units};
pub use rng::{PcgRng, RandomSource, RngOracle, RollContext, SeededRandom, compute_seed};
