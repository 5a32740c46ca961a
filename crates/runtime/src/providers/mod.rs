//! Action providers that ship with the runtime.

mod ai;

pub use ai::LowestHealthAiProvider;
