mod state;

pub use state::InMemorySaveRepo;
