mod state;

pub use state::FileSaveRepository;
