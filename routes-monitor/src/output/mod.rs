mod fs;
mod output_error;
mod sample_store;

pub use fs::create_dirs;
pub use output_error::OutputError;
pub use sample_store::SampleStore;
