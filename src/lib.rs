pub mod config;
pub mod protocol;
pub mod words;

pub use config::Config;
pub use words::WordSequence;
