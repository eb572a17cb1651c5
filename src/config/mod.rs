//! Configuration module for Tally
//!
//! Path resolution for the data directory and user settings persistence.

pub mod paths;
pub mod settings;

pub use paths::TallyPaths;
pub use settings::Settings;
