//! Durable storage
//!
//! Persistence of the quest state as a single JSON document on disk.

pub mod state_file;

pub use state_file::StateFile;
