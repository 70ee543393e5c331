//! Quest state model
//!
//! This module provides the in-memory quest state:
//! - Entity definitions and derived progress
//! - The owned quest store with all mutating operations

pub mod models;
pub mod store;

pub use models::{today_key, DayRecord, Progress, Quest};
pub use store::QuestStore;
