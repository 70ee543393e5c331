//! Services module
//!
//! Business logic coordinating the quest store with durable storage.

pub mod quests;

pub use quests::{QuestOverview, QuestsService};
