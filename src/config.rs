//! Application configuration constants
//!
//! Central location for all configuration constants, resource limits,
//! and validation boundaries used throughout the application.

// ===== Persistence =====

/// File name of the persisted quest state inside the data directory.
///
/// The name is versioned: an incompatible future layout gets a new name
/// (`quests.v2.json`) instead of a migration, so an old binary never
/// misparses a newer file.
pub const STATE_FILE_NAME: &str = "quests.v1.json";

/// Directory under the platform data dir that holds all application state
pub const APP_DIR_NAME: &str = "questlog";

// ===== Quest Validation Limits =====

/// Placeholder unit shown when the user leaves the unit field blank
pub const DEFAULT_UNIT: &str = "units";

/// Maximum length for a quest title.
/// Prevents excessively long values from being stored.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a unit label
pub const MAX_UNIT_LENGTH: usize = 32;

// ===== Display =====

/// Width of the textual progress bar in characters
pub const PROGRESS_BAR_WIDTH: usize = 24;

/// Format string for calendar-day record keys ("2026-08-06").
/// Lexicographic order on these keys equals chronological order.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
