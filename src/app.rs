//! Application state and initialization
//!
//! Resolves the data directory, restores persisted quest state, and
//! hands an initialized service to the view layer.

use crate::config::APP_DIR_NAME;
use crate::error::{AppError, Result};
use crate::services::QuestsService;
use crate::storage::StateFile;
use std::path::PathBuf;

/// Central application state
pub struct AppState {
    pub quests: QuestsService,
}

/// Application setup - called once on startup.
///
/// `data_dir` overrides the platform default (useful for tests and
/// scripting); otherwise state lives under the OS data directory.
pub async fn setup(data_dir: Option<PathBuf>) -> Result<AppState> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| AppError::Generic("Failed to resolve a data directory".to_string()))?,
    };
    tracing::info!("App data directory: {:?}", data_dir);

    std::fs::create_dir_all(&data_dir)?;

    let state_file = StateFile::new(data_dir);
    let quests = QuestsService::load(state_file).await;

    tracing::info!("Application initialized successfully");
    Ok(AppState { quests })
}
