//! Quest state file
//!
//! Stores the full quest collection and selection pointer as one JSON
//! document under a fixed, versioned file name. Every save overwrites
//! the whole document; there is no incremental or batched writing.
//!
//! Loading is lenient: a missing file is the expected first-run state,
//! and an unreadable or unparsable file is logged and discarded in
//! favor of the empty state rather than failing startup.

use crate::config::STATE_FILE_NAME;
use crate::error::Result;
use crate::quest::QuestStore;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Persistence adapter owning one state file path
#[derive(Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// Create an adapter for the state file inside `data_dir`
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(STATE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full state to disk, replacing any prior value.
    ///
    /// Writes go to a temp file first and are renamed into place; an
    /// interrupted write leaves the previous state intact.
    pub async fn save(&self, store: &QuestStore) -> Result<()> {
        let content = serde_json::to_string_pretty(store)?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, &self.path).await?;

        tracing::debug!("Saved quest state to {:?}", self.path);
        Ok(())
    }

    /// Restore the persisted state, falling back to the empty store when
    /// no file exists or the stored value cannot be read. The selection
    /// pointer is repaired unconditionally after every load.
    pub async fn load(&self) -> QuestStore {
        let mut store = self.read_state().await;
        store.repair_selection();
        store
    }

    async fn read_state(&self) -> QuestStore {
        if !self.path.exists() {
            tracing::info!("No state file at {:?}, starting empty", self.path);
            return QuestStore::new();
        }

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read state file {:?}: {}", self.path, e);
                return QuestStore::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(
                    "Discarding unparsable state file {:?}: {}",
                    self.path,
                    e
                );
                QuestStore::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_state_file() -> (StateFile, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let state_file = StateFile::new(temp_dir.path().to_path_buf());
        (state_file, temp_dir)
    }

    #[tokio::test]
    async fn test_load_without_file_returns_empty_store() {
        let (state_file, _temp) = create_test_state_file();

        let store = state_file.load().await;

        assert!(store.is_empty());
        assert_eq!(store.selected_quest_id(), None);
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let (state_file, _temp) = create_test_state_file();

        let mut store = QuestStore::new();
        store.create_quest("Pushups", 100.0, "reps").unwrap();
        store.create_quest("Run", 40.0, "km").unwrap();
        store.record_on("2026-08-05", 12.5).unwrap();
        store.record_on("2026-08-06", 7.5).unwrap();

        state_file.save(&store).await.unwrap();
        let restored = state_file.load().await;

        assert_eq!(restored.quests(), store.quests());
        assert_eq!(restored.selected_quest_id(), store.selected_quest_id());
    }

    #[tokio::test]
    async fn test_save_overwrites_completely() {
        let (state_file, _temp) = create_test_state_file();

        let mut store = QuestStore::new();
        store.create_quest("a", 10.0, "reps").unwrap();
        store.create_quest("b", 20.0, "reps").unwrap();
        state_file.save(&store).await.unwrap();

        let id = store.quests()[0].id.clone();
        store.delete_quest(&id);
        state_file.save(&store).await.unwrap();

        let restored = state_file.load().await;
        assert_eq!(restored.quests().len(), 1);
        assert_eq!(restored.quests()[0].title, "b");
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_empty() {
        let (state_file, _temp) = create_test_state_file();

        fs::write(state_file.path(), "{ not json at all").await.unwrap();

        let store = state_file.load().await;
        assert!(store.is_empty());
        assert_eq!(store.selected_quest_id(), None);
    }

    #[tokio::test]
    async fn test_save_after_corruption_recovers_cleanly() {
        let (state_file, _temp) = create_test_state_file();

        fs::write(state_file.path(), "garbage").await.unwrap();

        let mut store = state_file.load().await;
        store.create_quest("Fresh", 5.0, "units").unwrap();
        state_file.save(&store).await.unwrap();

        let restored = state_file.load().await;
        assert_eq!(restored.quests().len(), 1);
        assert_eq!(restored.quests()[0].title, "Fresh");
    }

    #[tokio::test]
    async fn test_wrong_shape_falls_back_to_empty() {
        let (state_file, _temp) = create_test_state_file();

        // Valid JSON, but not the expected layout
        fs::write(state_file.path(), r#"{"version": 3, "items": []}"#)
            .await
            .unwrap();

        let store = state_file.load().await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_load_repairs_dangling_selection() {
        let (state_file, _temp) = create_test_state_file();

        let content = r#"{
            "quests": [
                { "id": "q1", "title": "a", "totalAmount": 10.0, "unit": "reps", "records": [] }
            ],
            "selectedQuestId": "deleted-elsewhere"
        }"#;
        fs::write(state_file.path(), content).await.unwrap();

        let store = state_file.load().await;
        assert_eq!(store.selected_quest_id(), Some("q1"));
    }
}
