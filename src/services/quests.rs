//! Quests service
//!
//! High-level quest operations over the owned store, with durable
//! persistence after every mutation. Saving is fire-and-forget: a
//! failed save is logged as a warning and does not fail the operation
//! that triggered it.

use crate::error::Result;
use crate::quest::{DayRecord, Progress, Quest, QuestStore};
use crate::storage::StateFile;

/// One quest with its derived progress, for list rendering
#[derive(Debug, Clone)]
pub struct QuestOverview {
    pub id: String,
    pub title: String,
    pub total_amount: f64,
    pub unit: String,
    pub progress: Progress,
    pub selected: bool,
}

/// Service for managing quests
pub struct QuestsService {
    store: QuestStore,
    state_file: StateFile,
}

impl QuestsService {
    /// Create a service over an empty store
    pub fn new(state_file: StateFile) -> Self {
        Self {
            store: QuestStore::new(),
            state_file,
        }
    }

    /// Restore persisted state and build the service over it
    pub async fn load(state_file: StateFile) -> Self {
        let store = state_file.load().await;
        tracing::info!("Restored {} quest(s)", store.quests().len());
        Self { store, state_file }
    }

    /// Create a new quest and select it
    pub async fn create_quest(&mut self, title: &str, total_amount: f64, unit: &str) -> Result<Quest> {
        tracing::info!("Creating new quest: {}", title.trim());

        let quest = self.store.create_quest(title, total_amount, unit)?.clone();
        self.persist().await;

        tracing::info!("Quest created successfully: {}", quest.id);
        Ok(quest)
    }

    /// Select a quest by id. Unknown ids are ignored.
    pub async fn select_quest(&mut self, id: &str) -> Result<()> {
        if self.store.select_quest(id) {
            tracing::debug!("Selected quest: {}", id);
            self.persist().await;
        }
        Ok(())
    }

    /// Delete a quest by id (idempotent). When the selected quest is
    /// deleted, selection moves to the first remaining quest.
    pub async fn delete_quest(&mut self, id: &str) -> Result<()> {
        if self.store.delete_quest(id) {
            tracing::info!("Quest deleted: {}", id);
            self.persist().await;
        }
        Ok(())
    }

    /// Log an amount against the selected quest under today's date,
    /// accumulating into an existing record for today if one exists.
    /// Returns the updated quest.
    pub async fn record_today(&mut self, amount: f64) -> Result<Quest> {
        let record = self.store.record_today(amount)?;
        tracing::debug!("Recorded {} on {}", record.amount, record.date);

        self.persist().await;

        // record_today validated the selection, so the quest exists
        self.store
            .selected_quest()
            .cloned()
            .ok_or(crate::error::AppError::NoSelection)
    }

    /// All quests with derived progress, in insertion order
    pub fn overview(&self) -> Vec<QuestOverview> {
        let selected = self.store.selected_quest_id();
        self.store
            .quests()
            .iter()
            .map(|q| QuestOverview {
                id: q.id.clone(),
                title: q.title.clone(),
                total_amount: q.total_amount,
                unit: q.unit.clone(),
                progress: q.progress(),
                selected: selected == Some(q.id.as_str()),
            })
            .collect()
    }

    pub fn selected_quest(&self) -> Option<&Quest> {
        self.store.selected_quest()
    }

    /// Records of the selected quest, sorted ascending by date
    pub fn selected_records(&self) -> Vec<&DayRecord> {
        self.store
            .selected_quest()
            .map(|q| q.records_by_date())
            .unwrap_or_default()
    }

    pub fn store(&self) -> &QuestStore {
        &self.store
    }

    async fn persist(&self) {
        if let Err(e) = self.state_file.save(&self.store).await {
            tracing::warn!("Failed to persist quest state: {}", e);
        }
    }
}
