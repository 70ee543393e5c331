//! Quest store
//!
//! Owned in-memory state: the quest collection plus the selected-quest
//! pointer. All mutations go through this type; validation happens here
//! at the mutation boundary, before any state is touched.
//!
//! Invariants:
//! - quest ids are pairwise distinct
//! - `selected_quest_id`, when set, references an existing quest

use crate::config::{DEFAULT_UNIT, MAX_TITLE_LENGTH, MAX_UNIT_LENGTH};
use crate::error::{AppError, Result};
use crate::quest::models::{today_key, DayRecord, Quest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The process-wide quest state. Also the persisted shape: serializing
/// a store produces the durable `{quests, selectedQuestId}` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStore {
    quests: Vec<Quest>,
    selected_quest_id: Option<String>,
}

impl QuestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a quest and select it.
    ///
    /// Fails with a validation error when the trimmed title is empty or
    /// the target total is not a finite positive number; the store is
    /// unchanged in that case. A blank unit becomes the placeholder.
    pub fn create_quest(&mut self, title: &str, total_amount: f64, unit: &str) -> Result<&Quest> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("quest title must not be empty".into()));
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(AppError::Validation(format!(
                "quest title must be at most {MAX_TITLE_LENGTH} characters"
            )));
        }
        if !(total_amount.is_finite() && total_amount > 0.0) {
            return Err(AppError::Validation(format!(
                "target total must be a positive number, got {total_amount}"
            )));
        }
        let unit = unit.trim();
        if unit.len() > MAX_UNIT_LENGTH {
            return Err(AppError::Validation(format!(
                "unit must be at most {MAX_UNIT_LENGTH} characters"
            )));
        }

        let quest = Quest {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            total_amount,
            unit: if unit.is_empty() {
                DEFAULT_UNIT.to_string()
            } else {
                unit.to_string()
            },
            records: Vec::new(),
        };

        tracing::debug!("Created quest: {} ({})", quest.title, quest.id);
        self.selected_quest_id = Some(quest.id.clone());
        self.quests.push(quest);
        Ok(&self.quests[self.quests.len() - 1])
    }

    /// Select the quest with `id`. Unknown ids are ignored; returns
    /// whether the selection changed, so callers can skip a save.
    pub fn select_quest(&mut self, id: &str) -> bool {
        if !self.quests.iter().any(|q| q.id == id) {
            tracing::debug!("Ignoring selection of unknown quest id: {}", id);
            return false;
        }
        if self.selected_quest_id.as_deref() == Some(id) {
            return false;
        }
        self.selected_quest_id = Some(id.to_string());
        true
    }

    /// Delete the quest with `id` if present; deleting an unknown id is
    /// a no-op. When the deleted quest was selected, selection moves to
    /// the first remaining quest in insertion order, or to none.
    pub fn delete_quest(&mut self, id: &str) -> bool {
        let before = self.quests.len();
        self.quests.retain(|q| q.id != id);
        if self.quests.len() == before {
            return false;
        }

        if self.selected_quest_id.as_deref() == Some(id) {
            self.selected_quest_id = self.quests.first().map(|q| q.id.clone());
        }
        tracing::debug!("Deleted quest: {}", id);
        true
    }

    /// Add `amount` to the selected quest under `date_key`, accumulating
    /// into an existing record for that date or appending a new one.
    pub fn record_on(&mut self, date_key: &str, amount: f64) -> Result<&DayRecord> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(AppError::Validation(format!(
                "amount must be a positive number, got {amount}"
            )));
        }

        let id = self.selected_quest_id.clone().ok_or(AppError::NoSelection)?;
        let quest = self
            .quests
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(AppError::NoSelection)?;

        Ok(quest.record(date_key, amount))
    }

    /// `record_on` with today's local calendar-day key.
    pub fn record_today(&mut self, amount: f64) -> Result<&DayRecord> {
        let today = today_key();
        self.record_on(&today, amount)
    }

    pub fn selected_quest(&self) -> Option<&Quest> {
        let id = self.selected_quest_id.as_deref()?;
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn selected_quest_id(&self) -> Option<&str> {
        self.selected_quest_id.as_deref()
    }

    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    /// All quests in insertion order
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Restore the selection invariant after deserialization: a pointer
    /// to a missing quest is replaced by the first available quest, or
    /// cleared when the store is empty. No-op on a consistent store.
    pub fn repair_selection(&mut self) {
        let valid = self
            .selected_quest_id
            .as_deref()
            .is_some_and(|id| self.quests.iter().any(|q| q.id == id));
        if !valid {
            let repaired = self.quests.first().map(|q| q.id.clone());
            if repaired != self.selected_quest_id {
                tracing::warn!(
                    "Repaired dangling quest selection: {:?} -> {:?}",
                    self.selected_quest_id,
                    repaired
                );
            }
            self.selected_quest_id = repaired;
        }
    }
}
