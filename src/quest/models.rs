//! Quest entities
//!
//! Rust structs representing quests and their daily records.
//! Serialized field names are camelCase to match the persisted layout.

use crate::config::DATE_KEY_FORMAT;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Today's calendar-day key ("2026-08-06"), from wall-clock local time
/// at the moment of the call.
pub fn today_key() -> String {
    Local::now().format(DATE_KEY_FORMAT).to_string()
}

/// A single day's logged amount toward a quest's total.
///
/// Invariant: a quest holds at most one record per `date`; same-day
/// additions accumulate into the existing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Calendar-day key in `YYYY-MM-DD` form
    pub date: String,
    pub amount: f64,
}

/// A user-defined numeric goal with dated progress records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    /// UUID assigned at creation, immutable, never reused
    pub id: String,
    pub title: String,
    pub total_amount: f64,
    pub unit: String,
    /// Insertion-ordered; at most one entry per distinct date
    pub records: Vec<DayRecord>,
}

/// Derived progress for one quest. Never stored, always recomputed
/// from the records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Total of all recorded amounts
    pub sum: f64,
    /// Rounded percentage of the target, clamped to 0..=100
    pub percent: u32,
    /// Whether the accumulated sum has reached the target
    pub complete: bool,
}

impl Quest {
    /// Add `amount` under `date`, accumulating into an existing record
    /// for that date or appending a new one.
    pub fn record(&mut self, date: &str, amount: f64) -> &DayRecord {
        let idx = match self.records.iter().position(|r| r.date == date) {
            Some(idx) => {
                self.records[idx].amount += amount;
                idx
            }
            None => {
                self.records.push(DayRecord {
                    date: date.to_string(),
                    amount,
                });
                self.records.len() - 1
            }
        };
        &self.records[idx]
    }

    /// Sum of all recorded amounts
    pub fn total_recorded(&self) -> f64 {
        self.records.iter().map(|r| r.amount).sum()
    }

    /// Compute derived progress: `percent` is the target ratio rounded
    /// to whole percent and capped at 100.
    pub fn progress(&self) -> Progress {
        let sum = self.total_recorded();
        let ratio = if self.total_amount > 0.0 {
            sum / self.total_amount
        } else {
            0.0
        };
        Progress {
            sum,
            percent: (ratio.min(1.0) * 100.0).round() as u32,
            complete: self.total_amount > 0.0 && sum >= self.total_amount,
        }
    }

    /// Records sorted ascending by date key. Lexicographic order on
    /// `YYYY-MM-DD` keys equals chronological order.
    pub fn records_by_date(&self) -> Vec<&DayRecord> {
        let mut sorted: Vec<&DayRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.date.cmp(&b.date));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quest(total: f64) -> Quest {
        Quest {
            id: "q1".to_string(),
            title: "Test".to_string(),
            total_amount: total,
            unit: "units".to_string(),
            records: Vec::new(),
        }
    }

    #[test]
    fn test_same_day_records_accumulate() {
        let mut q = quest(100.0);

        q.record("2026-08-06", 3.0);
        q.record("2026-08-06", 4.0);

        assert_eq!(q.records.len(), 1);
        assert_eq!(q.records[0].amount, 7.0);
    }

    #[test]
    fn test_distinct_days_append() {
        let mut q = quest(100.0);

        q.record("2026-08-05", 3.0);
        q.record("2026-08-06", 4.0);

        assert_eq!(q.records.len(), 2);
    }

    #[test]
    fn test_progress_percent_rounds_and_clamps() {
        let mut q = quest(3.0);

        q.record("2026-08-04", 1.0);
        let p = q.progress();
        assert_eq!(p.percent, 33);
        assert!(!p.complete);

        q.record("2026-08-05", 1.0);
        assert_eq!(q.progress().percent, 67);

        // Overshooting the target clamps at 100
        q.record("2026-08-06", 5.0);
        let p = q.progress();
        assert_eq!(p.sum, 7.0);
        assert_eq!(p.percent, 100);
        assert!(p.complete);
    }

    #[test]
    fn test_progress_monotonic_in_sum() {
        let mut q = quest(50.0);
        let mut last = q.progress().percent;

        for day in 1..=9 {
            q.record(&format!("2026-08-0{day}"), 10.0);
            let percent = q.progress().percent;
            assert!(percent >= last);
            last = percent;
        }
    }

    #[test]
    fn test_records_sorted_by_date() {
        let mut q = quest(100.0);

        q.record("2026-08-06", 1.0);
        q.record("2026-07-31", 2.0);
        q.record("2026-08-01", 3.0);

        let dates: Vec<&str> = q.records_by_date().iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-07-31", "2026-08-01", "2026-08-06"]);
    }

    #[test]
    fn test_today_key_shape() {
        let key = today_key();
        assert_eq!(key.len(), 10);
        assert_eq!(&key[4..5], "-");
        assert_eq!(&key[7..8], "-");
    }
}
