use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type EntryId = Uuid;

/// A single recorded expense.
/// Entries are immutable - a wrong entry is removed and entered again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// Time-ordered unique identifier
    pub id: EntryId,
    /// Per-ledger sequence number, the short handle shown to users
    pub sequence: u64,
    /// Amount in cents (always positive)
    pub amount_cents: Cents,
    /// Trimmed, non-empty label
    pub description: String,
    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

impl ExpenseEntry {
    /// Create a new entry. The sequence number is assigned by the ledger.
    pub fn new(sequence: u64, amount_cents: Cents, description: impl Into<String>) -> Self {
        assert!(amount_cents > 0, "Expense amount must be positive");
        let description = description.into();
        assert!(
            !description.trim().is_empty(),
            "Expense description must not be blank"
        );
        Self {
            id: Uuid::now_v7(),
            sequence,
            amount_cents,
            description,
            recorded_at: Utc::now(),
        }
    }
}
