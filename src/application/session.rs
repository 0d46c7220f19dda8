use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{
    Cents, EntryId, ExpenseEntry, IntegrityReport, Ledger, format_cents, format_current_date,
};

use super::AppError;

/// Presentation settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub currency_symbol: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

/// How a user points at an entry: the sequence number shown in listings,
/// or the full entry id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef {
    Sequence(u64),
    Id(EntryId),
}

impl FromStr for EntryRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        // Plain digits only: `u64::from_str` would also take a leading `+`
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(sequence @ 1..) = digits.parse::<u64>() {
                return Ok(EntryRef::Sequence(sequence));
            }
        }
        Uuid::parse_str(trimmed)
            .map(EntryRef::Id)
            .map_err(|_| AppError::InvalidReference(s.to_string()))
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryRef::Sequence(n) => write!(f, "#{}", n),
            EntryRef::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Everything the screen needs to draw itself.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub date: String,
    pub currency: String,
    pub total_cents: Cents,
    pub total: String,
    pub entries: Vec<ExpenseEntry>,
}

/// Owns the ledger for the lifetime of one session.
/// Dropping the session discards every entry.
pub struct ExpenseSession {
    ledger: Ledger,
    config: SessionConfig,
}

impl ExpenseSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            ledger: Ledger::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Record an expense from the entry form.
    #[instrument(skip(self))]
    pub fn add(&mut self, amount: &str, description: &str) -> Result<ExpenseEntry, AppError> {
        match self.ledger.add_entry(amount, description) {
            Ok(entry) => {
                info!(
                    entry_id = %entry.id,
                    sequence = entry.sequence,
                    amount_cents = entry.amount_cents,
                    total_cents = self.ledger.current_total(),
                    "recorded expense"
                );
                Ok(entry)
            }
            Err(err) => {
                debug!(error = %err, "rejected expense");
                Err(err.into())
            }
        }
    }

    /// Remove the entry a reference points at.
    #[instrument(skip(self, entry_ref), fields(entry = %entry_ref))]
    pub fn remove(&mut self, entry_ref: &EntryRef) -> Result<ExpenseEntry, AppError> {
        let id = self.resolve(entry_ref)?;
        let removed = self.ledger.remove_entry(id)?;
        info!(
            entry_id = %removed.id,
            amount_cents = removed.amount_cents,
            total_cents = self.ledger.current_total(),
            "removed expense"
        );
        Ok(removed)
    }

    fn resolve(&self, entry_ref: &EntryRef) -> Result<EntryId, AppError> {
        let found = match *entry_ref {
            EntryRef::Sequence(n) => self.ledger.find_by_sequence(n),
            EntryRef::Id(id) => self.ledger.get(id),
        };
        found.map(|e| e.id).ok_or_else(|| {
            debug!(entry = %entry_ref, "no such expense");
            AppError::EntryNotFound(entry_ref.to_string())
        })
    }

    pub fn total(&self) -> Cents {
        self.ledger.current_total()
    }

    pub fn entries(&self) -> &[ExpenseEntry] {
        self.ledger.entries()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            date: format_current_date(),
            currency: self.config.currency_symbol.clone(),
            total_cents: self.total(),
            total: format_cents(self.total()),
            entries: self.entries().to_vec(),
        }
    }

    /// Verify the ledger, failing if any invariant is broken.
    pub fn check(&self) -> Result<IntegrityReport, AppError> {
        let report = self.ledger.check();
        if report.is_healthy() {
            Ok(report)
        } else {
            Err(AppError::IntegrityViolation(report.issues.join("; ")))
        }
    }
}
