use std::collections::HashSet;

use thiserror::Error;

use super::{AmountError, Cents, EntryId, ExpenseEntry, format_cents, parse_amount};

/// Why an expense could not be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount {
        input: String,
        #[source]
        reason: AmountError,
    },

    #[error("Description must not be empty")]
    EmptyDescription,
}

/// Removal was requested for an entry that is not (or no longer) in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Expense not found: {0}")]
pub struct EntryNotFound(pub EntryId);

/// The session's expenses in insertion order, plus their running total.
///
/// Every mutation updates `entries` and `total` together or not at all,
/// so `total` always equals the sum of the entry amounts.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<ExpenseEntry>,
    total: Cents,
    last_sequence: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and record an expense typed by the user.
    pub fn add_entry(
        &mut self,
        raw_amount: &str,
        raw_description: &str,
    ) -> Result<ExpenseEntry, ValidationError> {
        let amount_cents = parse_amount(raw_amount).map_err(|reason| invalid(raw_amount, reason))?;
        if amount_cents <= 0 {
            return Err(invalid(raw_amount, AmountError::NotPositive));
        }
        self.record(amount_cents, raw_description)
    }

    /// Record an expense whose amount is already in cents.
    pub fn record(
        &mut self,
        amount_cents: Cents,
        raw_description: &str,
    ) -> Result<ExpenseEntry, ValidationError> {
        if amount_cents <= 0 {
            return Err(invalid(&format_cents(amount_cents), AmountError::NotPositive));
        }
        let description = raw_description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let total = self
            .total
            .checked_add(amount_cents)
            .ok_or_else(|| invalid(&format_cents(amount_cents), AmountError::Overflow))?;

        let entry = ExpenseEntry::new(self.last_sequence + 1, amount_cents, description);
        self.last_sequence = entry.sequence;
        self.entries.push(entry.clone());
        self.total = total;
        Ok(entry)
    }

    /// Remove an entry, subtracting exactly the amount it was recorded with.
    pub fn remove_entry(&mut self, id: EntryId) -> Result<ExpenseEntry, EntryNotFound> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(EntryNotFound(id))?;

        let entry = self.entries.remove(index);
        self.total -= entry.amount_cents;
        debug_assert_eq!(self.total, compute_total(&self.entries));
        Ok(entry)
    }

    pub fn current_total(&self) -> Cents {
        self.total
    }

    /// Entries in insertion order (oldest first).
    pub fn entries(&self) -> &[ExpenseEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&ExpenseEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn find_by_sequence(&self, sequence: u64) -> Option<&ExpenseEntry> {
        self.entries.iter().find(|e| e.sequence == sequence)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-verify every ledger invariant from scratch.
    pub fn check(&self) -> IntegrityReport {
        build_integrity_report(&self.entries, self.total)
    }
}

fn invalid(input: &str, reason: AmountError) -> ValidationError {
    ValidationError::InvalidAmount {
        input: input.trim().to_string(),
        reason,
    }
}

/// Sum of all entry amounts.
pub fn compute_total(entries: &[ExpenseEntry]) -> Cents {
    entries.iter().map(|e| e.amount_cents).sum()
}

/// Result of verifying a ledger against its invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityReport {
    pub entry_count: usize,
    pub stored_total: Cents,
    pub computed_total: Cents,
    pub issues: Vec<String>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn build_integrity_report(entries: &[ExpenseEntry], stored_total: Cents) -> IntegrityReport {
    let computed_total = compute_total(entries);
    let mut issues = Vec::new();

    if computed_total != stored_total {
        issues.push(format!(
            "Running total {} does not match sum of entries {}",
            format_cents(stored_total),
            format_cents(computed_total)
        ));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if entry.amount_cents <= 0 {
            issues.push(format!(
                "Entry #{} has non-positive amount {}",
                entry.sequence,
                format_cents(entry.amount_cents)
            ));
        }
        if entry.description.trim().is_empty() {
            issues.push(format!("Entry #{} has a blank description", entry.sequence));
        }
        if !seen.insert(entry.id) {
            issues.push(format!("Duplicate entry id {}", entry.id));
        }
    }

    IntegrityReport {
        entry_count: entries.len(),
        stored_total,
        computed_total,
        issues,
    }
}
