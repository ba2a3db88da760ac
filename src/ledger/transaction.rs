use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// Note stored when the user leaves the note field blank.
pub const DEFAULT_NOTE: &str = "New Transaction";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn sign(self) -> char {
        match self {
            TransactionKind::Expense => '-',
            TransactionKind::Income => '+',
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "expense" | "out" => Some(TransactionKind::Expense),
            "income" | "in" => Some(TransactionKind::Income),
            _ => None,
        }
    }
}

/// Recorded income or expense. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: DateTime<Utc>,
    pub note: String,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by its kind.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Expense => -self.amount,
            TransactionKind::Income => self.amount,
        }
    }
}

/// Form state for a transaction that has not been added yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: Option<DateTime<Utc>>,
    pub note: String,
}

impl TransactionDraft {
    pub fn new(amount: f64, kind: TransactionKind, category: impl Into<String>) -> Self {
        Self {
            amount,
            kind,
            category: category.into(),
            date: None,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Applies a category suggestion. The name is kept verbatim even if the
    /// category was deleted while the suggestion was in flight.
    pub fn apply_suggestion(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }
}

/// Parses user-entered amount text.
pub fn parse_amount(input: &str) -> Result<f64, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation("amount is required"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| LedgerError::validation(format!("`{}` is not a valid amount", trimmed)))?;
    if !value.is_finite() {
        return Err(LedgerError::validation(format!(
            "`{}` is not a finite amount",
            trimmed
        )));
    }
    Ok(value)
}

/// Transactions in storage order: most recently added first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn add(
        &mut self,
        draft: TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<Transaction, LedgerError> {
        if !draft.amount.is_finite() {
            return Err(LedgerError::validation("amount must be a finite number"));
        }
        let note = if draft.note.trim().is_empty() {
            DEFAULT_NOTE.to_string()
        } else {
            draft.note
        };
        let transaction = Transaction {
            id: Uuid::new_v4(),
            amount: draft.amount.abs(),
            kind: draft.kind,
            category: draft.category,
            date: draft.date.unwrap_or(now),
            note,
        };
        self.transactions.insert(0, transaction.clone());
        Ok(transaction)
    }

    /// Removes the transaction and reports where it sat before removal.
    pub fn remove_by_id(&mut self, id: Uuid) -> Option<(Transaction, usize)> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some((self.transactions.remove(index), index))
    }

    /// Reinserts at `index`; positions past the end append instead.
    pub fn restore_at(&mut self, transaction: Transaction, index: usize) {
        let index = index.min(self.transactions.len());
        self.transactions.insert(index, transaction);
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
