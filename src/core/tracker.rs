use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    errors::LedgerError,
    ledger::{
        category_breakdown, daily_trend, sorted_by_date_descending, totals, Category,
        CategoryRegistry, CategorySpend, DailySpend, PendingDeletion, Totals, Transaction,
        TransactionDraft, TransactionLedger, UndoBuffer,
    },
    storage::{KeyValueStore, CATEGORIES_KEY, TRANSACTIONS_KEY},
    time::{Clock, SystemClock},
};

/// Owns the ledger, the category registry and the undo slot, and writes
/// each collection back to the store whenever it changes.
pub struct FinanceTracker {
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    ledger: TransactionLedger,
    registry: CategoryRegistry,
    undo: UndoBuffer,
}

impl FinanceTracker {
    /// Loads both collections, falling back to defaults for anything missing
    /// or unreadable.
    pub fn load(store: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        let ledger = load_collection::<TransactionLedger>(store.as_ref(), TRANSACTIONS_KEY)
            .unwrap_or_default();
        let registry = load_collection::<CategoryRegistry>(store.as_ref(), CATEGORIES_KEY)
            .unwrap_or_else(CategoryRegistry::with_defaults);
        tracing::info!(
            transactions = ledger.len(),
            categories = registry.len(),
            "tracker loaded"
        );
        Self {
            store,
            clock,
            ledger,
            registry,
            undo: UndoBuffer::default(),
        }
    }

    pub fn with_system_clock(store: Box<dyn KeyValueStore>) -> Self {
        Self::load(store, Box::new(SystemClock))
    }

    pub fn with_undo_window(mut self, window: Duration) -> Self {
        self.undo = UndoBuffer::new(window);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.as_slice()
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        let transaction = self.ledger.add(draft, self.clock.now())?;
        tracing::info!(
            id = %transaction.id,
            kind = ?transaction.kind,
            amount = transaction.amount,
            category = %transaction.category,
            "transaction added"
        );
        self.persist_transactions();
        Ok(transaction)
    }

    /// Deletes the transaction and parks it in the undo slot. Unknown ids are
    /// ignored.
    pub fn delete_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let (transaction, index) = self.ledger.remove_by_id(id)?;
        let expires_at = self
            .undo
            .hold(transaction.clone(), index, self.clock.now());
        tracing::info!(%id, index, %expires_at, "transaction deleted");
        self.persist_transactions();
        Some(transaction)
    }

    /// Restores the most recent deletion if its window is still open.
    pub fn undo_delete(&mut self) -> Option<Transaction> {
        let PendingDeletion {
            transaction, index, ..
        } = self.undo.take(self.clock.now())?;
        self.ledger.restore_at(transaction.clone(), index);
        tracing::info!(id = %transaction.id, index, "deletion undone");
        self.persist_transactions();
        Some(transaction)
    }

    /// Expiry callback for the deletion of `id`.
    pub fn expire_undo(&mut self, id: Uuid) -> bool {
        self.undo.expire(id)
    }

    pub fn pending_undo(&mut self) -> Option<&PendingDeletion> {
        let now = self.clock.now();
        self.undo.expire_due(now);
        self.undo.pending(now)
    }

    pub fn add_category(&mut self, name: &str, color: &str) -> Result<Category, LedgerError> {
        let category = self.registry.add(name, color)?;
        tracing::info!(id = %category.id, name = %category.name, "category added");
        self.persist_categories();
        Ok(category)
    }

    /// Removes a category. Transactions keep their category names untouched.
    /// The final remaining category cannot be removed.
    pub fn delete_category(&mut self, id: Uuid) -> Result<Option<Category>, LedgerError> {
        if self.registry.find(id).is_none() {
            return Ok(None);
        }
        if self.registry.len() <= 1 {
            return Err(LedgerError::validation(
                "at least one category must remain",
            ));
        }
        let removed = self.registry.remove(id);
        if let Some(category) = &removed {
            tracing::info!(id = %category.id, name = %category.name, "category deleted");
            self.persist_categories();
        }
        Ok(removed)
    }

    pub fn history(&self) -> Vec<&Transaction> {
        sorted_by_date_descending(self.ledger.as_slice())
    }

    pub fn totals(&self) -> Totals {
        totals(self.ledger.as_slice())
    }

    pub fn category_breakdown(&self) -> Vec<CategorySpend> {
        category_breakdown(self.ledger.as_slice(), &self.registry)
    }

    pub fn daily_trend(&self) -> Vec<DailySpend> {
        daily_trend(self.ledger.as_slice())
    }

    fn persist_transactions(&self) {
        persist_collection(self.store.as_ref(), TRANSACTIONS_KEY, &self.ledger);
    }

    fn persist_categories(&self) {
        persist_collection(self.store.as_ref(), CATEGORIES_KEY, &self.registry);
    }
}

fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, error = %err, "store unreadable, using defaults");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "stored collection malformed, using defaults");
            None
        }
    }
}

fn persist_collection<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(LedgerError::from)
        .and_then(|json| store.set(key, &json));
    if let Err(err) = result {
        tracing::warn!(key, error = %err, "failed to persist collection");
    }
}
