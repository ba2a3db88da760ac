use std::sync::Arc;

use fintrack_core::{
    core::FinanceTracker,
    init,
    ledger::{TransactionDraft, TransactionKind},
    storage::MemoryStore,
};

#[test]
fn tracker_smoke() {
    init();

    let mut tracker = FinanceTracker::with_system_clock(Box::new(Arc::new(MemoryStore::new())));
    for (amount, kind, category) in [
        (4.5, TransactionKind::Expense, "Food & Drinks"),
        (60.0, TransactionKind::Expense, "Bills"),
        (1500.0, TransactionKind::Income, "Other"),
    ] {
        tracker
            .add_transaction(TransactionDraft::new(amount, kind, category))
            .unwrap();
    }

    assert_eq!(tracker.totals().balance(), 1435.5);
    assert_eq!(tracker.history().len(), 3);
    assert_eq!(tracker.category_breakdown()[0].name, "Bills");
    assert_eq!(tracker.daily_trend().len(), 1);
}
