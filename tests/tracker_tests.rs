mod common;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use common::{start_time, stored, tracker};
use fintrack_core::{
    errors::LedgerError,
    ledger::{TransactionDraft, TransactionKind, DEFAULT_NOTE, FALLBACK_COLOR},
    storage::{CATEGORIES_KEY, TRANSACTIONS_KEY},
};

fn expense(amount: f64, category: &str, note: &str) -> TransactionDraft {
    TransactionDraft::new(amount, TransactionKind::Expense, category).with_note(note)
}

fn income(amount: f64, category: &str, note: &str) -> TransactionDraft {
    TransactionDraft::new(amount, TransactionKind::Income, category).with_note(note)
}

#[test]
fn coffee_and_paycheck_give_expected_balance() {
    let (mut tracker, _, _) = tracker();
    tracker
        .add_transaction(expense(12.50, "Food & Drinks", "Coffee"))
        .unwrap();
    tracker
        .add_transaction(income(2000.0, "Other", "Paycheck"))
        .unwrap();

    let totals = tracker.totals();
    assert_eq!(totals.income, 2000.0);
    assert_eq!(totals.expense, 12.5);
    assert_eq!(totals.balance(), 1987.5);

    let notes: Vec<&str> = tracker
        .transactions()
        .iter()
        .map(|txn| txn.note.as_str())
        .collect();
    assert_eq!(notes, ["Paycheck", "Coffee"]);
}

#[test]
fn delete_then_undo_restores_original_position() {
    let (mut tracker, _, _) = tracker();
    let coffee = tracker
        .add_transaction(expense(12.50, "Food & Drinks", "Coffee"))
        .unwrap();
    let paycheck = tracker
        .add_transaction(income(2000.0, "Other", "Paycheck"))
        .unwrap();

    let removed = tracker.delete_transaction(coffee.id).unwrap();
    assert_eq!(removed, coffee);
    assert_eq!(tracker.transactions(), [paycheck.clone()]);
    assert_eq!(tracker.totals().balance(), 2000.0);

    let restored = tracker.undo_delete().unwrap();
    assert_eq!(restored, coffee);
    assert_eq!(tracker.transactions(), [paycheck, coffee]);
    assert!(tracker.undo_delete().is_none());
}

#[test]
fn undo_window_closes_after_deadline() {
    let (mut tracker, _, clock) = tracker();
    let lunch = tracker
        .add_transaction(expense(9.0, "Food & Drinks", "Lunch"))
        .unwrap();
    tracker.delete_transaction(lunch.id).unwrap();

    clock.advance(Duration::seconds(5));
    assert!(tracker.pending_undo().is_some());

    clock.advance(Duration::seconds(1));
    assert!(tracker.pending_undo().is_none());
    assert!(tracker.undo_delete().is_none());
    assert!(tracker.transactions().is_empty());
}

#[test]
fn configured_undo_window_is_respected() {
    let (tracker, _, clock) = tracker();
    let mut tracker = tracker.with_undo_window(Duration::seconds(30));
    let taxi = tracker
        .add_transaction(expense(20.0, "Transport", "Taxi"))
        .unwrap();
    tracker.delete_transaction(taxi.id).unwrap();

    clock.advance(Duration::seconds(20));
    assert_eq!(tracker.undo_delete().map(|txn| txn.id), Some(taxi.id));
}

#[test]
fn newer_deletion_replaces_pending_undo() {
    let (mut tracker, _, _) = tracker();
    let first = tracker
        .add_transaction(expense(1.0, "Other", "First"))
        .unwrap();
    let second = tracker
        .add_transaction(expense(2.0, "Other", "Second"))
        .unwrap();

    tracker.delete_transaction(first.id).unwrap();
    tracker.delete_transaction(second.id).unwrap();

    assert_eq!(tracker.undo_delete().map(|txn| txn.id), Some(second.id));
    assert!(tracker.undo_delete().is_none());
    assert!(tracker.ledger().get(first.id).is_none());
}

#[test]
fn stale_expiry_does_not_clear_newer_deletion() {
    let (mut tracker, _, _) = tracker();
    let first = tracker
        .add_transaction(expense(1.0, "Other", "First"))
        .unwrap();
    let second = tracker
        .add_transaction(expense(2.0, "Other", "Second"))
        .unwrap();

    tracker.delete_transaction(first.id).unwrap();
    tracker.delete_transaction(second.id).unwrap();

    assert!(!tracker.expire_undo(first.id));
    assert_eq!(
        tracker.pending_undo().map(|pending| pending.transaction.id),
        Some(second.id)
    );
    assert!(tracker.expire_undo(second.id));
    assert!(tracker.undo_delete().is_none());
}

#[test]
fn deleting_unknown_transaction_changes_nothing() {
    let (mut tracker, store, _) = tracker();
    tracker
        .add_transaction(expense(3.0, "Other", "Snack"))
        .unwrap();
    let before = stored(&store, TRANSACTIONS_KEY);

    assert!(tracker.delete_transaction(uuid::Uuid::new_v4()).is_none());
    assert_eq!(tracker.transactions().len(), 1);
    assert!(tracker.pending_undo().is_none());
    assert_eq!(stored(&store, TRANSACTIONS_KEY), before);
}

#[test]
fn amounts_are_stored_as_magnitudes() {
    let (mut tracker, _, _) = tracker();
    let refund = tracker
        .add_transaction(income(-40.0, "Shopping", "Refund"))
        .unwrap();
    assert_eq!(refund.amount, 40.0);
    assert_eq!(tracker.totals().income, 40.0);

    let err = tracker
        .add_transaction(expense(f64::NAN, "Other", "Broken"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(tracker.transactions().len(), 1);
}

#[test]
fn blank_note_and_missing_date_get_defaults() {
    let (mut tracker, _, _) = tracker();
    let txn = tracker
        .add_transaction(expense(5.0, "Other", "   "))
        .unwrap();
    assert_eq!(txn.note, DEFAULT_NOTE);
    assert_eq!(txn.date, start_time());
}

#[test]
fn every_mutation_is_persisted() {
    let (mut tracker, store, _) = tracker();
    assert!(stored(&store, TRANSACTIONS_KEY).is_none());

    let gym = tracker
        .add_transaction(expense(30.0, "Health", "Gym"))
        .unwrap();
    let id = gym.id.to_string();
    assert!(stored(&store, TRANSACTIONS_KEY).unwrap().contains(&id));

    tracker.delete_transaction(gym.id).unwrap();
    assert!(!stored(&store, TRANSACTIONS_KEY).unwrap().contains(&id));

    tracker.undo_delete().unwrap();
    assert!(stored(&store, TRANSACTIONS_KEY).unwrap().contains(&id));

    let pets = tracker.add_category("Pets", "#FF8800").unwrap();
    assert!(stored(&store, CATEGORIES_KEY).unwrap().contains("Pets"));

    tracker.delete_category(pets.id).unwrap();
    assert!(!stored(&store, CATEGORIES_KEY).unwrap().contains("Pets"));
}

#[test]
fn persisted_transactions_use_wire_field_names() {
    let (mut tracker, store, _) = tracker();
    tracker
        .add_transaction(income(10.0, "Other", "Gift"))
        .unwrap();
    let raw = stored(&store, TRANSACTIONS_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert_eq!(first["type"], "income");
    assert_eq!(first["amount"], 10.0);
    assert_eq!(first["category"], "Other");
    assert!(first["date"].as_str().is_some());
}

#[test]
fn deleting_category_leaves_transactions_untouched() {
    let (mut tracker, _, _) = tracker();
    let coffee = tracker
        .add_transaction(expense(12.5, "Food & Drinks", "Coffee"))
        .unwrap();
    let food = tracker
        .categories()
        .lookup("Food & Drinks")
        .cloned()
        .unwrap();

    let removed = tracker.delete_category(food.id).unwrap();
    assert_eq!(removed.map(|category| category.id), Some(food.id));
    assert!(tracker.categories().lookup("Food & Drinks").is_none());
    assert_eq!(tracker.ledger().get(coffee.id), Some(&coffee));

    let breakdown = tracker.category_breakdown();
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].name, "Food & Drinks");
    assert_eq!(breakdown[0].color, FALLBACK_COLOR);
}

#[test]
fn last_category_cannot_be_deleted() {
    let (mut tracker, _, _) = tracker();
    let ids: Vec<_> = tracker.categories().iter().map(|c| c.id).collect();
    let (keep, rest) = ids.split_last().unwrap();
    for id in rest {
        assert!(tracker.delete_category(*id).unwrap().is_some());
    }

    let err = tracker.delete_category(*keep).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(tracker.categories().len(), 1);
    assert!(tracker.delete_category(uuid::Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn blank_category_name_is_rejected() {
    let (mut tracker, _, _) = tracker();
    let before = tracker.categories().len();
    assert!(tracker.add_category("   ", "#000000").is_err());
    assert_eq!(tracker.categories().len(), before);

    let added = tracker.add_category("  Travel  ", "#123456").unwrap();
    assert_eq!(added.name, "Travel");
    assert_eq!(tracker.categories().last().map(|c| c.id), Some(added.id));
}

#[test]
fn history_and_trend_follow_transaction_dates() {
    let (mut tracker, _, _) = tracker();
    let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2025, 5, d, h, 0, 0).unwrap();
    tracker
        .add_transaction(expense(4.0, "Food & Drinks", "Tea").with_date(day(18, 8)))
        .unwrap();
    tracker
        .add_transaction(expense(6.0, "Food & Drinks", "Cake").with_date(day(18, 20)))
        .unwrap();
    tracker
        .add_transaction(income(100.0, "Other", "Bonus").with_date(day(19, 12)))
        .unwrap();
    tracker
        .add_transaction(expense(15.0, "Transport", "Train").with_date(day(17, 7)))
        .unwrap();

    let history: Vec<&str> = tracker
        .history()
        .into_iter()
        .map(|txn| txn.note.as_str())
        .collect();
    assert_eq!(history, ["Bonus", "Cake", "Tea", "Train"]);

    let trend = tracker.daily_trend();
    let days: Vec<(NaiveDate, f64)> = trend.iter().map(|d| (d.date, d.amount)).collect();
    assert_eq!(
        days,
        [
            (NaiveDate::from_ymd_opt(2025, 5, 17).unwrap(), 15.0),
            (NaiveDate::from_ymd_opt(2025, 5, 18).unwrap(), 10.0),
        ]
    );

    let breakdown = tracker.category_breakdown();
    assert_eq!(breakdown[0].name, "Transport");
    assert_eq!(breakdown[0].value, 15.0);
    assert_eq!(breakdown[1].name, "Food & Drinks");
    assert_eq!(breakdown[1].value, 10.0);
}

#[test]
fn huge_undo_window_does_not_panic_on_delete() {
    let (tracker, _, clock) = tracker();
    let mut tracker = tracker.with_undo_window(Duration::seconds(9_000_000_000_000));
    let rent = tracker
        .add_transaction(expense(900.0, "Bills", "Rent"))
        .unwrap();
    tracker.delete_transaction(rent.id).unwrap();

    clock.advance(Duration::days(30));
    assert_eq!(tracker.undo_delete().map(|txn| txn.id), Some(rent.id));
}

#[test]
fn non_positive_undo_window_keeps_undo_available() {
    for window in [Duration::zero(), Duration::seconds(-5)] {
        let (tracker, _, clock) = tracker();
        let mut tracker = tracker.with_undo_window(window);
        let snack = tracker
            .add_transaction(expense(2.0, "Food & Drinks", "Snack"))
            .unwrap();
        tracker.delete_transaction(snack.id).unwrap();
        assert_eq!(tracker.undo_delete().map(|txn| txn.id), Some(snack.id));

        tracker.delete_transaction(snack.id).unwrap();
        clock.advance(Duration::seconds(6));
        assert!(tracker.undo_delete().is_none());
    }
}
