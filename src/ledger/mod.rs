//! Ledger data model: categories, transactions, undo, and derived views.

pub mod category;
pub mod projection;
pub mod transaction;
pub mod undo;

pub use category::{Category, CategoryRegistry, FALLBACK_COLOR, PRESET_COLORS};
pub use projection::{
    calendar_day, category_breakdown, daily_trend, sorted_by_date_descending, totals,
    CategorySpend, DailySpend, Totals, TREND_WINDOW_DAYS,
};
pub use transaction::{
    parse_amount, Transaction, TransactionDraft, TransactionKind, TransactionLedger, DEFAULT_NOTE,
};
pub use undo::{PendingDeletion, UndoBuffer, UndoState, DEFAULT_UNDO_WINDOW_SECS};
