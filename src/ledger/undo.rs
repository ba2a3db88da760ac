use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::transaction::Transaction;

/// Seconds a deletion stays recoverable.
pub const DEFAULT_UNDO_WINDOW_SECS: i64 = 6;

/// The deletion currently held for undo.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDeletion {
    pub transaction: Transaction,
    pub index: usize,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UndoState {
    #[default]
    Empty,
    Holding(PendingDeletion),
}

/// Single-slot, time-boxed memory of the most recent deletion.
#[derive(Debug, Clone)]
pub struct UndoBuffer {
    window: Duration,
    state: UndoState,
}

impl Default for UndoBuffer {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_UNDO_WINDOW_SECS))
    }
}

impl UndoBuffer {
    /// Non-positive windows would expire every deletion on the spot, so
    /// they are replaced by the default.
    pub fn new(window: Duration) -> Self {
        let window = if window > Duration::zero() {
            window
        } else {
            tracing::warn!(
                window_secs = window.num_seconds(),
                "undo window must be positive, using default"
            );
            Duration::seconds(DEFAULT_UNDO_WINDOW_SECS)
        };
        Self {
            window,
            state: UndoState::Empty,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> &UndoState {
        &self.state
    }

    /// Holds a fresh deletion, discarding any older one. Returns the expiry.
    pub fn hold(
        &mut self,
        transaction: Transaction,
        index: usize,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        // Saturate instead of overflowing for absurdly long windows.
        let expires_at = now
            .checked_add_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if let UndoState::Holding(previous) = &self.state {
            tracing::debug!(
                discarded = %previous.transaction.id,
                "pending undo replaced by newer deletion"
            );
        }
        self.state = UndoState::Holding(PendingDeletion {
            transaction,
            index,
            expires_at,
        });
        expires_at
    }

    /// Expiry callback scheduled for the deletion of `id`. Only clears the
    /// buffer while it still holds that deletion.
    pub fn expire(&mut self, id: Uuid) -> bool {
        match &self.state {
            UndoState::Holding(pending) if pending.transaction.id == id => {
                self.state = UndoState::Empty;
                true
            }
            _ => false,
        }
    }

    /// Drops the held entry once its deadline has passed.
    pub fn expire_due(&mut self, now: DateTime<Utc>) -> bool {
        match &self.state {
            UndoState::Holding(pending) if now >= pending.expires_at => {
                self.state = UndoState::Empty;
                true
            }
            _ => false,
        }
    }

    /// Held deletion that is still within its window.
    pub fn pending(&self, now: DateTime<Utc>) -> Option<&PendingDeletion> {
        match &self.state {
            UndoState::Holding(pending) if now < pending.expires_at => Some(pending),
            _ => None,
        }
    }

    /// Takes the held deletion for restoration, leaving the buffer empty.
    pub fn take(&mut self, now: DateTime<Utc>) -> Option<PendingDeletion> {
        self.expire_due(now);
        match std::mem::take(&mut self.state) {
            UndoState::Holding(pending) => Some(pending),
            UndoState::Empty => None,
        }
    }

    pub fn clear(&mut self) {
        self.state = UndoState::Empty;
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, UndoState::Empty)
    }
}
