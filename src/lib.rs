#![doc(test(attr(deny(warnings))))]

//! FinTrack Core keeps a personal income/expense ledger with user-defined
//! categories, derives the analytics views shown by the shell, and asks a
//! remote language model for spending advice.

pub mod advisor;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("FinTrack Core tracing initialized.");
    });
}
