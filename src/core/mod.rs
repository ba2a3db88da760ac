pub mod tracker;
pub mod utils;

pub use tracker::FinanceTracker;
