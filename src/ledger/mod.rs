//! Color counting, rare-color policy and the brick inventory

/// Histogram of palette codes
pub mod histogram;
/// Rare-color substitution and manual replacement
pub mod replace;
/// Per-image brick requirement report
pub mod report;
/// Persistent ledger and its stores
pub mod store;

pub use histogram::ColorCounts;
pub use replace::{ReplaceOutcome, auto_replace, manual_replace};
pub use report::brick_report;
pub use store::{FileLedgerStore, Ledger, LedgerStore, MemoryLedgerStore};
