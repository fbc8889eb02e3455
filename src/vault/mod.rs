//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - The append-only `site:token` line format (`format`)
//! - `VaultStore`, the in-memory site -> credential view (`store`)

pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use format::{LoadWarning, LoadedRecords};
pub use store::{AddOutcome, LoadReport, VaultStore};
