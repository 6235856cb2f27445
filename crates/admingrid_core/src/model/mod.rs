//! Domain records rendered by list views.
//!
//! # Responsibility
//! - Define the extension catalog record and its classification enums.
//! - Connect records to grid helper contracts (locking, publish state).
//!
//! # Invariants
//! - `extension_id == 0` means "not persisted yet".
//! - A lock time is only meaningful while a lock owner is set.

pub mod extension;
