//! Inventory domain model.
//!
//! # Responsibility
//! - Define the canonical product record persisted in the inventory file.
//! - Convert raw form input into validated records.
//!
//! # Invariants
//! - Every item carries a stable `ItemId` assigned at creation.
//! - Persisted items always satisfy `Item::validate()`.

pub mod item;
