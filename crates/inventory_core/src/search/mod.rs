//! Inventory search entry points.
//!
//! # Responsibility
//! - Filter in-memory item lists by a free-text term.
//! - Keep matching rules inside core so every front end agrees.

pub mod filter;
