//! Core use-case services.
//!
//! # Responsibility
//! - Hold the authoritative in-memory inventory for one front end.
//! - Orchestrate validate -> mutate -> persist for every CRUD operation.

pub mod inventory_service;
