//! Flutter-facing bridge over `inventory_core`.

pub mod api;
