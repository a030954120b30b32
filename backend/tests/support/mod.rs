//! Shared helpers for the integration suites.

pub mod in_memory;
pub mod restock_world;
