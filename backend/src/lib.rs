//! Restock coordination backend for the storefront.
//!
//! Customers vote for and subscribe to out-of-stock products; inventory
//! updates that take a product from zero to positive stock reset the votes
//! and notify every pending subscriber. The crate follows a hexagonal
//! layout: `domain` holds the ports and services, `inbound` the HTTP
//! adapter, and `outbound` the PostgreSQL, Redis, and channel adapters.

pub mod api;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
