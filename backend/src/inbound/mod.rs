//! Inbound adapters translating transport requests into domain use-cases.

pub mod http;
