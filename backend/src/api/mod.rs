//! Transport-agnostic API infrastructure shared by the HTTP surface.

pub mod health;
