//! Core library components.
//!
//! Identifier resolution, profiles, paginated queries, output rendering and
//! sharing, on top of the record-store client.

pub mod cipher;
pub mod client;
pub mod constants;
pub mod domain;
pub mod identifier;
pub mod profile;
pub mod query;
pub mod render;
pub mod share;
pub mod types;
pub mod validation;
