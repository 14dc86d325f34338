//! Infrastructure layer
//!
//! Storage adapters, collaborator implementations, and the HTTP surface.

pub mod adapters;
pub mod http;
