//! Application layer
//!
//! Services coordinating domain rules with storage and collaborators.

pub mod services;
