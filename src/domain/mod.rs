//! Domain layer
//!
//! Core entities and business rules, free of transport and storage concerns.

pub mod catalog;
pub mod payments;
pub mod pricing;
pub mod promotions;
