//! Integration test utilities for the CREA portal
//!
//! Spawns the API against real PostgreSQL and Redis instances, with a
//! local stand-in for the payment gateway's order endpoint.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
