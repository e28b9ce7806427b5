//! Shared types and pure logic for the vendor comparison dashboard.
//!
//! Everything here compiles both natively and to wasm32, so the frontend
//! and the unit tests use the same code paths.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
