//! Data models for the employee record service.
//!
//! Field names serialize in camelCase to match the JSON contract of the HTTP API.

mod employee;
pub mod validation;

pub use employee::*;
