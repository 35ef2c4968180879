//! Salary Engine
//!
//! This crate computes net pay from gross pay under a capped contribution
//! schedule plus a bracketed withholding schedule, and inverts the relationship
//! to find the gross pay that yields a requested net pay.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
