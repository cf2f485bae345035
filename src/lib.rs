//! Leave Policy Allocation Engine
//!
//! This crate computes leave entitlement allocations for employees assigned to a
//! leave policy: effective period resolution, overlap validation, carry-forward
//! advisories and month-by-month pro-ration for earned leave types.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
