//! Core business logic for TaskFleet.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, permission rules, and billing calculations live here.
//!
//! # Modules
//!
//! - `access` - Role-based access control and route guarding
//! - `billing` - Pricing lookups, charge computation, and the billing ledger

pub mod access;
pub mod billing;
