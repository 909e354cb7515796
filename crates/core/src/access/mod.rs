//! Role-based access control.
//!
//! The authentication service hands over a role string exactly once; it
//! is parsed into [`Role`] at that boundary and every downstream check is
//! a plain enum comparison. Permission predicates are total: a "no"
//! answer is a value, never an error, and an absent user always denies.

pub mod capability;
pub mod error;
pub mod guard;
pub mod role;

#[cfg(test)]
mod tests;

pub use capability::{Capability, can_edit_task, require, user_can};
pub use error::AccessError;
pub use guard::{AuthState, GuardOutcome, RouteGuard};
pub use role::{CurrentUser, Role, has_role};
