//! Validate an incoming Query against the resource registry and produce a Plan
//! to be handed to an executor.

pub mod error;
pub mod helpers;
pub mod query;
