//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the turn loop and battle flow can stay focused on orchestration.

pub mod action;
pub mod errors;

pub use action::{Action, ActionOutcome};
pub use errors::{Result, RuntimeError};
