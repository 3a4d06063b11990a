//! packcheck - pack fixture validation and WebChat contract probing
//!
//! Two independent checks share this crate: a schema validator that
//! reports every problem in a directory of packs at once, and a fail-fast
//! contract suite that runs against a live backend or an offline stub.

pub mod cli;
pub mod commands;
pub mod common;
pub mod contract;
pub mod packs;

// Re-export commonly used types for tests
pub use common::{Error, Result};
