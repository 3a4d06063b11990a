//! Common utilities shared between the validator and the contract probe

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};
