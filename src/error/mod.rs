//! Error handling
//!
//! Defines error types and conversions for the shell.

pub mod types;

pub use types::*;
