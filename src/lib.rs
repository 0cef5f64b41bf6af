//! vfsh library
//!
//! A single-user virtual filesystem shell. The filesystem lives in one
//! JSON partition file; accounts, permissions, and identity
//! confirmation all sit on top of it.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod confirm;
pub mod error;
pub mod kernel;
pub mod shell;
pub mod storage;
pub mod users;

pub use kernel::Kernel;
pub use shell::Shell;
