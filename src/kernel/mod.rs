//! Kernel module
//!
//! The identity type and the kernel facade the shell drives.

pub mod core;
pub mod identity;

pub use self::core::Kernel;
pub use identity::{Identity, ROOT_USERNAME};
