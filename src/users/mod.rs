//! Users module
//!
//! Account records and the registry that manages them.

pub mod record;
pub mod registry;

pub use record::{ConfirmationRecord, SecretQuestion, TaggedPassword, UserRecord};
