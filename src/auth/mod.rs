//! Auth module
//!
//! Login-time password verification and attempt tracking.

pub mod attempts;
pub mod validator;

pub use attempts::{LoginTracker, record_wrong_password};
pub use validator::verify_password;
