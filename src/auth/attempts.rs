//! Login attempts
//!
//! Consecutive-failure bookkeeping for the login prompt. Only
//! wrong-password failures count; a failure for a different username
//! restarts the count for that username.

use log::warn;

use crate::error::{AuthError, VfshError};
use crate::storage::Filesystem;
use crate::users::registry;

#[derive(Debug)]
pub struct LoginTracker {
    limit: u32,
    username: Option<String>,
    failures: u32,
}

impl LoginTracker {
    pub fn new(limit: u32) -> Self {
        LoginTracker {
            limit,
            username: None,
            failures: 0,
        }
    }

    /// Notes one wrong-password failure. Returns true when the account
    /// has used up its attempts.
    pub fn record_failure(&mut self, username: &str) -> bool {
        if self.username.as_deref() == Some(username) {
            self.failures += 1;
        } else {
            self.username = Some(username.to_string());
            self.failures = 1;
        }
        self.failures >= self.limit
    }

    pub fn reset(&mut self) {
        self.username = None;
        self.failures = 0;
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

/// Feeds one wrong-password failure into the tracker. On exhaustion the
/// offending account is deleted and [`AuthError::LoginExhausted`] comes
/// back for the shell to report.
pub fn record_wrong_password(
    tracker: &mut LoginTracker,
    fs: &mut Filesystem,
    username: &str,
) -> Result<(), VfshError> {
    if tracker.record_failure(username) {
        warn!(
            "Login attempts for '{}' exhausted, deleting the account",
            username
        );
        registry::remove_user(fs, username)?;
        tracker.reset();
        return Err(AuthError::LoginExhausted(username.to_string()).into());
    }
    Ok(())
}
