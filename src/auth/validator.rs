//! Password validation
//!
//! The login-time checks. Expiry is evaluated before the password is
//! even compared, so an expired account reports expiry no matter what
//! was typed.

use chrono::{Duration, NaiveDate};
use log::info;

use crate::config::VfshConfig;
use crate::error::{AuthError, UserError, VfshError};
use crate::storage::Filesystem;
use crate::users::registry;

/// Verifies a login attempt. On success returns the date the password
/// expires on, for the shell to display.
pub fn verify_password(
    fs: &Filesystem,
    username: &str,
    raw: &str,
    config: &VfshConfig,
    today: NaiveDate,
) -> Result<NaiveDate, VfshError> {
    if !registry::password_is_set(fs, username)? {
        return Err(AuthError::PasswordUnset(username.to_string()).into());
    }
    let password = registry::tagged_password(fs, username)?;
    let created = password.created.ok_or_else(|| {
        UserError::Malformed(format!("password for '{}' has no date tag", username))
    })?;

    let expires = created + Duration::days(config.password_expire_days);
    if expires < today {
        return Err(AuthError::PasswordExpired.into());
    }
    if password.secret != raw {
        return Err(AuthError::WrongPassword.into());
    }
    info!("User '{}' authenticated", username);
    Ok(expires)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Filesystem, MemoryStore, Node, PartitionDocument, Permissions};

    fn fixture() -> Filesystem {
        let mode = Permissions::new(660).unwrap();
        let mut users = Node::directory();
        users.children_mut().unwrap().insert(
            "bob".to_string(),
            Node::file("root", "root", mode, "bob abcd(2026-08-21) bob\nf:\n1"),
        );
        users.children_mut().unwrap().insert(
            "fresh".to_string(),
            Node::file("root", "root", mode, ""),
        );
        users.children_mut().unwrap().insert(
            "legacy".to_string(),
            Node::file("root", "root", mode, "legacy abcd legacy"),
        );
        let mut admin = Node::directory();
        admin
            .children_mut()
            .unwrap()
            .insert("users".to_string(), users);
        let mut tree = Node::directory();
        tree.children_mut()
            .unwrap()
            .insert("admin".to_string(), admin);
        Filesystem::open(Box::new(MemoryStore::new(PartitionDocument::new(tree)))).unwrap()
    }

    fn config() -> VfshConfig {
        VfshConfig::default()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_correct_password_returns_expiry_date() {
        let fs = fixture();
        let expires =
            verify_password(&fs, "bob", "abcd", &config(), day(2026, 8, 21)).unwrap();
        assert_eq!(expires, day(2026, 9, 20));
    }

    #[test]
    fn test_wrong_password() {
        let fs = fixture();
        let err =
            verify_password(&fs, "bob", "nope", &config(), day(2026, 8, 21)).unwrap_err();
        assert!(matches!(err, VfshError::Auth(AuthError::WrongPassword)));
    }

    #[test]
    fn test_expiry_is_checked_before_the_password() {
        let fs = fixture();
        let err =
            verify_password(&fs, "bob", "nope", &config(), day(2026, 12, 1)).unwrap_err();
        assert!(matches!(err, VfshError::Auth(AuthError::PasswordExpired)));
    }

    #[test]
    fn test_login_on_the_expiry_day_still_works() {
        let fs = fixture();
        let expires =
            verify_password(&fs, "bob", "abcd", &config(), day(2026, 9, 20)).unwrap();
        assert_eq!(expires, day(2026, 9, 20));
    }

    #[test]
    fn test_unknown_user() {
        let fs = fixture();
        let err =
            verify_password(&fs, "nobody", "abcd", &config(), day(2026, 8, 21)).unwrap_err();
        assert!(matches!(err, VfshError::User(UserError::NotFound(_))));
    }

    #[test]
    fn test_account_without_password_cannot_log_in() {
        let fs = fixture();
        let err =
            verify_password(&fs, "fresh", "", &config(), day(2026, 8, 21)).unwrap_err();
        assert!(matches!(err, VfshError::Auth(AuthError::PasswordUnset(_))));
    }

    #[test]
    fn test_untagged_password_is_malformed() {
        let fs = fixture();
        let err =
            verify_password(&fs, "legacy", "abcd", &config(), day(2026, 8, 21)).unwrap_err();
        assert!(matches!(err, VfshError::User(UserError::Malformed(_))));
    }
}
