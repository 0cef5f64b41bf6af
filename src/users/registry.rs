//! User registry
//!
//! Account management over the /admin/users subtree. Records are read
//! and written raw: permission digits gate shell traffic, not the
//! registry itself.

use chrono::NaiveDate;
use log::{info, warn};

use crate::config::VfshConfig;
use crate::error::{ConfirmError, FsError, UserError, VfshError};
use crate::kernel::Identity;
use crate::storage::{Filesystem, USER_FILE_MODE};
use crate::users::record::{ConfirmationRecord, TaggedPassword, UserRecord};

const MAX_NAME_LENGTH: usize = 32;

/// Path segments of the account directory.
pub fn users_dir() -> Vec<String> {
    vec!["admin".to_string(), "users".to_string()]
}

/// Path segments of one account file.
pub fn user_path(username: &str) -> Vec<String> {
    vec![
        "admin".to_string(),
        "users".to_string(),
        username.to_string(),
    ]
}

fn require_root(requester: &Identity) -> Result<(), FsError> {
    if requester.is_root() {
        Ok(())
    } else {
        Err(FsError::PermissionDenied(format!(
            "user '{}' is not root",
            requester.username()
        )))
    }
}

/// Usernames and group names share one charset: they have to survive
/// both the path layer and the comma-joined group list in the record.
fn validate_name(name: &str) -> Result<(), UserError> {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(UserError::InvalidName(name.to_string()));
    }
    let ok = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !ok {
        return Err(UserError::InvalidName(name.to_string()));
    }
    Ok(())
}

pub fn list_usernames(fs: &Filesystem) -> Result<Vec<String>, VfshError> {
    Ok(fs.list_children(&users_dir())?)
}

pub fn exists(fs: &Filesystem, username: &str) -> bool {
    fs.exists(&user_path(username))
}

/// Creates an account with empty content. The password (and with it
/// the group list and confirmation record) comes later via
/// [`set_password`].
pub fn create_user(
    fs: &mut Filesystem,
    username: &str,
    requester: &Identity,
    config: &VfshConfig,
) -> Result<(), VfshError> {
    require_root(requester)?;
    validate_name(username)?;
    if exists(fs, username) {
        return Err(UserError::AlreadyExists(username.to_string()).into());
    }
    if list_usernames(fs)?.len() >= config.max_users {
        return Err(UserError::QuotaExceeded.into());
    }
    fs.create_file(&users_dir(), username, USER_FILE_MODE, "", requester)?;
    info!("Account '{}' created", username);
    Ok(())
}

/// Deletes an account record. Callers gate this themselves: the login
/// flow invokes it on exhausted attempts with no identity at hand.
pub fn remove_user(fs: &mut Filesystem, username: &str) -> Result<(), VfshError> {
    if !exists(fs, username) {
        return Err(UserError::NotFound(username.to_string()).into());
    }
    fs.remove_raw(&user_path(username))?;
    warn!("Account '{}' removed", username);
    Ok(())
}

/// Whether the account has gone through its first password set.
pub fn password_is_set(fs: &Filesystem, username: &str) -> Result<bool, VfshError> {
    if !exists(fs, username) {
        return Err(UserError::NotFound(username.to_string()).into());
    }
    let content = fs.file_content(&user_path(username))?;
    Ok(!content.trim().is_empty())
}

pub fn load_record(fs: &Filesystem, username: &str) -> Result<UserRecord, VfshError> {
    if !exists(fs, username) {
        return Err(UserError::NotFound(username.to_string()).into());
    }
    let content = fs.file_content(&user_path(username))?;
    Ok(UserRecord::parse(content)?)
}

fn store_record(fs: &mut Filesystem, record: &UserRecord) -> Result<(), VfshError> {
    fs.set_file_content(&user_path(&record.username), record.serialize())?;
    Ok(())
}

/// Checks a candidate password against the configured policy.
pub fn validate_password(raw: &str, config: &VfshConfig) -> Result<(), UserError> {
    if raw.len() < config.password_min_length {
        return Err(UserError::LengthTooShort(config.password_min_length));
    }
    if raw.chars().any(char::is_whitespace) || raw.contains('(') || raw.contains(')') {
        return Err(UserError::InvalidPassword(
            "must not contain spaces or parentheses".to_string(),
        ));
    }
    if config.password_require_letters && !raw.chars().any(char::is_alphabetic) {
        return Err(UserError::MissingLetters);
    }
    if config.password_require_digits && !raw.chars().any(|c| c.is_ascii_digit()) {
        return Err(UserError::MissingDigits);
    }
    Ok(())
}

/// Sets or replaces an account password, tagging it with `today`. The
/// first set also fixes the group list to the account's own name and
/// stores the registration collected by the caller; later sets leave
/// groups and confirmation record untouched.
pub fn set_password(
    fs: &mut Filesystem,
    username: &str,
    raw: &str,
    registration: Option<ConfirmationRecord>,
    requester: &Identity,
    config: &VfshConfig,
    today: NaiveDate,
) -> Result<(), VfshError> {
    require_root(requester)?;
    if !exists(fs, username) {
        return Err(UserError::NotFound(username.to_string()).into());
    }
    validate_password(raw, config)?;
    let password = TaggedPassword::new(raw, today);

    let record = if password_is_set(fs, username)? {
        let mut record = load_record(fs, username)?;
        record.password = password;
        record
    } else {
        let confirmation =
            registration.ok_or_else(|| ConfirmError::NotRegistered(username.to_string()))?;
        UserRecord {
            username: username.to_string(),
            password,
            groups: vec![username.to_string()],
            confirmation: Some(confirmation),
        }
    };

    store_record(fs, &record)?;
    info!("Password for '{}' updated", username);
    Ok(())
}

/// Appends a group to the account's list.
pub fn add_group(
    fs: &mut Filesystem,
    username: &str,
    group: &str,
    requester: &Identity,
) -> Result<(), VfshError> {
    require_root(requester)?;
    validate_name(group)?;
    let mut record = load_record(fs, username)?;
    record.groups.push(group.to_string());
    store_record(fs, &record)?;
    info!("User '{}' added to group '{}'", username, group);
    Ok(())
}

/// Drops a group from the account's list.
pub fn remove_group(
    fs: &mut Filesystem,
    username: &str,
    group: &str,
    requester: &Identity,
) -> Result<(), VfshError> {
    require_root(requester)?;
    let mut record = load_record(fs, username)?;
    let position = record
        .groups
        .iter()
        .position(|g| g == group)
        .ok_or_else(|| UserError::NotMember(group.to_string()))?;
    record.groups.remove(position);
    store_record(fs, &record)?;
    info!("User '{}' removed from group '{}'", username, group);
    Ok(())
}

/// The stored password with its creation date.
pub fn tagged_password(fs: &Filesystem, username: &str) -> Result<TaggedPassword, VfshError> {
    Ok(load_record(fs, username)?.password)
}
