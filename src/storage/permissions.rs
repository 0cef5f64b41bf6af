//! File permissions
//!
//! Evaluates an owner/group/other permission triad against a requester
//! identity. Digits are compared as ranges, not as bit masks: a digit of
//! 4 or more grants read, and a digit in {2, 3, 6, 7} grants write. The
//! matching class is exclusive: when the requester owns the file, only
//! the owner digit is consulted, even if it denies access.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FsError;
use crate::kernel::Identity;

/// Default permissions for files created by `touch` and write-as-create.
pub const DEFAULT_FILE_MODE: Permissions = Permissions(640);

/// Permissions for account record files under /admin/users.
pub const USER_FILE_MODE: Permissions = Permissions(660);

/// Permissions for world-readable system files such as the question bank.
pub const PUBLIC_FILE_MODE: Permissions = Permissions(664);

/// A three-digit owner/group/other access mode.
///
/// Stored in the partition document as a plain number whose decimal
/// digits are read as the three octal classes, e.g. `640`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Permissions(u16);

impl Permissions {
    /// Build a triad from its numeric form, rejecting digits above 7.
    pub fn new(raw: u16) -> Result<Self, FsError> {
        if raw > 777 || raw / 10 % 10 > 7 || raw % 10 > 7 {
            return Err(FsError::InvalidArgument(format!(
                "permissions {} are not three octal digits",
                raw
            )));
        }
        Ok(Permissions(raw))
    }

    pub fn owner_digit(&self) -> u8 {
        (self.0 / 100) as u8
    }

    pub fn group_digit(&self) -> u8 {
        (self.0 / 10 % 10) as u8
    }

    pub fn other_digit(&self) -> u8 {
        (self.0 % 10) as u8
    }

    /// Render as the nine-character `rwxr-x---` form used by `ls`.
    pub fn triad_string(&self) -> String {
        let mut result = String::with_capacity(9);
        for mut digit in [self.owner_digit(), self.group_digit(), self.other_digit()] {
            for (value, letter) in [(4, 'r'), (2, 'w'), (1, 'x')] {
                if digit >= value {
                    result.push(letter);
                    digit -= value;
                } else {
                    result.push('-');
                }
            }
        }
        result
    }
}

impl TryFrom<u16> for Permissions {
    type Error = FsError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Permissions::new(raw)
    }
}

impl From<Permissions> for u16 {
    fn from(permissions: Permissions) -> u16 {
        permissions.0
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The digit that applies to `requester` under owner → group → other
/// precedence. The first matching class decides; there is no fall-through.
fn effective_digit(owner: &str, group: &str, permissions: Permissions, requester: &Identity) -> u8 {
    if requester.username() == owner {
        permissions.owner_digit()
    } else if requester.is_member(group) {
        permissions.group_digit()
    } else {
        permissions.other_digit()
    }
}

/// Whether `requester` may read the file's content.
pub fn can_read(owner: &str, group: &str, permissions: Permissions, requester: &Identity) -> bool {
    effective_digit(owner, group, permissions, requester) >= 4
}

/// Whether `requester` may write the file's content.
pub fn can_write(owner: &str, group: &str, permissions: Permissions, requester: &Identity) -> bool {
    matches!(effective_digit(owner, group, permissions, requester), 2 | 3 | 6 | 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(username: &str, groups: &[&str]) -> Identity {
        Identity::new(username, groups.iter().map(|g| g.to_string()).collect())
    }

    fn perms(owner: u8, group: u8, other: u8) -> Permissions {
        Permissions::new(owner as u16 * 100 + group as u16 * 10 + other as u16).unwrap()
    }

    #[test]
    fn test_read_truth_table_owner_digit() {
        let owner = identity("alice", &[]);
        for digit in 0..=7u8 {
            let granted = can_read("alice", "staff", perms(digit, 0, 0), &owner);
            assert_eq!(granted, digit >= 4, "owner digit {}", digit);
        }
    }

    #[test]
    fn test_read_truth_table_group_digit() {
        let member = identity("bob", &["staff"]);
        for digit in 0..=7u8 {
            let granted = can_read("alice", "staff", perms(0, digit, 0), &member);
            assert_eq!(granted, digit >= 4, "group digit {}", digit);
        }
    }

    #[test]
    fn test_read_truth_table_other_digit() {
        let stranger = identity("bob", &["guest"]);
        for digit in 0..=7u8 {
            let granted = can_read("alice", "staff", perms(0, 0, digit), &stranger);
            assert_eq!(granted, digit >= 4, "other digit {}", digit);
        }
    }

    #[test]
    fn test_write_truth_table_all_classes() {
        let owner = identity("alice", &[]);
        let member = identity("bob", &["staff"]);
        let stranger = identity("bob", &["guest"]);
        for digit in 0..=7u8 {
            let expected = matches!(digit, 2 | 3 | 6 | 7);
            assert_eq!(
                can_write("alice", "staff", perms(digit, 0, 0), &owner),
                expected,
                "owner digit {}",
                digit
            );
            assert_eq!(
                can_write("alice", "staff", perms(0, digit, 0), &member),
                expected,
                "group digit {}",
                digit
            );
            assert_eq!(
                can_write("alice", "staff", perms(0, 0, digit), &stranger),
                expected,
                "other digit {}",
                digit
            );
        }
    }

    #[test]
    fn test_matching_class_is_exclusive() {
        // The owner digit denies while the group and other digits would
        // grant; the owner match must still win.
        let owner = identity("alice", &["staff"]);
        assert!(!can_read("alice", "staff", perms(0, 7, 7), &owner));
        assert!(!can_write("alice", "staff", perms(0, 7, 7), &owner));

        // Same for a group member versus the other digit.
        let member = identity("bob", &["staff"]);
        assert!(!can_read("alice", "staff", perms(7, 0, 7), &member));
    }

    #[test]
    fn test_group_scenario_640() {
        let file = perms(6, 4, 0);
        let member = identity("eve", &["storage"]);
        assert!(can_read("andrew", "storage", file, &member));
        assert!(!can_write("andrew", "storage", file, &member));

        let stranger = identity("eve", &["guest"]);
        assert!(!can_read("andrew", "storage", file, &stranger));
        assert!(!can_write("andrew", "storage", file, &stranger));
    }

    #[test]
    fn test_permissions_rejects_non_octal_digits() {
        assert!(Permissions::new(640).is_ok());
        assert!(Permissions::new(777).is_ok());
        assert!(Permissions::new(0).is_ok());
        assert!(Permissions::new(780).is_err());
        assert!(Permissions::new(648).is_err());
        assert!(Permissions::new(1000).is_err());
    }

    #[test]
    fn test_triad_string() {
        assert_eq!(perms(6, 4, 0).triad_string(), "rw-r-----");
        assert_eq!(perms(7, 5, 1).triad_string(), "rwxr-x--x");
        assert_eq!(perms(0, 0, 0).triad_string(), "---------");
    }
}
