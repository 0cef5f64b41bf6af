//! Identities
//!
//! Who is asking. Every permission decision keys off the username and
//! group memberships of the logged-in user.

/// The superuser account name.
pub const ROOT_USERNAME: &str = "root";

#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    username: String,
    groups: Vec<String>,
}

impl Identity {
    pub fn new(username: impl Into<String>, groups: Vec<String>) -> Self {
        Identity {
            username: username.into(),
            groups,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// The first listed group. A user that has never been handed extra
    /// groups sits in a group named after themselves.
    pub fn primary_group(&self) -> &str {
        self.groups.first().map(String::as_str).unwrap_or(&self.username)
    }

    pub fn is_root(&self) -> bool {
        self.username == ROOT_USERNAME
    }

    pub fn is_member(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_group_is_first_listed() {
        let id = Identity::new("andrew", vec!["staff".to_string(), "dev".to_string()]);
        assert_eq!(id.primary_group(), "staff");
    }

    #[test]
    fn test_primary_group_falls_back_to_username() {
        let id = Identity::new("andrew", Vec::new());
        assert_eq!(id.primary_group(), "andrew");
    }

    #[test]
    fn test_membership() {
        let id = Identity::new("andrew", vec!["staff".to_string()]);
        assert!(id.is_member("staff"));
        assert!(!id.is_member("admin"));
    }

    #[test]
    fn test_root_detection() {
        assert!(Identity::new("root", vec!["root".to_string()]).is_root());
        assert!(!Identity::new("andrew", Vec::new()).is_root());
    }
}
