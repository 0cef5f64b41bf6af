//! Partition bootstrap
//!
//! Layout of a fresh partition: the root account under /admin/users,
//! the control question bank, and an empty /home.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::kernel::ROOT_USERNAME;
use crate::storage::{Node, PUBLIC_FILE_MODE, PartitionDocument, USER_FILE_MODE};
use crate::users::{TaggedPassword, UserRecord};

/// Password the root account starts with.
pub const DEFAULT_ROOT_PASSWORD: &str = "rootpass";

/// Question bank seeded into a fresh partition. Indices shown to users
/// are 1-based positions in this list.
pub const DEFAULT_QUESTIONS: [&str; 6] = [
    "What was the name of your first pet?",
    "What is your mother's maiden name?",
    "What was the model of your first car?",
    "In what city were you born?",
    "What was the name of your primary school?",
    "What is your favourite dish?",
];

/// Builds the tree a new installation starts from. The root password
/// is tagged with `today` so it expires on the usual schedule.
pub fn default_partition(today: NaiveDate) -> PartitionDocument {
    let root_record = UserRecord {
        username: ROOT_USERNAME.to_string(),
        password: TaggedPassword::new(DEFAULT_ROOT_PASSWORD, today),
        groups: vec![ROOT_USERNAME.to_string(), "admin".to_string()],
        confirmation: None,
    };

    let mut users = BTreeMap::new();
    users.insert(
        ROOT_USERNAME.to_string(),
        Node::file(
            ROOT_USERNAME,
            ROOT_USERNAME,
            USER_FILE_MODE,
            root_record.serialize(),
        ),
    );

    let mut admin = BTreeMap::new();
    admin.insert("users".to_string(), Node::Directory { content: users });
    admin.insert(
        "control_questions".to_string(),
        Node::file(
            ROOT_USERNAME,
            ROOT_USERNAME,
            PUBLIC_FILE_MODE,
            DEFAULT_QUESTIONS.join("\n"),
        ),
    );

    let mut top = BTreeMap::new();
    top.insert("admin".to_string(), Node::Directory { content: admin });
    top.insert("home".to_string(), Node::directory());

    PartitionDocument::new(Node::Directory { content: top })
}
