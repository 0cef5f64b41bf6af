//! Command handlers
//!
//! One handler per shell command. Handlers resolve path arguments
//! against the working directory, call into the kernel, and map errors
//! to the one-line messages the shell prints. Interactive commands
//! (passwd, logout, exit) are driven by the shell loop itself.

use crate::error::{FsError, UserError, VfshError};
use crate::kernel::Kernel;
use crate::shell::commands::Command;
use crate::storage::path;
use crate::storage::{DEFAULT_FILE_MODE, EntryKind, FileContent, Permissions};

/// Handle a single non-interactive command. Returns the text to print,
/// if any; `cd` additionally updates the working directory in place.
pub fn handle_command(
    kernel: &mut Kernel,
    workdir: &mut Vec<String>,
    command: Command,
) -> Option<String> {
    match command {
        Command::Echo(args) => handle_cmd_echo(kernel, workdir, &args),
        Command::Ls => handle_cmd_ls(kernel, workdir),
        Command::Cat(args) => handle_cmd_cat(kernel, workdir, &args),
        Command::Cd(args) => handle_cmd_cd(kernel, workdir, &args),
        Command::Pwd => Some(path::join(workdir)),
        Command::Touch(args) => handle_cmd_touch(kernel, workdir, &args),
        Command::Rm(args) => handle_cmd_rm(kernel, workdir, &args),
        Command::Mkdir(args) => handle_cmd_mkdir(kernel, workdir, &args),
        Command::Rmdir(args) => handle_cmd_rmdir(kernel, workdir, &args),
        Command::Chmod(args) => handle_cmd_chmod(kernel, workdir, &args),
        Command::Stat(args) => handle_cmd_stat(kernel, workdir, &args),
        Command::UserAdd(args) => handle_cmd_useradd(kernel, &args),
        Command::UserDel(args) => handle_cmd_userdel(kernel, &args),
        Command::UserMod(args) => handle_cmd_usermod(kernel, &args),
        Command::Unknown(name) => Some(format!("vfsh: command not found: {}", name)),
        // the shell loop intercepts these before dispatch
        Command::Passwd(_) | Command::Logout | Command::Exit => None,
    }
}

/// Resolves a path argument: a leading slash is absolute, anything else
/// is relative to the working directory.
fn resolve_arg(workdir: &[String], arg: &str) -> Vec<String> {
    if arg.starts_with('/') {
        path::parse(arg)
    } else {
        let mut parts = workdir.to_vec();
        parts.extend(path::parse(arg));
        parts
    }
}

// Command handler for echo
fn handle_cmd_echo(kernel: &mut Kernel, workdir: &[String], args: &[String]) -> Option<String> {
    if args.is_empty() {
        return Some("USAGE: echo <message> [> filename]".to_string());
    }
    match args.iter().position(|token| token == ">") {
        None => Some(args.join(" ")),
        Some(split) => {
            if split == 0 || args.len() != split + 2 {
                return Some("USAGE: echo <message> [> filename]".to_string());
            }
            let message = args[..split].join(" ");
            let target = resolve_arg(workdir, &args[split + 1]);
            match kernel.write_file(&target, &message) {
                Ok(()) => None,
                Err(err) => Some(format!("echo: {}", err)),
            }
        }
    }
}

// Command handler for ls
fn handle_cmd_ls(kernel: &Kernel, workdir: &[String]) -> Option<String> {
    let entries = match kernel.entries(workdir) {
        Ok(entries) => entries,
        Err(err) => return Some(format!("ls: {}", err)),
    };
    let mut lines = vec![format!("total {}", entries.len())];
    for entry in entries.iter().filter(|entry| entry.is_directory()) {
        lines.push(format!("{:<36}{}", "directory", entry.name));
    }
    for entry in &entries {
        if let EntryKind::File {
            owner,
            group,
            permissions,
        } = &entry.kind
        {
            lines.push(format!(
                "{:<12}{:<12}{:<12}{}",
                permissions.triad_string(),
                owner,
                group,
                entry.name
            ));
        }
    }
    Some(lines.join("\n"))
}

// Command handler for cat
fn handle_cmd_cat(kernel: &Kernel, workdir: &[String], args: &[String]) -> Option<String> {
    if args.len() != 1 {
        return Some("USAGE: cat <filename>".to_string());
    }
    let parts = resolve_arg(workdir, &args[0]);
    match kernel.read_file(&parts) {
        Ok(view) => Some(match view.content {
            FileContent::Text(text) => text,
            FileContent::Denied => "cat: Access denied".to_string(),
        }),
        Err(FsError::NotAFile(_)) => Some("cat: You can read only files".to_string()),
        Err(FsError::InvalidPath(_)) | Err(FsError::NotFound(_)) => {
            Some("Invalid filename".to_string())
        }
        Err(err) => Some(format!("cat: {}", err)),
    }
}

// Command handler for cd
fn handle_cmd_cd(kernel: &Kernel, workdir: &mut Vec<String>, args: &[String]) -> Option<String> {
    let target = match args.first() {
        Some(target) => target,
        None => {
            workdir.clear();
            return None;
        }
    };
    if target == ".." {
        workdir.pop();
        return None;
    }
    let candidate = resolve_arg(workdir, target);
    if kernel.directory_exists(&candidate) {
        *workdir = candidate;
        None
    } else {
        Some("Invalid path".to_string())
    }
}

// Command handler for touch
fn handle_cmd_touch(kernel: &mut Kernel, workdir: &[String], args: &[String]) -> Option<String> {
    if args.len() != 1 {
        return Some("USAGE: touch <filename>".to_string());
    }
    let parts = resolve_arg(workdir, &args[0]);
    let (leaf, parent) = match parts.split_last() {
        Some(split) => split,
        None => return Some("Invalid filename".to_string()),
    };
    match kernel.create_file(parent, leaf, DEFAULT_FILE_MODE, "") {
        Ok(()) => None,
        Err(FsError::AlreadyExists(_)) => Some("touch: File already exists".to_string()),
        Err(err) => Some(format!("touch: {}", err)),
    }
}

// Command handler for rm
fn handle_cmd_rm(kernel: &mut Kernel, workdir: &[String], args: &[String]) -> Option<String> {
    if args.len() != 1 {
        return Some("USAGE: rm <filename>".to_string());
    }
    let parts = resolve_arg(workdir, &args[0]);
    match kernel.remove_file(&parts) {
        Ok(()) => None,
        Err(FsError::NotFound(_)) | Err(FsError::InvalidPath(_)) => {
            Some("rm: File does not exist".to_string())
        }
        Err(FsError::PermissionDenied(_)) => Some("rm: Access denied".to_string()),
        Err(err) => Some(format!("rm: {}", err)),
    }
}

// Command handler for mkdir
fn handle_cmd_mkdir(kernel: &mut Kernel, workdir: &[String], args: &[String]) -> Option<String> {
    if args.len() != 1 {
        return Some("USAGE: mkdir <dirname>".to_string());
    }
    let parts = resolve_arg(workdir, &args[0]);
    let (leaf, parent) = match parts.split_last() {
        Some(split) => split,
        None => return Some("mkdir: Already exists: /".to_string()),
    };
    match kernel.create_directory(parent, leaf) {
        Ok(()) => None,
        Err(err) => Some(format!("mkdir: {}", err)),
    }
}

// Command handler for rmdir
fn handle_cmd_rmdir(kernel: &mut Kernel, workdir: &[String], args: &[String]) -> Option<String> {
    if args.len() != 1 {
        return Some("USAGE: rmdir <dirname>".to_string());
    }
    let parts = resolve_arg(workdir, &args[0]);
    match kernel.remove_directory(&parts) {
        Ok(()) => None,
        Err(err) => Some(format!("rmdir: {}", err)),
    }
}

// Command handler for chmod
fn handle_cmd_chmod(kernel: &mut Kernel, workdir: &[String], args: &[String]) -> Option<String> {
    if args.len() != 2 {
        return Some("USAGE: chmod <mode> <path>".to_string());
    }
    let mode = match args[0]
        .parse::<u16>()
        .ok()
        .and_then(|raw| Permissions::new(raw).ok())
    {
        Some(mode) => mode,
        None => return Some(format!("chmod: invalid mode: {}", args[0])),
    };
    let parts = resolve_arg(workdir, &args[1]);
    match kernel.change_permissions(&parts, mode) {
        Ok(()) => None,
        Err(err) => Some(format!("chmod: {}", err)),
    }
}

// Command handler for stat
fn handle_cmd_stat(kernel: &Kernel, workdir: &[String], args: &[String]) -> Option<String> {
    if args.len() != 1 {
        return Some("USAGE: stat <filename>".to_string());
    }
    let parts = resolve_arg(workdir, &args[0]);
    match kernel.read_file(&parts) {
        Ok(view) => {
            let content = match view.content {
                FileContent::Text(text) => text,
                FileContent::Denied => "Access denied".to_string(),
            };
            Some(format!(
                "File {}:\nOWNER:GROUP = {}:{}\nPermissions: {}\n---\n{}",
                path::join(&parts),
                view.owner,
                view.group,
                view.permissions,
                content
            ))
        }
        Err(err) => Some(format!("stat: {}", err)),
    }
}

// Command handler for useradd
fn handle_cmd_useradd(kernel: &mut Kernel, args: &[String]) -> Option<String> {
    if args.len() != 1 {
        return Some("USAGE: useradd <username>".to_string());
    }
    match kernel.create_user(&args[0]) {
        Ok(()) => None,
        Err(VfshError::User(UserError::AlreadyExists(_))) => {
            Some("useradd: User already exists".to_string())
        }
        Err(VfshError::Fs(FsError::PermissionDenied(_))) => {
            Some("useradd: Access denied".to_string())
        }
        Err(err) => Some(format!("useradd: {}", err)),
    }
}

// Command handler for userdel
fn handle_cmd_userdel(kernel: &mut Kernel, args: &[String]) -> Option<String> {
    if args.len() != 1 {
        return Some("USAGE: userdel <username>".to_string());
    }
    match kernel.remove_user(&args[0]) {
        Ok(()) => None,
        Err(VfshError::Fs(FsError::PermissionDenied(_))) => {
            Some("userdel: Access denied".to_string())
        }
        Err(err) => Some(format!("userdel: {}", err)),
    }
}

// Command handler for usermod
fn handle_cmd_usermod(kernel: &mut Kernel, args: &[String]) -> Option<String> {
    if args.len() != 3 {
        return Some("USAGE: usermod <flag> <group> <username>".to_string());
    }
    let (flag, group, username) = (&args[0], &args[1], &args[2]);
    let result = match flag.as_str() {
        "-a" => kernel.add_group(username, group),
        "-r" => kernel.remove_group(username, group),
        _ => return Some("USAGE: usermod <flag> <group> <username>".to_string()),
    };
    match result {
        Ok(()) => None,
        Err(VfshError::Fs(FsError::PermissionDenied(_))) => {
            Some("usermod: Access denied".to_string())
        }
        Err(err) => Some(format!("usermod: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VfshConfig;
    use crate::shell::commands::parse_command;
    use crate::storage::{
        Filesystem, MemoryStore, Node, PUBLIC_FILE_MODE, PartitionDocument, USER_FILE_MODE,
    };

    fn fixture() -> Kernel {
        let records = [
            ("root", "root rootpass(2026-08-21) root,admin\nf:\n1"),
            ("andrew", "andrew abcd(2026-08-21) andrew,staff\nf:\n1"),
            ("eve", "eve abcd(2026-08-21) eve,guests\nf:\n1"),
        ];
        let mut users = Node::directory();
        for (name, record) in records {
            users.children_mut().unwrap().insert(
                name.to_string(),
                Node::file("root", "root", USER_FILE_MODE, record),
            );
        }

        let mut admin = Node::directory();
        admin
            .children_mut()
            .unwrap()
            .insert("users".to_string(), users);
        admin.children_mut().unwrap().insert(
            "control_questions".to_string(),
            Node::file("root", "root", PUBLIC_FILE_MODE, "a?\nb?\nc?\nd?\ne?\nf?"),
        );

        let mut home = Node::directory();
        home.children_mut().unwrap().insert(
            "report.txt".to_string(),
            Node::file(
                "andrew",
                "staff",
                Permissions::new(640).unwrap(),
                "quarterly numbers",
            ),
        );
        home.children_mut().unwrap().insert(
            "secret.txt".to_string(),
            Node::file(
                "andrew",
                "andrew",
                Permissions::new(600).unwrap(),
                "classified",
            ),
        );
        home.children_mut()
            .unwrap()
            .insert("notes".to_string(), Node::directory());

        let mut tree = Node::directory();
        tree.children_mut()
            .unwrap()
            .insert("admin".to_string(), admin);
        tree.children_mut()
            .unwrap()
            .insert("home".to_string(), home);

        let fs =
            Filesystem::open(Box::new(MemoryStore::new(PartitionDocument::new(tree)))).unwrap();
        Kernel::new(fs, VfshConfig::default())
    }

    fn run(kernel: &mut Kernel, workdir: &mut Vec<String>, line: &str) -> Option<String> {
        handle_command(kernel, workdir, parse_command(line).unwrap())
    }

    fn parts(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_echo_prints_its_message() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();
        assert_eq!(
            run(&mut kernel, &mut workdir, "echo hello world"),
            Some("hello world".to_string())
        );
    }

    #[test]
    fn test_echo_redirect_writes_the_file() {
        let mut kernel = fixture();
        kernel.switch_user("andrew").unwrap();
        let mut workdir = parts(&["home"]);
        assert_eq!(
            run(&mut kernel, &mut workdir, "echo hello world > out.txt"),
            None
        );
        let view = kernel.read_file(&parts(&["home", "out.txt"])).unwrap();
        assert_eq!(view.content, FileContent::Text("hello world".to_string()));
        assert_eq!(view.owner, "andrew");
    }

    #[test]
    fn test_echo_redirect_usage_errors() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();
        let usage = Some("USAGE: echo <message> [> filename]".to_string());
        assert_eq!(run(&mut kernel, &mut workdir, "echo"), usage);
        assert_eq!(run(&mut kernel, &mut workdir, "echo > out.txt"), usage);
        assert_eq!(run(&mut kernel, &mut workdir, "echo hi >"), usage);
        assert_eq!(run(&mut kernel, &mut workdir, "echo hi > a b"), usage);
    }

    #[test]
    fn test_echo_denied_write_stays_silent() {
        let mut kernel = fixture();
        kernel.switch_user("eve").unwrap();
        let mut workdir = Vec::new();
        assert_eq!(
            run(&mut kernel, &mut workdir, "echo hacked > /home/report.txt"),
            None
        );
        kernel.switch_user("andrew").unwrap();
        let view = kernel.read_file(&parts(&["home", "report.txt"])).unwrap();
        assert_eq!(
            view.content,
            FileContent::Text("quarterly numbers".to_string())
        );
    }

    #[test]
    fn test_echo_into_missing_directory_is_reported() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();
        let output = run(&mut kernel, &mut workdir, "echo hi > /nowhere/out.txt");
        assert_eq!(output, Some("echo: Invalid path: /nowhere".to_string()));
    }

    #[test]
    fn test_ls_layout() {
        let mut kernel = fixture();
        let mut workdir = parts(&["home"]);
        let expected = format!(
            "total 3\n{:<36}{}\n{:<12}{:<12}{:<12}{}\n{:<12}{:<12}{:<12}{}",
            "directory",
            "notes",
            "rw-r-----",
            "andrew",
            "staff",
            "report.txt",
            "rw-------",
            "andrew",
            "andrew",
            "secret.txt"
        );
        assert_eq!(run(&mut kernel, &mut workdir, "ls"), Some(expected));
    }

    #[test]
    fn test_ls_empty_directory() {
        let mut kernel = fixture();
        let mut workdir = parts(&["home", "notes"]);
        assert_eq!(
            run(&mut kernel, &mut workdir, "ls"),
            Some("total 0".to_string())
        );
    }

    #[test]
    fn test_cat_prints_readable_content() {
        let mut kernel = fixture();
        kernel.switch_user("andrew").unwrap();
        let mut workdir = parts(&["home"]);
        assert_eq!(
            run(&mut kernel, &mut workdir, "cat report.txt"),
            Some("quarterly numbers".to_string())
        );
    }

    #[test]
    fn test_cat_denied_and_error_messages() {
        let mut kernel = fixture();
        kernel.switch_user("eve").unwrap();
        let mut workdir = parts(&["home"]);
        assert_eq!(
            run(&mut kernel, &mut workdir, "cat secret.txt"),
            Some("cat: Access denied".to_string())
        );
        assert_eq!(
            run(&mut kernel, &mut workdir, "cat notes"),
            Some("cat: You can read only files".to_string())
        );
        assert_eq!(
            run(&mut kernel, &mut workdir, "cat missing.txt"),
            Some("Invalid filename".to_string())
        );
        assert_eq!(
            run(&mut kernel, &mut workdir, "cat"),
            Some("USAGE: cat <filename>".to_string())
        );
    }

    #[test]
    fn test_cd_flows() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();

        assert_eq!(run(&mut kernel, &mut workdir, "cd /home"), None);
        assert_eq!(workdir, parts(&["home"]));

        assert_eq!(run(&mut kernel, &mut workdir, "cd notes"), None);
        assert_eq!(workdir, parts(&["home", "notes"]));

        assert_eq!(run(&mut kernel, &mut workdir, "cd .."), None);
        assert_eq!(workdir, parts(&["home"]));

        assert_eq!(
            run(&mut kernel, &mut workdir, "cd bogus"),
            Some("Invalid path".to_string())
        );
        assert_eq!(workdir, parts(&["home"]));

        // a file is not a destination
        assert_eq!(
            run(&mut kernel, &mut workdir, "cd report.txt"),
            Some("Invalid path".to_string())
        );

        assert_eq!(run(&mut kernel, &mut workdir, "cd"), None);
        assert!(workdir.is_empty());
    }

    #[test]
    fn test_cd_dotdot_at_root_stays_put() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();
        assert_eq!(run(&mut kernel, &mut workdir, "cd .."), None);
        assert!(workdir.is_empty());
    }

    #[test]
    fn test_pwd_prints_the_workdir() {
        let mut kernel = fixture();
        let mut workdir = parts(&["home", "notes"]);
        assert_eq!(
            run(&mut kernel, &mut workdir, "pwd"),
            Some("/home/notes".to_string())
        );
        workdir.clear();
        assert_eq!(run(&mut kernel, &mut workdir, "pwd"), Some("/".to_string()));
    }

    #[test]
    fn test_touch_creates_with_defaults() {
        let mut kernel = fixture();
        kernel.switch_user("andrew").unwrap();
        let mut workdir = parts(&["home"]);
        assert_eq!(run(&mut kernel, &mut workdir, "touch new.txt"), None);

        let view = kernel.read_file(&parts(&["home", "new.txt"])).unwrap();
        assert_eq!(view.owner, "andrew");
        assert_eq!(view.group, "andrew");
        assert_eq!(view.permissions, DEFAULT_FILE_MODE);
        assert_eq!(view.content, FileContent::Text(String::new()));

        assert_eq!(
            run(&mut kernel, &mut workdir, "touch new.txt"),
            Some("touch: File already exists".to_string())
        );
    }

    #[test]
    fn test_rm_messages() {
        let mut kernel = fixture();
        kernel.switch_user("eve").unwrap();
        let mut workdir = Vec::new();
        assert_eq!(
            run(&mut kernel, &mut workdir, "rm /home/report.txt"),
            Some("rm: Access denied".to_string())
        );

        kernel.switch_user("andrew").unwrap();
        assert_eq!(run(&mut kernel, &mut workdir, "rm /home/report.txt"), None);
        assert_eq!(
            run(&mut kernel, &mut workdir, "rm /home/report.txt"),
            Some("rm: File does not exist".to_string())
        );
    }

    #[test]
    fn test_mkdir_and_rmdir() {
        let mut kernel = fixture();
        let mut workdir = parts(&["home"]);
        assert_eq!(run(&mut kernel, &mut workdir, "mkdir projects"), None);
        assert_eq!(run(&mut kernel, &mut workdir, "cd projects"), None);
        assert_eq!(run(&mut kernel, &mut workdir, "cd .."), None);

        assert_eq!(
            run(&mut kernel, &mut workdir, "mkdir projects"),
            Some("mkdir: Already exists: /home/projects".to_string())
        );

        assert_eq!(run(&mut kernel, &mut workdir, "rmdir projects"), None);
        assert_eq!(
            run(&mut kernel, &mut workdir, "rmdir projects"),
            Some("rmdir: Not found: /home/projects".to_string())
        );
    }

    #[test]
    fn test_rmdir_refuses_non_empty_and_files() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();
        assert_eq!(
            run(&mut kernel, &mut workdir, "rmdir /home"),
            Some("rmdir: Directory is not empty: /home".to_string())
        );
        assert_eq!(
            run(&mut kernel, &mut workdir, "rmdir /home/report.txt"),
            Some("rmdir: Not a directory: /home/report.txt".to_string())
        );
    }

    #[test]
    fn test_chmod_owner_only() {
        let mut kernel = fixture();
        kernel.switch_user("andrew").unwrap();
        let mut workdir = parts(&["home"]);
        assert_eq!(run(&mut kernel, &mut workdir, "chmod 644 report.txt"), None);

        let view = kernel.read_file(&parts(&["home", "report.txt"])).unwrap();
        assert_eq!(view.permissions, Permissions::new(644).unwrap());

        kernel.switch_user("eve").unwrap();
        let output = run(&mut kernel, &mut workdir, "chmod 777 report.txt");
        assert!(output.unwrap().starts_with("chmod: Access denied"));
    }

    #[test]
    fn test_chmod_rejects_bad_modes() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();
        assert_eq!(
            run(&mut kernel, &mut workdir, "chmod abc /home/report.txt"),
            Some("chmod: invalid mode: abc".to_string())
        );
        assert_eq!(
            run(&mut kernel, &mut workdir, "chmod 999 /home/report.txt"),
            Some("chmod: invalid mode: 999".to_string())
        );
    }

    #[test]
    fn test_stat_layout() {
        let mut kernel = fixture();
        kernel.switch_user("andrew").unwrap();
        let mut workdir = Vec::new();
        let expected = "File /home/report.txt:\n\
                        OWNER:GROUP = andrew:staff\n\
                        Permissions: 640\n\
                        ---\n\
                        quarterly numbers";
        assert_eq!(
            run(&mut kernel, &mut workdir, "stat /home/report.txt"),
            Some(expected.to_string())
        );
    }

    #[test]
    fn test_stat_shows_metadata_despite_denied_content() {
        let mut kernel = fixture();
        kernel.switch_user("eve").unwrap();
        let mut workdir = Vec::new();
        let output = run(&mut kernel, &mut workdir, "stat /home/secret.txt").unwrap();
        assert!(output.contains("OWNER:GROUP = andrew:andrew"));
        assert!(output.ends_with("---\nAccess denied"));
    }

    #[test]
    fn test_useradd_messages() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();
        assert_eq!(run(&mut kernel, &mut workdir, "useradd bob"), None);
        assert!(kernel.list_usernames().unwrap().contains(&"bob".to_string()));

        assert_eq!(
            run(&mut kernel, &mut workdir, "useradd bob"),
            Some("useradd: User already exists".to_string())
        );

        kernel.switch_user("andrew").unwrap();
        assert_eq!(
            run(&mut kernel, &mut workdir, "useradd carol"),
            Some("useradd: Access denied".to_string())
        );
    }

    #[test]
    fn test_userdel_is_root_only() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();
        kernel.switch_user("andrew").unwrap();
        assert_eq!(
            run(&mut kernel, &mut workdir, "userdel eve"),
            Some("userdel: Access denied".to_string())
        );

        kernel.switch_user("root").unwrap();
        assert_eq!(run(&mut kernel, &mut workdir, "userdel eve"), None);
        assert!(!kernel.list_usernames().unwrap().contains(&"eve".to_string()));
    }

    #[test]
    fn test_usermod_flows() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();

        assert_eq!(run(&mut kernel, &mut workdir, "usermod -a dev andrew"), None);
        assert_eq!(run(&mut kernel, &mut workdir, "usermod -r dev andrew"), None);
        assert_eq!(
            run(&mut kernel, &mut workdir, "usermod -r dev andrew"),
            Some("usermod: User is not a part of this group: dev".to_string())
        );

        assert_eq!(
            run(&mut kernel, &mut workdir, "usermod -x dev andrew"),
            Some("USAGE: usermod <flag> <group> <username>".to_string())
        );

        kernel.switch_user("andrew").unwrap();
        assert_eq!(
            run(&mut kernel, &mut workdir, "usermod -a dev andrew"),
            Some("usermod: Access denied".to_string())
        );
    }

    #[test]
    fn test_unknown_command_message() {
        let mut kernel = fixture();
        let mut workdir = Vec::new();
        assert_eq!(
            run(&mut kernel, &mut workdir, "frobnicate now"),
            Some("vfsh: command not found: frobnicate".to_string())
        );
    }
}
