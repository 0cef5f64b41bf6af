//! Command parsing
//!
//! Defines the shell command set and the parser that turns a raw input
//! line into a [`Command`]. Argument arity is checked by the handlers,
//! not here, so usage errors carry command-specific text.

/// One parsed shell command.
///
/// Variants with a `Vec<String>` payload carry their raw arguments;
/// the matching handler validates arity and spelling.
#[derive(Debug, PartialEq)]
pub enum Command {
    Echo(Vec<String>),    // print a message, optionally redirected into a file
    Ls,                   // list the working directory
    Cat(Vec<String>),     // print file content
    Cd(Vec<String>),      // change the working directory
    Pwd,                  // print the working directory
    Touch(Vec<String>),   // create an empty file
    Rm(Vec<String>),      // remove a file
    Mkdir(Vec<String>),   // create a directory
    Rmdir(Vec<String>),   // remove an empty directory
    Chmod(Vec<String>),   // change file permissions
    Stat(Vec<String>),    // print file metadata
    UserAdd(Vec<String>), // create an account
    UserDel(Vec<String>), // remove an account
    UserMod(Vec<String>), // add or remove a group membership
    Passwd(Vec<String>),  // set a password, interactive
    Logout,               // end the session, back to the login prompt
    Exit,                 // terminate the shell
    Unknown(String),      // anything else
}

/// Parses a raw input line into a `Command`.
///
/// Returns `None` for a blank line, which the shell treats as a no-op.
pub fn parse_command(raw: &str) -> Option<Command> {
    let mut tokens = raw.split_whitespace().map(str::to_string);
    let name = tokens.next()?;
    let args: Vec<String> = tokens.collect();

    Some(match name.as_str() {
        "echo" => Command::Echo(args),
        "ls" => Command::Ls,
        "cat" => Command::Cat(args),
        "cd" => Command::Cd(args),
        "pwd" => Command::Pwd,
        "touch" => Command::Touch(args),
        "rm" => Command::Rm(args),
        "mkdir" => Command::Mkdir(args),
        "rmdir" => Command::Rmdir(args),
        "chmod" => Command::Chmod(args),
        "stat" => Command::Stat(args),
        "useradd" => Command::UserAdd(args),
        "userdel" => Command::UserDel(args),
        "usermod" => Command::UserMod(args),
        "passwd" => Command::Passwd(args),
        "logout" => Command::Logout,
        "exit" => Command::Exit,
        _ => Command::Unknown(name),
    })
}
