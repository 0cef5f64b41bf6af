//! Error types
//!
//! Defines domain-specific error types for each module of the shell.

use std::fmt;

/// Filesystem store errors
#[derive(Debug)]
pub enum FsError {
    InvalidPath(String),
    NotADirectory(String),
    NotAFile(String),
    AlreadyExists(String),
    NotFound(String),
    NotEmpty(String),
    PermissionDenied(String),
    InvalidArgument(String),
    Storage(String),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            FsError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            FsError::NotAFile(p) => write!(f, "Not a file: {}", p),
            FsError::AlreadyExists(p) => write!(f, "Already exists: {}", p),
            FsError::NotFound(p) => write!(f, "Not found: {}", p),
            FsError::NotEmpty(p) => write!(f, "Directory is not empty: {}", p),
            FsError::PermissionDenied(p) => write!(f, "Access denied: {}", p),
            FsError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            FsError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// User directory errors
#[derive(Debug)]
pub enum UserError {
    NotFound(String),
    AlreadyExists(String),
    QuotaExceeded,
    LengthTooShort(usize),
    MissingLetters,
    MissingDigits,
    InvalidPassword(String),
    NotMember(String),
    InvalidName(String),
    Malformed(String),
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::NotFound(u) => write!(f, "User does not exist: {}", u),
            UserError::AlreadyExists(u) => write!(f, "User already exists: {}", u),
            UserError::QuotaExceeded => write!(f, "Users limit has been reached"),
            UserError::LengthTooShort(min) => {
                write!(f, "Password should contain at least {} characters", min)
            }
            UserError::MissingLetters => write!(f, "Password should contain letters"),
            UserError::MissingDigits => write!(f, "Password should contain numbers"),
            UserError::InvalidPassword(msg) => write!(f, "Invalid password: {}", msg),
            UserError::NotMember(g) => write!(f, "User is not a part of this group: {}", g),
            UserError::InvalidName(msg) => write!(f, "Invalid name: {}", msg),
            UserError::Malformed(msg) => write!(f, "Malformed user record: {}", msg),
        }
    }
}

impl std::error::Error for UserError {}

/// Login flow errors
#[derive(Debug)]
pub enum AuthError {
    WrongPassword,
    PasswordUnset(String),
    PasswordExpired,
    LoginExhausted(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::WrongPassword => write!(f, "Wrong password"),
            AuthError::PasswordUnset(u) => write!(f, "No password set for user: {}", u),
            AuthError::PasswordExpired => write!(f, "Your password expired, set new one"),
            AuthError::LoginExhausted(u) => {
                write!(f, "Too many wrong attempts, account '{}' removed", u)
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Identity confirmation errors
#[derive(Debug)]
pub enum ConfirmError {
    NotRegistered(String),
    BankTooSmall(usize),
    UnknownQuestion(usize),
    IdentificationFailed,
}

impl fmt::Display for ConfirmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmError::NotRegistered(u) => {
                write!(f, "No confirmation method registered for user: {}", u)
            }
            ConfirmError::BankTooSmall(n) => {
                write!(f, "Question bank has {} entries, at least 3 are required", n)
            }
            ConfirmError::UnknownQuestion(i) => {
                write!(f, "Question {} is not in the question bank", i)
            }
            ConfirmError::IdentificationFailed => write!(f, "User not identified"),
        }
    }
}

impl std::error::Error for ConfirmError {}

/// General shell error that encompasses all error types
#[derive(Debug)]
pub enum VfshError {
    Fs(FsError),
    User(UserError),
    Auth(AuthError),
    Confirm(ConfirmError),
}

impl fmt::Display for VfshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfshError::Fs(e) => write!(f, "{}", e),
            VfshError::User(e) => write!(f, "{}", e),
            VfshError::Auth(e) => write!(f, "{}", e),
            VfshError::Confirm(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for VfshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VfshError::Fs(e) => Some(e),
            VfshError::User(e) => Some(e),
            VfshError::Auth(e) => Some(e),
            VfshError::Confirm(e) => Some(e),
        }
    }
}

// Implement conversions from specific errors to VfshError
impl From<FsError> for VfshError {
    fn from(error: FsError) -> Self {
        VfshError::Fs(error)
    }
}

impl From<UserError> for VfshError {
    fn from(error: UserError) -> Self {
        VfshError::User(error)
    }
}

impl From<AuthError> for VfshError {
    fn from(error: AuthError) -> Self {
        VfshError::Auth(error)
    }
}

impl From<ConfirmError> for VfshError {
    fn from(error: ConfirmError) -> Self {
        VfshError::Confirm(error)
    }
}
