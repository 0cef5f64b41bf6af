//! Kernel
//!
//! The session facade. It owns the filesystem, the configuration, and
//! the active identity, and keys every gated operation off that
//! identity so callers never thread one through.

use chrono::{Local, NaiveDate};
use log::info;

use crate::auth;
use crate::auth::attempts::LoginTracker;
use crate::config::VfshConfig;
use crate::confirm::{Challenge, QuestionBank, QuestionPrompt, draw_question_prompts};
use crate::error::{ConfirmError, FsError, UserError, VfshError};
use crate::kernel::identity::{Identity, ROOT_USERNAME};
use crate::storage::{DirEntry, FileView, Filesystem, Permissions};
use crate::users::record::ConfirmationRecord;
use crate::users::registry;

pub struct Kernel {
    fs: Filesystem,
    identity: Identity,
    config: VfshConfig,
}

impl Kernel {
    /// Boots with the root identity. No command runs against it until
    /// the shell has completed the login flow and switched users.
    pub fn new(fs: Filesystem, config: VfshConfig) -> Self {
        Kernel {
            fs,
            identity: Identity::new(ROOT_USERNAME, vec![ROOT_USERNAME.to_string()]),
            config,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn config(&self) -> &VfshConfig {
        &self.config
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    // ── filesystem ────────────────────────────────────────────────

    pub fn entries(&self, parts: &[String]) -> Result<Vec<DirEntry>, FsError> {
        self.fs.entries(parts)
    }

    pub fn directory_exists(&self, parts: &[String]) -> bool {
        self.fs.directory_exists(parts)
    }

    pub fn read_file(&self, parts: &[String]) -> Result<FileView, FsError> {
        self.fs.read_file(parts, &self.identity)
    }

    pub fn write_file(&mut self, parts: &[String], text: &str) -> Result<(), FsError> {
        self.fs.write_file(parts, text, &self.identity)
    }

    pub fn create_file(
        &mut self,
        parent: &[String],
        name: &str,
        permissions: Permissions,
        content: &str,
    ) -> Result<(), FsError> {
        self.fs
            .create_file(parent, name, permissions, content, &self.identity)
    }

    pub fn create_directory(&mut self, parent: &[String], name: &str) -> Result<(), FsError> {
        self.fs.create_directory(parent, name)
    }

    pub fn remove_file(&mut self, parts: &[String]) -> Result<(), FsError> {
        self.fs.remove_file(parts, &self.identity)
    }

    pub fn remove_directory(&mut self, parts: &[String]) -> Result<(), FsError> {
        self.fs.remove_directory(parts)
    }

    pub fn change_permissions(
        &mut self,
        parts: &[String],
        mode: Permissions,
    ) -> Result<(), FsError> {
        self.fs.change_permissions(parts, mode, &self.identity)
    }

    // ── users ─────────────────────────────────────────────────────

    pub fn list_usernames(&self) -> Result<Vec<String>, VfshError> {
        registry::list_usernames(&self.fs)
    }

    pub fn create_user(&mut self, username: &str) -> Result<(), VfshError> {
        registry::create_user(&mut self.fs, username, &self.identity, &self.config)
    }

    /// Deletes an account by operator request. The login flow deletes
    /// exhausted accounts through its own path, without this gate.
    pub fn remove_user(&mut self, username: &str) -> Result<(), VfshError> {
        if !self.identity.is_root() {
            return Err(FsError::PermissionDenied(format!(
                "user '{}' is not root",
                self.identity.username()
            ))
            .into());
        }
        if username == ROOT_USERNAME {
            return Err(
                FsError::PermissionDenied("the root account cannot be removed".to_string()).into(),
            );
        }
        registry::remove_user(&mut self.fs, username)
    }

    pub fn password_is_set(&self, username: &str) -> Result<bool, VfshError> {
        registry::password_is_set(&self.fs, username)
    }

    pub fn validate_password(&self, raw: &str) -> Result<(), UserError> {
        registry::validate_password(raw, &self.config)
    }

    pub fn set_password(
        &mut self,
        username: &str,
        raw: &str,
        registration: Option<ConfirmationRecord>,
    ) -> Result<(), VfshError> {
        registry::set_password(
            &mut self.fs,
            username,
            raw,
            registration,
            &self.identity,
            &self.config,
            Self::today(),
        )
    }

    pub fn add_group(&mut self, username: &str, group: &str) -> Result<(), VfshError> {
        registry::add_group(&mut self.fs, username, group, &self.identity)
    }

    pub fn remove_group(&mut self, username: &str, group: &str) -> Result<(), VfshError> {
        registry::remove_group(&mut self.fs, username, group, &self.identity)
    }

    // ── identity confirmation ─────────────────────────────────────

    pub fn question_bank(&self) -> Result<QuestionBank, VfshError> {
        QuestionBank::load(&self.fs)
    }

    /// Questions to collect answers for during registration.
    pub fn registration_prompts(&self) -> Result<Vec<QuestionPrompt>, VfshError> {
        Ok(draw_question_prompts(&self.question_bank()?)?)
    }

    pub fn confirmation_registered(&self, username: &str) -> Result<bool, VfshError> {
        Ok(registry::load_record(&self.fs, username)?
            .confirmation
            .is_some())
    }

    /// Starts an identity challenge against the stored record.
    pub fn begin_confirmation(&self, username: &str) -> Result<Challenge, VfshError> {
        let record = registry::load_record(&self.fs, username)?;
        let confirmation = record
            .confirmation
            .ok_or_else(|| ConfirmError::NotRegistered(username.to_string()))?;
        let bank = self.question_bank()?;
        Ok(Challenge::begin(
            &confirmation,
            &bank,
            self.config.max_answer_attempts,
        )?)
    }

    // ── session ───────────────────────────────────────────────────

    /// Verifies a password and, on success, switches the session to
    /// that account. Returns the password's expiry date.
    pub fn login(&mut self, username: &str, password: &str) -> Result<NaiveDate, VfshError> {
        let expires =
            auth::verify_password(&self.fs, username, password, &self.config, Self::today())?;
        self.switch_user(username)?;
        Ok(expires)
    }

    /// Books one wrong-password failure, deleting the account when the
    /// attempts run out.
    pub fn note_login_failure(
        &mut self,
        tracker: &mut LoginTracker,
        username: &str,
    ) -> Result<(), VfshError> {
        auth::record_wrong_password(tracker, &mut self.fs, username)
    }

    /// Replaces the active identity with the account's current groups.
    pub fn switch_user(&mut self, username: &str) -> Result<(), VfshError> {
        let record = registry::load_record(&self.fs, username)?;
        self.identity = Identity::new(username, record.groups);
        info!("Session switched to '{}'", username);
        Ok(())
    }

    /// Ends the current session. The identity falls back to root until
    /// the next login succeeds.
    pub fn logout(&mut self) {
        info!("User '{}' logged out", self.identity.username());
        self.identity = Identity::new(ROOT_USERNAME, vec![ROOT_USERNAME.to_string()]);
    }
}
