//! Interactive shell loop
//!
//! The interactive shell: the login gate, the command loop with its
//! periodic identity checks, and the passwd dialogue. All terminal I/O
//! happens here; handlers only produce strings.

use std::io::{self, ErrorKind};
use std::time::Instant;

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout, stdin, stdout};

use crate::auth::LoginTracker;
use crate::confirm::{ChallengeKind, RegistrationChoice, Submission};
use crate::error::{AuthError, ConfirmError, VfshError};
use crate::kernel::Kernel;
use crate::shell::commands::{Command, parse_command};
use crate::shell::handlers::handle_command;
use crate::storage::path;
use crate::users::{ConfirmationRecord, SecretQuestion};

/// Why a session ended. Logout returns to the login gate, exit stops
/// the shell.
enum SessionEnd {
    Logout,
    Exit,
}

pub struct Shell {
    kernel: Kernel,
    workdir: Vec<String>,
    reader: BufReader<Stdin>,
    writer: Stdout,
}

impl Shell {
    pub fn new(kernel: Kernel) -> Self {
        Shell {
            kernel,
            workdir: Vec::new(),
            reader: BufReader::new(stdin()),
            writer: stdout(),
        }
    }

    /// Runs login sessions until the user exits. A closed stdin is a
    /// normal shutdown, not an error.
    pub async fn run(mut self) -> io::Result<()> {
        match self.drive().await {
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                info!("Input closed, shutting down");
                Ok(())
            }
            other => other,
        }
    }

    async fn drive(&mut self) -> io::Result<()> {
        loop {
            self.login().await?;
            match self.session().await? {
                SessionEnd::Exit => return Ok(()),
                SessionEnd::Logout => self.kernel.logout(),
            }
        }
    }

    async fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await?;
        if n == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    async fn prompt(&mut self, text: &str) -> io::Result<String> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        self.read_line().await
    }

    /// Asks for credentials until a login succeeds. Only wrong
    /// passwords count against the attempt limit; exhausting it
    /// deletes the account.
    async fn login(&mut self) -> io::Result<()> {
        let mut tracker = LoginTracker::new(self.kernel.config().max_login_attempts);
        loop {
            let username = self.prompt("Input your username: ").await?;
            let username = username.trim().to_string();
            if username.is_empty() {
                continue;
            }
            let password = self.prompt("Enter your password: ").await?;
            match self.kernel.login(&username, &password) {
                Ok(expires) => {
                    self.workdir.clear();
                    let notice =
                        format!("Your password will expire {}", expires.format("%Y-%m-%d"));
                    self.say(&notice).await?;
                    return Ok(());
                }
                Err(VfshError::Auth(AuthError::WrongPassword)) => {
                    self.say("authentication error: Wrong password").await?;
                    if let Err(err) = self.kernel.note_login_failure(&mut tracker, &username) {
                        self.say(&err.to_string()).await?;
                    }
                }
                Err(err) => {
                    let notice = format!("authentication error: {}", err);
                    self.say(&notice).await?;
                }
            }
        }
    }

    /// One logged-in session. Commands run until logout or exit; once
    /// the confirmation deadline passes, the next prompt is preceded by
    /// an identity check.
    async fn session(&mut self) -> io::Result<SessionEnd> {
        let mut deadline = Instant::now() + self.kernel.config().confirm_initial_delay();
        loop {
            if Instant::now() >= deadline {
                if !self.confirm_identity().await? {
                    self.say("Identity not confirmed. Logging out...").await?;
                    return Ok(SessionEnd::Logout);
                }
                deadline = Instant::now() + self.kernel.config().confirm_interval();
            }

            let banner = format!(
                "[{}] {}> ",
                self.kernel.identity().username(),
                path::join(&self.workdir)
            );
            let line = self.prompt(&banner).await?;
            let command = match parse_command(&line) {
                Some(command) => command,
                None => continue,
            };
            match command {
                Command::Exit => return Ok(SessionEnd::Exit),
                Command::Logout => return Ok(SessionEnd::Logout),
                Command::Passwd(args) => self.cmd_passwd(&args).await?,
                other => {
                    if let Some(output) =
                        handle_command(&mut self.kernel, &mut self.workdir, other)
                    {
                        self.say(&output).await?;
                    }
                }
            }
        }
    }

    /// Runs one identity challenge against the active user. Returns
    /// whether the session may continue.
    async fn confirm_identity(&mut self) -> io::Result<bool> {
        let username = self.kernel.identity().username().to_string();
        let mut challenge = match self.kernel.begin_confirmation(&username) {
            Ok(challenge) => challenge,
            Err(VfshError::Confirm(ConfirmError::NotRegistered(_))) => {
                warn!(
                    "User '{}' has no confirmation method, skipping the check",
                    username
                );
                return Ok(true);
            }
            Err(err) => {
                self.say(&err.to_string()).await?;
                return Ok(false);
            }
        };

        self.say("Please, confirm your identity").await?;
        if challenge.kind() == ChallengeKind::SecretFunction {
            self.say("Calculate the secret function using given parameters and write the answer (rounded to 2 characters after comma)")
                .await?;
        }
        let question = challenge.prompt().to_string();
        self.say(&question).await?;

        loop {
            let answer = self.prompt("Answer: ").await?;
            match challenge.submit(&answer) {
                Ok(Submission::Passed) => {
                    info!("User '{}' confirmed their identity", username);
                    return Ok(true);
                }
                Ok(Submission::Retry { .. }) => self.say("Wrong!").await?,
                Err(err) => {
                    self.say(&err.to_string()).await?;
                    return Ok(false);
                }
            }
        }
    }

    // Command handler for passwd. Interactive, so it runs on the shell
    // instead of going through the dispatch table.
    async fn cmd_passwd(&mut self, args: &[String]) -> io::Result<()> {
        if args.len() != 1 {
            return self.say("USAGE: passwd <username>").await;
        }
        let username = args[0].clone();
        if !self.kernel.identity().is_root() {
            return self.say("passwd: Access denied").await;
        }

        let password = loop {
            let first = self.prompt("Enter new password ").await?;
            let second = self.prompt("Retype password ").await?;
            if first == second {
                break first;
            }
            self.say("Passwords don't match").await?;
        };

        let already_set = match self.kernel.password_is_set(&username) {
            Ok(value) => value,
            Err(err) => return self.say(&format!("passwd: {}", err)).await,
        };
        if already_set {
            if let Err(err) = self.kernel.set_password(&username, &password, None) {
                return self.say(&format!("passwd: {}", err)).await;
            }
            return Ok(());
        }

        // first password for this account, so a confirmation method is
        // registered along with it
        if let Err(err) = self.kernel.validate_password(&password) {
            return self.say(&format!("passwd: {}", err)).await;
        }
        let registration = match self.registration_dialogue().await? {
            Some(record) => record,
            None => return Ok(()),
        };
        if let Err(err) = self
            .kernel
            .set_password(&username, &password, Some(registration))
        {
            return self.say(&format!("passwd: {}", err)).await;
        }
        Ok(())
    }

    /// Walks a first-time password holder through choosing their
    /// confirmation method. `None` means the question draw failed and
    /// the dialogue was abandoned.
    async fn registration_dialogue(&mut self) -> io::Result<Option<ConfirmationRecord>> {
        self.say("Please, select would you prefer to 1)answer questions or 2)use secret function to confirm your identity")
            .await?;
        let choice = loop {
            let line = self.read_line().await?;
            match RegistrationChoice::parse(&line) {
                Some(choice) => break choice,
                None => self.say("Wrong selection, type 1 or 2").await?,
            }
        };
        match choice {
            RegistrationChoice::Questions => {
                let prompts = match self.kernel.registration_prompts() {
                    Ok(prompts) => prompts,
                    Err(err) => {
                        self.say(&format!("passwd: {}", err)).await?;
                        return Ok(None);
                    }
                };
                let mut answers = Vec::with_capacity(prompts.len());
                for question in prompts {
                    let answer = self.prompt(&question.text).await?;
                    answers.push(SecretQuestion {
                        index: question.index,
                        answer: answer.trim().to_string(),
                    });
                }
                Ok(Some(ConfirmationRecord::Questions(answers)))
            }
            RegistrationChoice::SecretFunction => {
                self.say("Function is: exp(a*x)").await?;
                let parameter = loop {
                    let line = self.prompt("Input a: ").await?;
                    match line.trim().parse::<f64>() {
                        Ok(parameter) => break parameter,
                        Err(_) => self.say("Wrong parameter, input a number").await?,
                    }
                };
                Ok(Some(ConfirmationRecord::Function { parameter }))
            }
        }
    }
}
