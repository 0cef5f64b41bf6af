//! User records
//!
//! The text format of an account file under /admin/users. Line one
//! holds the username, the tagged password, and the group list; an
//! optional section below it holds the identity confirmation material.
//!
//! ```text
//! andrew secret(2026-08-21) andrew,staff
//! q:
//!  1: blue
//!  4: helsinki
//! ```

use chrono::NaiveDate;

use crate::error::UserError;

/// A stored answer to one question from the control question bank.
/// Indices are 1-based, matching the numbering shown at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretQuestion {
    pub index: usize,
    pub answer: String,
}

/// How a user proves their identity when challenged.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationRecord {
    Questions(Vec<SecretQuestion>),
    Function { parameter: f64 },
}

/// A password together with the date it was set. Records written by
/// hand may lack the date tag; verification treats that as damage.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedPassword {
    pub secret: String,
    pub created: Option<NaiveDate>,
}

impl TaggedPassword {
    pub fn new(secret: impl Into<String>, created: NaiveDate) -> Self {
        TaggedPassword {
            secret: secret.into(),
            created: Some(created),
        }
    }

    fn parse(raw: &str) -> Result<Self, UserError> {
        let Some(open) = raw.find('(') else {
            return Ok(TaggedPassword {
                secret: raw.to_string(),
                created: None,
            });
        };
        if !raw.ends_with(')') {
            return Err(UserError::Malformed(format!(
                "unterminated password tag: {}",
                raw
            )));
        }
        let date_text = &raw[open + 1..raw.len() - 1];
        let created = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
            .map_err(|_| UserError::Malformed(format!("bad password date: {}", date_text)))?;
        Ok(TaggedPassword {
            secret: raw[..open].to_string(),
            created: Some(created),
        })
    }

    fn serialize(&self) -> String {
        match self.created {
            Some(date) => format!("{}({})", self.secret, date.format("%Y-%m-%d")),
            None => self.secret.clone(),
        }
    }
}

/// One parsed account file.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub username: String,
    pub password: TaggedPassword,
    pub groups: Vec<String>,
    pub confirmation: Option<ConfirmationRecord>,
}

impl UserRecord {
    pub fn parse(content: &str) -> Result<Self, UserError> {
        let mut lines = content.lines();
        let header = lines
            .next()
            .filter(|line| !line.trim().is_empty())
            .ok_or_else(|| UserError::Malformed("record is empty".to_string()))?;

        let mut fields = header.split_whitespace();
        let username = fields
            .next()
            .ok_or_else(|| UserError::Malformed(format!("bad header: {}", header)))?;
        let password = fields
            .next()
            .ok_or_else(|| UserError::Malformed(format!("bad header: {}", header)))?;
        let groups_field = fields
            .next()
            .ok_or_else(|| UserError::Malformed(format!("bad header: {}", header)))?;
        if fields.next().is_some() {
            return Err(UserError::Malformed(format!(
                "too many header fields: {}",
                header
            )));
        }

        let groups: Vec<String> = groups_field
            .split(',')
            .filter(|group| !group.is_empty())
            .map(str::to_string)
            .collect();
        if groups.is_empty() {
            return Err(UserError::Malformed(format!("no groups: {}", header)));
        }

        let password = TaggedPassword::parse(password)?;

        let mut confirmation = None;
        while let Some(line) = lines.next() {
            match line.trim() {
                "" => continue,
                "q:" => {
                    let mut questions = Vec::new();
                    for entry in lines.by_ref() {
                        if entry.trim().is_empty() {
                            continue;
                        }
                        let (index, answer) = entry.split_once(':').ok_or_else(|| {
                            UserError::Malformed(format!("bad question line: {}", entry))
                        })?;
                        let index = index.trim().parse::<usize>().map_err(|_| {
                            UserError::Malformed(format!("bad question index: {}", entry))
                        })?;
                        questions.push(SecretQuestion {
                            index,
                            answer: answer.trim().to_string(),
                        });
                    }
                    if questions.is_empty() {
                        return Err(UserError::Malformed(
                            "question section is empty".to_string(),
                        ));
                    }
                    confirmation = Some(ConfirmationRecord::Questions(questions));
                }
                "f:" => {
                    let raw = lines
                        .next()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .ok_or_else(|| {
                            UserError::Malformed("missing function parameter".to_string())
                        })?;
                    let parameter = raw.parse::<f64>().map_err(|_| {
                        UserError::Malformed(format!("bad function parameter: {}", raw))
                    })?;
                    confirmation = Some(ConfirmationRecord::Function { parameter });
                }
                other => {
                    return Err(UserError::Malformed(format!("unexpected line: {}", other)));
                }
            }
        }

        Ok(UserRecord {
            username: username.to_string(),
            password,
            groups,
            confirmation,
        })
    }

    pub fn serialize(&self) -> String {
        let mut out = format!(
            "{} {} {}",
            self.username,
            self.password.serialize(),
            self.groups.join(",")
        );
        match &self.confirmation {
            None => {}
            Some(ConfirmationRecord::Questions(questions)) => {
                out.push_str("\nq:");
                for question in questions {
                    out.push_str(&format!("\n {}: {}", question.index, question.answer));
                }
            }
            Some(ConfirmationRecord::Function { parameter }) => {
                out.push_str(&format!("\nf:\n{}", parameter));
            }
        }
        out
    }
}
