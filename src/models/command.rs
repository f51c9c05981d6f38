//! Command Model
//!
//! One entered or system-generated line shown in the scrollback, together
//! with the processing status the external command processor reports.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Raw text shown for warning entries
pub const WARNING_LABEL: &str = "Warning:";

/// Processing status of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    /// Waiting for the processor
    #[default]
    InQueue,
    /// Currently being processed
    Processing,
    /// Processed successfully
    Finished,
    /// Processing produced an error
    Error,
}

impl CommandStatus {
    /// Still queued or being processed
    pub fn is_active(self) -> bool {
        matches!(self, CommandStatus::InQueue | CommandStatus::Processing)
    }
}

/// Kinds of error payload a command can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Non-fatal notice surfaced inline
    Warning,
    /// Informational result produced by a command
    CommandResult,
    /// Failure reported by the processor
    GitError,
}

/// Error payload attached to a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub msg: String,
}

impl CommandError {
    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Warning,
            msg: msg.into(),
        }
    }

    pub fn command_result(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::CommandResult,
            msg: msg.into(),
        }
    }

    pub fn git_error(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::GitError,
            msg: msg.into(),
        }
    }

    /// Status a command ends up in once it carries this payload
    pub fn resulting_status(&self) -> CommandStatus {
        match self.kind {
            ErrorKind::CommandResult => CommandStatus::Finished,
            ErrorKind::Warning | ErrorKind::GitError => CommandStatus::Error,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

/// A single line in the scrollback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Unique identifier
    pub id: String,

    /// Text as entered
    pub raw_str: String,

    /// Processing status
    pub status: CommandStatus,

    /// Error payload, if any
    pub error: Option<CommandError>,

    /// Result text shown under the command
    pub result: Option<String>,

    /// When the command was created (local time)
    pub created_at: DateTime<Local>,
}

impl Command {
    /// Create a queued command
    pub fn new(raw_str: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            raw_str: raw_str.into(),
            status: CommandStatus::InQueue,
            error: None,
            result: None,
            created_at: Local::now(),
        }
    }

    /// Create a command that already carries an error payload
    pub fn with_error(raw_str: impl Into<String>, error: CommandError) -> Self {
        let mut command = Self::new(raw_str);
        command.set_error(error);
        command
    }

    /// Create the inline warning entry for `msg`
    pub fn warning(msg: impl Into<String>) -> Self {
        Self::with_error(WARNING_LABEL, CommandError::warning(msg))
    }

    /// Attach an error payload and move to the status it implies
    pub fn set_error(&mut self, error: CommandError) {
        self.status = error.resulting_status();
        self.result = Some(error.msg.clone());
        self.error = Some(error);
    }

    pub fn mark_processing(&mut self) {
        self.status = CommandStatus::Processing;
    }

    pub fn mark_finished(&mut self) {
        self.status = CommandStatus::Finished;
    }

    /// Still queued or being processed
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Identifier of the element the view for this command is mounted in
    pub fn element_id(&self) -> String {
        format!("command_{}", self.id)
    }
}
