//! Core data models for termprompt
//!
//! Commands shown in the scrollback and the ordered collection that holds
//! them.

pub mod collection;
pub mod command;

pub use collection::{CollectionEvent, CommandCollection};
pub use command::{Command, CommandError, CommandStatus, ErrorKind, WARNING_LABEL};
