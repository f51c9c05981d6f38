//! Ordered command collection with mutation events

use crate::events::{EventBus, Subscriber};
use crate::models::{Command, CommandStatus};

/// Mutation notifications published by [`CommandCollection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionEvent {
    /// A command was appended
    Added { id: String },
    /// A command's fields changed
    Changed { id: String },
    /// A command was destroyed
    Removed { id: String },
    /// The whole collection was replaced
    Reset,
}

/// Ordered sequence of commands, appended at the end
#[derive(Default)]
pub struct CommandCollection {
    commands: Vec<Command>,
    events: EventBus<CollectionEvent>,
}

impl CommandCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for mutations
    pub fn subscribe(&self) -> Subscriber<CollectionEvent> {
        self.events.subscribe()
    }

    /// Append a command and return its id
    pub fn add(&mut self, command: Command) -> String {
        let id = command.id.clone();
        self.commands.push(command);
        self.events.publish(CollectionEvent::Added { id: id.clone() });
        id
    }

    /// Apply `f` to the command with `id`; returns false if it is gone
    pub fn update<F>(&mut self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut Command),
    {
        match self.commands.iter_mut().find(|c| c.id == id) {
            Some(command) => {
                f(command);
                self.events.publish(CollectionEvent::Changed { id: id.to_string() });
                true
            }
            None => false,
        }
    }

    /// Set the processing status of the command with `id`
    pub fn set_status(&mut self, id: &str, status: CommandStatus) -> bool {
        self.update(id, |command| command.status = status)
    }

    /// Remove the command with `id` for good
    pub fn destroy(&mut self, id: &str) -> Option<Command> {
        let position = self.commands.iter().position(|c| c.id == id)?;
        let command = self.commands.remove(position);
        self.events.publish(CollectionEvent::Removed { id: id.to_string() });
        Some(command)
    }

    /// Replace every command at once
    pub fn reset(&mut self, commands: Vec<Command>) {
        self.commands = commands;
        self.events.publish(CollectionEvent::Reset);
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a CommandCollection {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
