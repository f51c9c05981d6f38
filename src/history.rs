//! Entered-command history
//!
//! The prompt recalls past lines through the [`CommandLine`] trait.
//! Entries are ordered newest first: index 0 is the most recently entered
//! line, which is what a single press of Up recalls.

use std::collections::VecDeque;

use crate::config::HistoryConfig;
use crate::events::{EventBus, Subscriber};

/// History store and submission channel used by the prompt
pub trait CommandLine {
    /// Number of recorded entries
    fn history_len(&self) -> usize;

    /// Entry at `index`, newest first
    fn history_entry(&self, index: usize) -> Option<&str>;

    /// Record a line and hand it on to whoever processes commands
    fn submit_command(&mut self, value: &str);
}

/// In-memory command history
pub struct CommandLineStore {
    /// Entries, newest at the front
    history: VecDeque<String>,
    /// Maximum history size
    max_entries: usize,
    /// Every submitted line, for the command processor
    submissions: EventBus<String>,
}

impl CommandLineStore {
    /// Create an empty store holding at most `max_entries` lines
    pub fn new(max_entries: usize) -> Self {
        Self {
            history: VecDeque::new(),
            max_entries: max_entries.max(1),
            submissions: EventBus::new(),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.max_entries)
    }

    /// Seed the store from oldest-to-newest lines
    pub fn with_entries<I, S>(max_entries: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new(max_entries);
        for entry in entries {
            store.push(entry.into());
        }
        store
    }

    /// Listen for submitted lines
    pub fn subscribe_submissions(&self) -> Subscriber<String> {
        self.submissions.subscribe()
    }

    /// Iterate newest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Forget every entry
    pub fn clear(&mut self) {
        self.history.clear();
    }

    fn push(&mut self, value: String) {
        self.history.push_front(value);
        self.history.truncate(self.max_entries);
    }
}

impl Default for CommandLineStore {
    fn default() -> Self {
        Self::from_config(&HistoryConfig::default())
    }
}

impl CommandLine for CommandLineStore {
    fn history_len(&self) -> usize {
        self.history.len()
    }

    fn history_entry(&self, index: usize) -> Option<&str> {
        self.history.get(index).map(String::as_str)
    }

    fn submit_command(&mut self, value: &str) {
        self.push(value.to_string());
        self.submissions.publish(value.to_string());
    }
}
