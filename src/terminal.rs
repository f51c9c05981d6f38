//! Terminal composition
//!
//! Wires a [`PromptController`] and a [`HistoryDisplay`] to one hub and
//! turns raw submissions into queued commands in the scrollback. Hosts feed
//! key events in and call [`CommandTerminal::pump`] until it settles.

use crate::config::Config;
use crate::events::{EventHub, KeyBatons, Signal, Subscriber};
use crate::history::CommandLine;
use crate::keyboard::KeyMap;
use crate::models::{Command, CommandCollection};
use crate::ui::{
    HistoryDisplay, KeyEvent, KeyOutcome, PromptController, ScrollSurface, TextLayout, ViewFactory,
};

/// Prompt plus scrollback sharing one hub
pub struct CommandTerminal<L, T, F, S>
where
    L: CommandLine,
    T: TextLayout,
    F: ViewFactory,
    S: ScrollSurface,
{
    hub: EventHub,
    prompt: PromptController<L, T>,
    display: HistoryDisplay<F, S>,
    signals: Subscriber<Signal>,
}

impl<L, T, F, S> CommandTerminal<L, T, F, S>
where
    L: CommandLine,
    T: TextLayout,
    F: ViewFactory,
    S: ScrollSurface,
{
    pub fn new(config: &Config, command_line: L, layout: T, factory: F, surface: S) -> Self {
        let (hub, batons) = EventHub::new();
        let key_map = KeyMap::with_bindings(&config.key_bindings);

        let prompt = PromptController::new(batons, command_line, layout, key_map, &config.prompt);
        let display = HistoryDisplay::new(
            &hub,
            CommandCollection::new(),
            factory,
            surface,
            &config.display,
        );
        let signals = hub.subscribe_where(|s| matches!(s, Signal::CommandSubmitted(_)));

        info!("Command terminal ready");
        Self {
            hub,
            prompt,
            display,
            signals,
        }
    }

    /// Tear down both components, returning the keyboard claim
    pub fn dispose(self) -> KeyBatons {
        let (batons, _command_line) = self.prompt.dispose();
        self.display.dispose();
        batons
    }

    /// Deliver pending signals and collection events until nothing is left.
    /// Returns the number handled.
    pub fn pump(&mut self) -> usize {
        let mut total = 0;
        loop {
            let handled = self.prompt.pump() + self.handle_signals() + self.display.pump();
            if handled == 0 {
                break;
            }
            total += handled;
        }
        total
    }

    fn handle_signals(&mut self) -> usize {
        let mut handled = 0;
        while let Some(signal) = self.signals.try_next() {
            if let Signal::CommandSubmitted(value) = signal {
                self.enqueue_commands(&value);
                handled += 1;
            }
        }
        handled
    }

    /// Queue one command per `;`-separated part of `value`.
    /// Returns the ids of the queued commands.
    pub fn enqueue_commands(&mut self, value: &str) -> Vec<String> {
        let mut ids = Vec::new();
        for (index, part) in value.split(';').enumerate() {
            let part = part.trim();
            if index > 0 && part.is_empty() {
                continue;
            }
            ids.push(self.display.collection_mut().add(Command::new(part)));
        }
        debug!("Queued {} commands", ids.len());
        ids
    }

    /// Key pressed in the host
    pub fn key_down(&mut self, key_code: u32) {
        self.prompt.on_key_down(&KeyEvent::new(key_code));
        self.pump();
    }

    /// Key released in the host
    pub fn key_up(&mut self, key_code: u32) -> KeyOutcome {
        let outcome = self.prompt.on_key_up(&KeyEvent::new(key_code));
        self.pump();
        outcome
    }

    /// Type text into the field as the host would
    pub fn type_text(&mut self, text: &str) {
        self.prompt.field_mut().insert_str(text);
        self.prompt.update_prompt();
        self.pump();
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn prompt(&self) -> &PromptController<L, T> {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut PromptController<L, T> {
        &mut self.prompt
    }

    pub fn display(&self) -> &HistoryDisplay<F, S> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut HistoryDisplay<F, S> {
        &mut self.display
    }
}
