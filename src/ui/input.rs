//! Input prompt component
//!
//! Owns the single-line text field, mirrors it into paragraph markup with
//! a simulated cursor block, and turns Enter/Up/Down into submissions and
//! history recall.

use crate::config::PromptConfig;
use crate::events::{EventHub, KeyBatons, Signal, Subscriber};
use crate::history::CommandLine;
use crate::keyboard::{Key, KeyMap};
use crate::ui::cursor::{cursor_geometry, html_mirror, CharMetrics, CursorRect, Selection, TextLayout};

/// Editable text field state, as the host reports it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    /// Current text
    value: String,
    /// Selection in characters, if the host reported one
    selection: Option<Selection>,
    /// Whether the field has focus
    focused: bool,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text and put the caret after it
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.selection = Some(Selection::caret(self.char_len()));
    }

    pub fn clear(&mut self) {
        self.set_value(String::new());
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Record the host's selection, clamped to the text
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        let len = self.char_len();
        self.selection = selection.map(|s| {
            let start = s.start.min(len);
            let end = s.end.min(len).max(start);
            Selection::new(start, end)
        });
    }

    /// Type text over the selection (or at the end) and leave the caret after it
    pub fn insert_str(&mut self, text: &str) {
        let len = self.char_len();
        let selection = self.selection.unwrap_or(Selection::caret(len));
        let start = self.byte_offset(selection.start);
        let end = self.byte_offset(selection.end);

        self.value.replace_range(start..end, text);
        let caret = selection.start + text.chars().count();
        self.selection = Some(Selection::caret(caret));
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// Logical actions the prompt reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Enter
    Submit,
    /// Up: one step further into the past
    HistoryBack,
    /// Down: one step back towards the present
    HistoryForward,
}

impl PromptAction {
    pub fn for_key(key: Key) -> Option<Self> {
        match key {
            Key::Enter => Some(PromptAction::Submit),
            Key::Up => Some(PromptAction::HistoryBack),
            Key::Down => Some(PromptAction::HistoryForward),
            _ => None,
        }
    }
}

/// A raw key event from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_code: u32,
}

impl KeyEvent {
    pub fn new(key_code: u32) -> Self {
        Self { key_code }
    }
}

/// What the prompt did with a key-up event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// Action performed, if the key was one of ours
    pub action: Option<PromptAction>,
    /// Host should suppress its default behaviour for this key
    pub default_prevented: bool,
}

/// Rendered prompt state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptRender {
    /// Mirrored paragraph markup
    pub html: String,
    /// Cursor block geometry
    pub cursor: CursorRect,
    /// Whether the cursor block is shown
    pub cursor_shown: bool,
}

/// The command prompt
pub struct PromptController<L: CommandLine, T: TextLayout> {
    /// Text field
    field: TextField,
    /// History position being shown (None = not browsing history)
    index: Option<usize>,
    /// History store and submission channel
    command_line: L,
    /// Paragraph measurement
    layout: T,
    /// Key code table
    key_map: KeyMap,
    /// Character metrics at zoom 1.0
    metrics: CharMetrics,
    /// Signals the prompt handles, from the batons' hub
    signals: Subscriber<Signal>,
    /// Exclusive keyboard claim, and the hub it belongs to
    batons: KeyBatons,
    /// Last render
    render: PromptRender,
}

impl<L: CommandLine, T: TextLayout> PromptController<L, T> {
    /// Create the prompt on the hub `batons` were minted with, claim the
    /// keyboard and focus the field
    pub fn new(
        batons: KeyBatons,
        command_line: L,
        layout: T,
        key_map: KeyMap,
        config: &PromptConfig,
    ) -> Self {
        debug!(
            "Prompt claimed {} and {}",
            batons.key_down.category(),
            batons.key_up.category()
        );

        let mut prompt = Self {
            field: TextField::default(),
            index: None,
            command_line,
            layout,
            key_map,
            metrics: CharMetrics::from(config),
            signals: batons.hub().subscribe_where(Self::handles),
            batons,
            render: PromptRender::default(),
        };
        if config.cursor_visible_on_start {
            prompt.focus();
        }
        prompt.render_field();
        prompt
    }

    /// Drop the subscription and hand the keyboard claim back
    pub fn dispose(self) -> (KeyBatons, L) {
        debug!("Prompt released {}", self.batons.key_up.category());
        (self.batons, self.command_line)
    }

    fn handles(signal: &Signal) -> bool {
        matches!(
            signal,
            Signal::CommandSubmittedPassive(_) | Signal::RollupCommands(_)
        )
    }

    /// The hub this prompt publishes on
    pub fn hub(&self) -> &EventHub {
        self.batons.hub()
    }

    /// Handle pending passive submissions and rollups; returns how many
    /// were handled. Only those signals are queued for the prompt, so
    /// keystrokes alone never leave work behind.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(signal) = self.signals.try_next() {
            match signal {
                Signal::CommandSubmittedPassive(value) => {
                    self.add_to_command_history(&value);
                    handled += 1;
                }
                Signal::RollupCommands(count) => {
                    self.rollup_commands(count);
                    handled += 1;
                }
                _ => {}
            }
        }
        handled
    }

    pub fn focus(&mut self) {
        self.field.focused = true;
        self.show_cursor();
    }

    pub fn blur(&mut self) {
        self.field.focused = false;
        self.hide_cursor();
    }

    pub fn show_cursor(&mut self) {
        self.toggle_cursor(true);
    }

    pub fn hide_cursor(&mut self) {
        self.toggle_cursor(false);
    }

    fn toggle_cursor(&mut self, shown: bool) {
        self.render.cursor_shown = shown;
    }

    /// Key pressed: refresh the mirror
    pub fn on_key_down(&mut self, _event: &KeyEvent) {
        self.update_prompt();
    }

    /// Key released: refresh, then run the mapped action if there is one
    pub fn on_key_up(&mut self, event: &KeyEvent) -> KeyOutcome {
        self.on_key_down(event);

        let action = self
            .key_map
            .map_keycode(event.key_code)
            .and_then(PromptAction::for_key);

        let Some(action) = action else {
            return KeyOutcome::default();
        };

        match action {
            PromptAction::Submit => self.submit(),
            PromptAction::HistoryBack => self.command_select_change(1),
            PromptAction::HistoryForward => self.command_select_change(-1),
        }
        self.on_key_down(event);

        KeyOutcome {
            action: Some(action),
            default_prevented: true,
        }
    }

    /// Re-render the mirror and cursor, then ask the scrollback to follow.
    /// The `ScrollDown` signal is queued for the display, not the prompt.
    pub fn update_prompt(&mut self) {
        self.render_field();
        self.batons.hub().scroll_down();
    }

    fn render_field(&mut self) {
        self.render.html = html_mirror(self.field.value());
        let len = self.field.char_len();
        self.cursor_update(len, self.field.selection());
    }

    /// Recompute the cursor block for text of `len` characters
    pub fn cursor_update(&mut self, len: usize, selection: Option<Selection>) {
        self.render.cursor = cursor_geometry(
            len,
            selection,
            self.layout.paragraph_width(),
            self.metrics,
            self.layout.zoom(),
        );
    }

    /// Move through history by `delta` (positive = older)
    pub fn command_select_change(&mut self, delta: isize) {
        // Overflow lands outside the history like any other far jump
        let entry = self
            .navigation_index()
            .checked_add(delta)
            .and_then(|target| usize::try_from(target).ok())
            .filter(|&i| i < self.command_line.history_len())
            .and_then(|i| Some((i, self.command_line.history_entry(i)?.to_string())));

        match entry {
            Some((index, value)) => {
                self.index = Some(index);
                self.field.set_value(value);
            }
            None => {
                // Past either end: show a blank line
                self.field.clear();
                self.index = None;
            }
        }
    }

    /// Submit the field contents
    pub fn submit(&mut self) {
        let value: String = self.field.value().chars().filter(|&c| c != '\n').collect();
        self.field.clear();

        info!("Command submitted: {}", value);
        self.batons.hub().publish(Signal::CommandSubmitted(value.clone()));
        // Recorded against the index being edited, before it is reset
        self.add_to_command_history(&value);
        self.index = None;
    }

    /// Replay the `count` entries before the newest one as a single command
    pub fn rollup_commands(&mut self, count: usize) {
        let len = self.command_line.history_len();
        let end = count.saturating_add(1).min(len);

        let combined: String = (1..end)
            .rev()
            .filter_map(|i| self.command_line.history_entry(i))
            .map(|entry| format!("{};", entry))
            .collect();

        if combined.is_empty() {
            debug!("Nothing to roll up for {} commands", count);
            return;
        }

        info!("Rolling up {} commands: {}", end.saturating_sub(1), combined);
        self.command_line.submit_command(&combined);
    }

    /// Record `value` unless it is blank or an unedited history recall.
    /// Returns whether it was recorded.
    pub fn add_to_command_history(&mut self, value: &str) -> bool {
        let should_add = !value.is_empty()
            && match self.index {
                None => true,
                Some(index) => self.command_line.history_entry(index) != Some(value),
            };

        if !should_add {
            return false;
        }

        self.command_line.submit_command(value);
        info!(target: "termprompt::command_entered", command = %value, "command entered");
        true
    }

    /// Signals waiting for the next [`pump`](Self::pump)
    pub fn pending_signals(&self) -> usize {
        self.signals.pending()
    }

    /// Navigation index, -1 when not browsing history
    pub fn navigation_index(&self) -> isize {
        self.index.map_or(-1, |i| i as isize)
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    /// Let the host update text and selection before the next key event
    pub fn field_mut(&mut self) -> &mut TextField {
        &mut self.field
    }

    pub fn render(&self) -> &PromptRender {
        &self.render
    }

    pub fn command_line(&self) -> &L {
        &self.command_line
    }

    pub fn command_line_mut(&mut self) -> &mut L {
        &mut self.command_line
    }

    pub fn layout_mut(&mut self) -> &mut T {
        &mut self.layout
    }
}
