//! Raw key code to logical key mapping

use std::collections::HashMap;
use std::fmt;

use crate::config::KeyBindings;

/// Logical keys the prompt knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Up,
    Down,
    Left,
    Right,
    Escape,
}

impl Key {
    /// Parse a key name as used in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "enter" | "return" => Some(Key::Enter),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "esc" | "escape" => Some(Key::Escape),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Key::Enter => "enter",
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::Escape => "esc",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyboard mapping table
#[derive(Debug, Clone)]
pub struct KeyMap {
    codes: HashMap<u32, Key>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let codes = HashMap::from([
            (13, Key::Enter),
            (27, Key::Escape),
            (37, Key::Left),
            (38, Key::Up),
            (39, Key::Right),
            (40, Key::Down),
        ]);
        Self { codes }
    }
}

impl KeyMap {
    /// Built-in table with configured overrides layered on top
    pub fn with_bindings(bindings: &KeyBindings) -> Self {
        let mut map = Self::default();
        for (code, name) in bindings.parsed_codes() {
            match Key::from_name(name) {
                Some(key) => {
                    debug!("Binding key code {} to {}", code, key);
                    map.bind(code, key);
                }
                None => warn!("Unknown key name '{}' for code {}", name, code),
            }
        }
        map
    }

    /// Map (or remap) a raw code
    pub fn bind(&mut self, code: u32, key: Key) {
        self.codes.insert(code, key);
    }

    /// Resolve a raw platform key code
    pub fn map_keycode(&self, code: u32) -> Option<Key> {
        self.codes.get(&code).copied()
    }
}
