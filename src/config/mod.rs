//! Configuration management for termprompt
//!
//! Pixel metrics for the simulated cursor, history limits, autoscroll
//! behaviour and key-code overrides all live here so that the geometry and
//! dispatch code never hard-codes a font or keyboard layout.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure for termprompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt and cursor configuration
    pub prompt: PromptConfig,

    /// Command history configuration
    pub history: HistoryConfig,

    /// History display configuration
    pub display: DisplayConfig,

    /// Key code overrides
    pub key_bindings: KeyBindings,
}

/// Prompt-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Width of one monospace character at zoom 1.0, in pixels
    pub char_width_px: f32,

    /// Height of one text row at zoom 1.0, in pixels
    pub row_height_px: f32,

    /// Whether the cursor is shown right after construction
    pub cursor_visible_on_start: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            char_width_px: 10.0,
            row_height_px: 22.0,
            cursor_visible_on_start: true,
        }
    }
}

/// Command history configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of entered commands kept for up/down recall
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

/// History display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Snap the scrollback to the bottom when content overflows
    pub autoscroll: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { autoscroll: true }
    }
}

/// Extra raw key code to key name mappings, layered over the built-in table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Raw key code (as decimal string, TOML keys must be strings) to key name
    pub codes: HashMap<String, String>,
}

impl KeyBindings {
    /// Iterate over overrides whose code parses as a number
    pub fn parsed_codes(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.codes.iter().filter_map(|(code, name)| {
            match code.trim().parse::<u32>() {
                Ok(code) => Some((code, name.as_str())),
                Err(_) => {
                    warn!("Ignoring key binding with non-numeric code '{}'", code);
                    None
                }
            }
        })
    }
}
