//! termprompt - a headless terminal-style command prompt
//!
//! This library provides the command prompt and scrollback of a
//! terminal-like interface without tying them to a rendering toolkit.
//!
//! ## Features
//!
//! - **Simulated cursor:** Paragraph markup and cursor block geometry computed
//!   from the selection and monospace metrics
//! - **History recall:** Up/Down navigation through entered commands
//! - **Rollup:** Replay the last N commands as one `;`-joined command
//! - **Scrollback:** Mounted views per command, autoscroll and pruning of
//!   finished commands
//! - **Configuration:** TOML/JSON files for metrics, history size and key codes
//!
//! ## Module Organization
//!
//! - [`ui`] - Prompt controller, history display, cursor and scroll logic
//! - [`events`] - Typed signal hub and exclusive key batons
//! - [`history`] - Entered-command history store
//! - [`models`] - Commands and the command collection
//! - [`keyboard`] - Key code mapping
//! - [`terminal`] - Both components wired to one hub
//! - [`config`] - Configuration loading
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use termprompt::history::CommandLineStore;
//! use termprompt::models::Command;
//! use termprompt::terminal::CommandTerminal;
//! use termprompt::ui::{FixedLayout, ViewFactory, VirtualViewport};
//!
//! struct Plain;
//!
//! impl ViewFactory for Plain {
//!     type View = String;
//!     fn render(&mut self, command: &Command) -> String {
//!         command.raw_str.clone()
//!     }
//! }
//!
//! let config = termprompt::init();
//! let mut term = CommandTerminal::new(
//!     &config,
//!     CommandLineStore::from_config(&config.history),
//!     FixedLayout::new(800.0),
//!     Plain,
//!     VirtualViewport::new(400.0, 800.0),
//! );
//! term.type_text("git status");
//! term.key_up(13);
//! ```
//!
//! ## Architecture
//!
//! Everything runs on the caller's thread. Components publish signals to
//! a shared hub and handle what they received when pumped, so a submission
//! always finishes updating local state before anything reacts to it.

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod keyboard;
pub mod models;
pub mod terminal;
pub mod ui;

pub use config::Config;
pub use error::{Error, Result};
pub use events::{EventHub, KeyBatons, Signal};
pub use history::{CommandLine, CommandLineStore};
pub use terminal::CommandTerminal;

use config::loader::ConfigLoader;
use std::path::Path;

/// The current version of termprompt from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install a compact `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` when `debug`
/// is true or `TERMPROMPT_DEBUG` is `1`/`true`, and `info` otherwise.
pub fn init_tracing(debug: bool) -> Result<()> {
    let debug_env = std::env::var("TERMPROMPT_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let level = if debug || debug_env { "debug" } else { "info" };

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init()
        .map_err(|e| Error::TracingInit(e.to_string()))
}

/// Load configuration from the default locations, falling back to defaults
pub fn init() -> Config {
    info!("Initializing {} v{}", NAME, VERSION);
    match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    }
}

/// Load configuration from a specific file
pub fn init_with_config(config_path: &Path) -> Result<Config> {
    info!(
        "Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );
    ConfigLoader::load_from_path(config_path).map_err(|e| {
        error!("Failed to load configuration from {}: {}", config_path.display(), e);
        e
    })
}

/// Turn a configuration error into a message for the user
pub fn handle_config_error(error: &Error) -> String {
    match error {
        Error::ConfigLoadFailed { path, reason } => format!(
            "Could not read '{}': {}\n\nCheck the path, or remove the file to use defaults.",
            path.display(),
            reason
        ),
        Error::ConfigParseFailed { format, reason } => format!(
            "The {} configuration is malformed: {}\n\nFix the syntax or remove the file to use defaults.",
            format, reason
        ),
        Error::InvalidSetting { field, reason } => format!(
            "Setting '{}' is invalid: {}\n\nCorrect the value or delete it to use the default.",
            field, reason
        ),
        Error::UnknownKeyBinding { code, name } => format!(
            "Key binding '{}' = '{}' is not recognised\n\nCodes are decimal numbers; keys are enter, up, down, left, right or esc.",
            code, name
        ),
        Error::ConfigNotFound => {
            "No configuration file was found\n\nCreate one or run with the built-in defaults.".to_string()
        }
        Error::Io(err) => format!(
            "I/O error: {}\n\nCheck permissions on the configuration directory.",
            err
        ),
        _ => format!("Unexpected error: {}", error),
    }
}
