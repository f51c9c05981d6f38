//! Error types and Result aliases for termprompt
//!
//! The prompt and history components never fail; these errors come from
//! the configuration layer, logging setup and the I/O underneath them.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for termprompt operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for termprompt
#[derive(Debug)]
pub enum Error {
    // === Configuration ===
    /// A configuration file could not be read
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// No configuration file in any search path
    ConfigNotFound,

    /// A setting holds a value the prompt cannot work with
    InvalidSetting { field: String, reason: String },

    /// A key binding names a code or key that does not exist
    UnknownKeyBinding { code: String, name: String },

    /// Configuration could not be written in the requested format
    ConfigEncodeFailed { format: String, reason: String },

    /// Configuration file contents are malformed
    ConfigParseFailed { format: String, reason: String },

    // === Logging ===
    /// A global tracing subscriber is already installed
    TracingInit(String),

    // === Wrapped ===
    Io(std::io::Error),
    Json(serde_json::Error),
    Toml(toml::de::Error),

    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Cannot read config '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => f.write_str("No configuration file found"),
            Error::InvalidSetting { field, reason } => {
                write!(f, "Invalid setting '{}': {}", field, reason)
            }
            Error::UnknownKeyBinding { code, name } => {
                write!(f, "Unknown key binding '{}' = '{}'", code, name)
            }
            Error::ConfigEncodeFailed { format, reason } => {
                write!(f, "Cannot write config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Malformed {} config: {}", format, reason)
            }
            Error::TracingInit(reason) => write!(f, "Cannot install log subscriber: {}", reason),
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Toml(err) => write!(f, "TOML error: {}", err),
            Error::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Toml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_owned())
    }
}
