//! Configuration file discovery, loading and saving
//!
//! A config file is looked up under a handful of base paths, trying each
//! supported extension in turn. The first file that parses wins.

use super::Config;
use crate::error::{Error, Result};
use crate::keyboard::Key;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory and file stem used under the platform config dir
const APP_DIR: &str = "termprompt";
const FILE_STEM: &str = "config";

/// Largest history the prompt will keep
pub const MAX_HISTORY_ENTRIES: usize = 10_000;

/// On-disk formats, tried in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    const ALL: [ConfigFormat; 2] = [ConfigFormat::Toml, ConfigFormat::Json];

    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    fn label(self) -> String {
        self.extension().to_ascii_uppercase()
    }

    fn decode(self, text: &str) -> Result<Config> {
        let parsed = match self {
            ConfigFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| Error::ConfigParseFailed {
            format: self.label(),
            reason,
        })
    }

    fn encode(self, config: &Config) -> Result<String> {
        let encoded = match self {
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        };
        encoded.map_err(|reason| Error::ConfigEncodeFailed {
            format: self.label(),
            reason,
        })
    }
}

/// How [`ConfigLoader::load_with`] treats a missing or odd file
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Return the built-in defaults when no file exists
    pub create_default: bool,
    /// Reject files whose values fail [`validate_config`]
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

/// Finds, reads and writes the configuration file
pub struct ConfigLoader {
    /// Base paths without extension, highest priority first
    search_paths: Vec<PathBuf>,
    /// File the last successful load came from
    current_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            search_paths: Self::candidates(),
            current_path: None,
        }
    }

    /// Load from the standard locations, or defaults if there is no file
    pub fn load() -> Result<Config> {
        Self::new().load_with(LoadOptions::default())
    }

    pub fn load_with(&mut self, options: LoadOptions) -> Result<Config> {
        let Some((path, config)) = self.locate() else {
            if !options.create_default {
                return Err(Error::ConfigNotFound);
            }
            debug!("No config file in {} locations, using defaults", self.search_paths.len());
            return Ok(Config::default());
        };

        if options.validate {
            validate_config(&config)?;
        }
        info!("Loaded configuration from {}", path.display());
        self.current_path = Some(path);
        Ok(config)
    }

    /// Read and validate one file. Unknown extensions are read as TOML.
    pub fn load_from_path(path: &Path) -> Result<Config> {
        if !path.is_file() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            });
        }

        let format = ConfigFormat::from_path(path).unwrap_or(ConfigFormat::Toml);
        let config = format.decode(&fs::read_to_string(path)?)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Write to the file last loaded from, or the default location.
    /// Returns the path written.
    pub fn save(&self, config: &Config) -> Result<PathBuf> {
        let path = match &self.current_path {
            Some(path) => path.clone(),
            None => Self::default_path(),
        };
        self.save_to_path(config, &path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        let format = ConfigFormat::from_path(path).unwrap_or(ConfigFormat::Toml);
        let text = format.encode(config)?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, text)?;
        debug!("Wrote {} configuration to {}", format.label(), path.display());
        Ok(())
    }

    fn locate(&self) -> Option<(PathBuf, Config)> {
        let files = self.search_paths.iter().flat_map(|base| {
            ConfigFormat::ALL
                .into_iter()
                .map(move |format| (base.with_extension(format.extension()), format))
        });

        for (path, format) in files.filter(|(path, _)| path.is_file()) {
            let loaded = fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|text| format.decode(&text));
            match loaded {
                Ok(config) => return Some((path, config)),
                // A broken file must not hide one further down the list
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }
        None
    }

    fn candidates() -> Vec<PathBuf> {
        let platform = dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_STEM));
        let xdg = env::var_os("XDG_CONFIG_HOME")
            .map(|dir| PathBuf::from(dir).join(APP_DIR).join(FILE_STEM));
        let home = dirs::home_dir().map(|dir| dir.join(format!(".{}", APP_DIR)));
        let local = env::current_dir()
            .ok()
            .map(|dir| dir.join(format!(".{}", APP_DIR)));

        let mut paths: Vec<PathBuf> = Vec::new();
        for path in [platform, xdg, home, local].into_iter().flatten() {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    fn default_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join(APP_DIR).join(FILE_STEM).with_extension("toml")
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Search only `path` (given without extension)
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn positive_px(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(Error::InvalidSetting {
        field: field.to_string(),
        reason: format!("expected a positive pixel size, got {}", value),
    })
}

/// Check that every value is one the prompt can work with
pub fn validate_config(config: &Config) -> Result<()> {
    positive_px("prompt.char_width_px", config.prompt.char_width_px)?;
    positive_px("prompt.row_height_px", config.prompt.row_height_px)?;

    let entries = config.history.max_entries;
    if !(1..=MAX_HISTORY_ENTRIES).contains(&entries) {
        return Err(Error::InvalidSetting {
            field: "history.max_entries".to_string(),
            reason: format!("must be between 1 and {}, got {}", MAX_HISTORY_ENTRIES, entries),
        });
    }

    for (code, name) in &config.key_bindings.codes {
        if code.trim().parse::<u32>().is_err() || Key::from_name(name).is_none() {
            return Err(Error::UnknownKeyBinding {
                code: code.clone(),
                name: name.clone(),
            });
        }
    }

    Ok(())
}
