//! Key-binding configuration persisted as a small JSON file.
//!
//! A missing or unreadable-as-JSON file is replaced with the defaults, so a
//! hand-edited config can never keep the editor from starting.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ParseError;

/// File name used when no explicit config path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Errors that can occur while reading or writing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to serialize config: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Editor actions reachable from a keyboard shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Load,
    Save,
    Undo,
    Redo,
}

/// Accelerator strings for each bindable action, e.g. `"Ctrl+Z"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub load: String,
    pub save: String,
    pub undo: String,
    pub redo: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            load: "Ctrl+O".to_owned(),
            save: "Ctrl+S".to_owned(),
            undo: "Ctrl+Z".to_owned(),
            redo: "Ctrl+Y".to_owned(),
        }
    }
}

impl KeyBindings {
    fn entries(&self) -> [(Action, &str); 4] {
        [
            (Action::Load, self.load.as_str()),
            (Action::Save, self.save.as_str()),
            (Action::Undo, self.undo.as_str()),
            (Action::Redo, self.redo.as_str()),
        ]
    }

    /// Find the action bound to `accelerator`. Bindings that fail to parse
    /// never match.
    pub fn action_for(&self, accelerator: &Accelerator) -> Option<Action> {
        self.entries().into_iter().find_map(|(action, binding)| {
            match binding.parse::<Accelerator>() {
                Ok(bound) if bound == *accelerator => Some(action),
                Ok(_) => None,
                Err(err) => {
                    log::warn!("Ignoring key binding for {:?}: {}", action, err);
                    None
                }
            }
        })
    }
}

/// The persisted application config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub keybinds: KeyBindings,
}

impl Config {
    /// Load the config at `path`, writing the defaults when the file is
    /// missing or does not parse.
    pub fn load_or_create(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            log::info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        // Invalid UTF-8 is rejected by the JSON parser like any other syntax error
        let bytes = fs::read(path)?;
        match serde_json::from_slice(&bytes) {
            Ok(config) => Ok(config),
            Err(err) => {
                log::warn!("Config at {} is malformed ({}), resetting to defaults", path.display(), err);
                let config = Self::default();
                config.save(path)?;
                Ok(config)
            }
        }
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// A parsed keyboard shortcut such as `Ctrl+Shift+Z`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accelerator {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Lowercase key name
    pub key: String,
}

impl Accelerator {
    pub fn new(key: &str) -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: false,
            key: key.to_lowercase(),
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

impl FromStr for Accelerator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Accelerator(s.to_owned());
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or_else(err)?;

        let mut accelerator = Accelerator::new(key);
        for modifier in parts {
            match modifier.to_lowercase().as_str() {
                "ctrl" | "control" => accelerator.ctrl = true,
                "shift" => accelerator.shift = true,
                "alt" => accelerator.alt = true,
                _ => return Err(err()),
            }
        }
        Ok(accelerator)
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        f.write_str(&self.key.to_uppercase())
    }
}
