//! Tester configuration
//!
//! Stores user preferences in `~/.config/regex-live/config.yaml`:
//!
//! ```yaml
//! flags: "i"
//! theme:
//!   primary: "#AA2222"
//!   alternate: "#2244AA"
//!   single: "#227733"
//!   error: "#FF5555"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::flags::FlagSet;
use crate::theme::{Theme, ThemeData};

/// Configuration loaded at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TesterConfig {
    /// Flags active when a session starts, in serialized form (e.g. "iU")
    #[serde(default)]
    pub flags: String,
    #[serde(default)]
    pub theme: ThemeData,
}

impl TesterConfig {
    /// Load config from disk, or return defaults if missing or invalid
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Initial flags; invalid letters fall back to no flags
    pub fn initial_flags(&self) -> FlagSet {
        self.flags.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring configured flags {:?}: {}", self.flags, e);
            FlagSet::default()
        })
    }

    /// Resolved highlight theme; invalid colors fall back to the defaults
    pub fn theme(&self) -> Theme {
        Theme::from_data(&self.theme).unwrap_or_else(|e| {
            tracing::warn!("Ignoring configured theme: {}", e);
            Theme::default()
        })
    }
}
