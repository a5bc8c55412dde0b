use crate::controller::serial::DEFAULT_BAUD;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = ".juma_rs232_gui.json";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

/// Settings remembered between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub port: Option<String>,
    pub baud: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: Theme::default(),
            port: None,
            baud: DEFAULT_BAUD,
        }
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(FILE_NAME))
}

impl Preferences {
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::info!("No preferences at {}: {}", path.display(), e);
                return Preferences::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Invalid preferences in {}: {}", path.display(), e);
            Preferences::default()
        })
    }

    pub fn save(self: &Self, path: &Path) {
        let result = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            log::warn!("Unable to save preferences to {}: {}", path.display(), e);
        }
    }
}
