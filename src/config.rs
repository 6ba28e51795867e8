//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/edgeswitch/config.json`
//! and re-read whenever the controller is told the configuration changed.
//! Every key is optional.
//!
//! # Example
//!
//! ```json
//! {
//!   "edges": "6,2",
//!   "show_toggle_osd": true,
//!   "fallback_to_all_edges": false,
//!   "shortcut": { "keys": "SUPER CTRL, E" },
//!   "hyprland": {
//!     "switch": { "left": "workspace r-1", "right": "workspace r+1" },
//!     "corner_size": 16
//!   }
//! }
//! ```
//!
//! `edges` may also be an array (`[6, "right"]`) or a single number; see
//! [`EdgeList::from_value`](crate::edge::EdgeList::from_value).

use crate::edge::EdgeList;
use crate::hyprland::shell::HyprlandConfig;
use crate::traits::ConfigSource;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Edges that trigger a switch.  Unparsable input means no edges.
    pub edges: EdgeList,

    /// Show a notification when switch-on-edge mode is toggled.
    pub show_toggle_osd: bool,

    /// Register all eight edges when `edges` is empty.  When unset an empty
    /// edge list leaves edgeswitch idle.
    pub fallback_to_all_edges: bool,

    /// Global shortcut for the switch-on-edge toggle.
    pub shortcut: ShortcutConfig,

    /// Hyprland backend settings.  Only read at startup.
    pub hyprland: HyprlandConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edges: EdgeList::default(),
            show_toggle_osd: true,
            fallback_to_all_edges: false,
            shortcut: ShortcutConfig::default(),
            hyprland: HyprlandConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// The edges to register: the configured list, or every edge when the
    /// list is empty and `fallback_to_all_edges` is set.
    pub fn effective_edges(&self) -> EdgeList {
        if self.edges.is_empty() && self.fallback_to_all_edges {
            EdgeList::all()
        } else {
            self.edges.clone()
        }
    }
}

/// The toggle action as registered with the shell's shortcut subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    /// Stable action name.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Default key combination in the shell's notation.
    pub keys: String,
    /// Command the shortcut runs to deliver a pulse.
    pub command: String,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            name: "edgeswitch-toggle".into(),
            label: "Toggle switch on edge".into(),
            keys: "SUPER CTRL, E".into(),
            command: "edgeswitch-ctl pulse".into(),
        }
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

/// A [`ConfigSource`] backed by a JSON file, re-read on every load.
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Config {
        match Config::load(&self.path) {
            Ok(cfg) => {
                debug!("loaded config from {}", self.path.display());
                cfg
            }
            Err(e) => {
                info!("no usable config ({}), using defaults", e);
                Config::default()
            }
        }
    }
}
