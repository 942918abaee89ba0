//! Configuration types for huaming.
//!
//! [`Config::load`] reads `~/.config/huaming/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::prefs::DEFAULT_KEY;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
base_path    = "data/flowers.json"
meta_path    = "data/flower_meta.json"
lenient_meta = false

[prefs]
# empty = $XDG_STATE_HOME/huaming/prefs.json
path = ""
key  = "flower-list-filters"

[ui]
theme                 = "default"
show_image_note       = true
list_highlight_symbol = "▶ "

[keybindings]
toggle_focus = "Tab"
query_focus  = "/"
command      = ":"
help         = "?"
cycle_sort   = "s"
cycle_group  = "g"
cycle_tier   = "t"
reset        = "r"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/huaming/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub prefs: PrefsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[data]` section: where the two dataset documents live on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    #[serde(default = "default_meta_path")]
    pub meta_path: PathBuf,
    /// Degrade to zero metadata instead of failing when the metadata
    /// document is missing or malformed.
    #[serde(default)]
    pub lenient_meta: bool,
}

fn default_base_path() -> PathBuf { PathBuf::from("data/flowers.json") }
fn default_meta_path() -> PathBuf { PathBuf::from("data/flower_meta.json") }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            meta_path: default_meta_path(),
            lenient_meta: false,
        }
    }
}

/// `[prefs]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PrefsConfig {
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_prefs_key")]
    pub key: String,
}

fn default_prefs_key() -> String { DEFAULT_KEY.to_string() }

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            key: default_prefs_key(),
        }
    }
}

impl PrefsConfig {
    /// The preference file, falling back to the XDG state directory.
    pub fn resolved_path(&self) -> PathBuf {
        if self.path.trim().is_empty() {
            state_dir().join("prefs.json")
        } else {
            PathBuf::from(self.path.trim())
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_show_image_note")]
    pub show_image_note: bool,
    #[serde(default = "default_list_highlight_symbol")]
    pub list_highlight_symbol: String,
}

fn default_theme() -> String { "default".to_string() }
fn default_show_image_note() -> bool { true }
fn default_list_highlight_symbol() -> String { "▶ ".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_image_note: default_show_image_note(),
            list_highlight_symbol: default_list_highlight_symbol(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_toggle_focus")]
    pub toggle_focus: String,
    #[serde(default = "default_query_focus")]
    pub query_focus: String,
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_cycle_sort")]
    pub cycle_sort: String,
    #[serde(default = "default_cycle_group")]
    pub cycle_group: String,
    #[serde(default = "default_cycle_tier")]
    pub cycle_tier: String,
    #[serde(default = "default_reset")]
    pub reset: String,
}

fn default_toggle_focus() -> String { "Tab".to_string() }
fn default_query_focus() -> String { "/".to_string() }
fn default_command() -> String { ":".to_string() }
fn default_help() -> String { "?".to_string() }
fn default_cycle_sort() -> String { "s".to_string() }
fn default_cycle_group() -> String { "g".to_string() }
fn default_cycle_tier() -> String { "t".to_string() }
fn default_reset() -> String { "r".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            toggle_focus: default_toggle_focus(),
            query_focus: default_query_focus(),
            command: default_command(),
            help: default_help(),
            cycle_sort: default_cycle_sort(),
            cycle_group: default_cycle_group(),
            cycle_tier: default_cycle_tier(),
            reset: default_reset(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/huaming/config.toml` (or `explicit` when given),
    /// layered on top of the built-in defaults. The default location is
    /// created with defaults if it does not exist; an explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        if !required && !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(required))
            .build()?
            .try_deserialize()?;
        tracing::debug!(path = %path.display(), theme = %cfg.ui.theme, "config loaded");
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "built-in config rejected, using struct defaults");
                Self {
                    data: DataConfig::default(),
                    prefs: PrefsConfig::default(),
                    ui: UiConfig::default(),
                    keybindings: KeybindingsConfig::default(),
                }
            })
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("huaming")
        .join("config.toml")
}

fn state_dir() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("state"))
        .join("huaming")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
