//! Application configuration.
//!
//! The configuration is a JSON file with a `"default"` grid section, optional
//! per-monitor overrides named `"monitor<N>"` (N is the monitor index), and a
//! `"keys"` section mapping key names to command names.
//!
//! Overrides are merged shallowly: each key present in `monitor<N>` replaces
//! the same key from `default`, everything else is inherited.
//!
//! # Example
//!
//! ```json
//! {
//!   "default": { "xdivs": 3, "ydivs": 2, "spacing": 4 },
//!   "monitor1": { "xdivs": 4, "padding": [28, 0, 0, 0] },
//!   "keys": {
//!     "accelerator": "<Ctrl><Mod1><Mod2>",
//!     "commands": { "KP_4": "left", "KP_6": "right" }
//!   }
//! }
//! ```

use crate::command::Command;
use crate::geometry::Padding;
use crate::placement::PlacementError;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Grid settings for one monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Place windows on the monitor under the pointer instead of the
    /// window's own monitor.
    pub snaptocursor: bool,
    /// Number of horizontal divisions.
    pub xdivs: u32,
    /// Number of vertical divisions.
    pub ydivs: u32,
    /// Extra padding subtracted from the work area, `[top, right, bottom, left]`.
    pub padding: Padding,
    /// Gap between neighbouring windows (pixels).
    pub spacing: u32,
    /// Smallest width fraction a clamped placement may have.
    pub minwidth: f64,
    /// Largest width fraction a clamped placement may have.
    pub maxwidth: f64,
    /// Smallest height fraction a clamped placement may have.
    pub minheight: f64,
    /// Largest height fraction a clamped placement may have.
    pub maxheight: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            snaptocursor: false,
            xdivs: 3,
            ydivs: 2,
            padding: Padding::default(),
            spacing: 4,
            minwidth: 0.25,
            maxwidth: 0.67,
            minheight: 0.33,
            maxheight: 0.67,
        }
    }
}

impl GridConfig {
    /// Reject settings the placement pipeline cannot work with.
    pub fn validate(&self) -> Result<(), PlacementError> {
        if self.xdivs == 0 || self.ydivs == 0 {
            return Err(PlacementError::InvalidConfig(format!(
                "divisions must be positive (xdivs={}, ydivs={})",
                self.xdivs, self.ydivs
            )));
        }
        let ranges = [
            ("width", self.minwidth, self.maxwidth),
            ("height", self.minheight, self.maxheight),
        ];
        for (axis, min, max) in ranges {
            if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) {
                return Err(PlacementError::InvalidConfig(format!(
                    "min{axis}/max{axis} must lie in [0, 1] (got {min}, {max})"
                )));
            }
            if min > max {
                return Err(PlacementError::InvalidConfig(format!(
                    "min{axis} {min} exceeds max{axis} {max}"
                )));
            }
        }
        Ok(())
    }
}

/// Key bindings: an accelerator prefix plus key-name → command-name pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Modifier combination every binding requires (GTK accelerator syntax).
    pub accelerator: String,
    /// `key_name -> command_name`.
    pub commands: BTreeMap<String, String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let commands = [
            ("KP_1", "bottomleft"),
            ("KP_2", "bottom"),
            ("KP_3", "bottomright"),
            ("KP_4", "left"),
            ("KP_5", "middle"),
            ("KP_6", "right"),
            ("KP_7", "topleft"),
            ("KP_8", "top"),
            ("KP_9", "topright"),
            ("KP_0", "maximize"),
            ("KP_Enter", "cycle-monitor"),
            ("KP_Divide", "max-stretch"),
        ];
        Self {
            accelerator: "<Ctrl><Mod1><Mod2>".into(),
            commands: commands
                .into_iter()
                .map(|(k, c)| (k.to_string(), c.to_string()))
                .collect(),
        }
    }
}

impl KeyBindings {
    /// Resolve the command bound to `key`.
    ///
    /// Returns `Ok(None)` for an unbound key and
    /// [`PlacementError::UnknownCommand`] if the bound name is not a command.
    pub fn resolve(&self, key: &str) -> Result<Option<Command>, PlacementError> {
        self.commands.get(key).map(|name| name.parse()).transpose()
    }
}

/// Top-level configuration.
///
/// Every section is optional — a minimal `{}` file is valid and falls back
/// to the compiled-in defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Raw `"default"` section as written by the user.
    default: Map<String, Value>,
    /// Raw `"monitor<N>"` sections, keyed by monitor index.
    monitors: BTreeMap<usize, Map<String, Value>>,
    /// Key bindings.
    pub keys: KeyBindings,
}

/// On-disk shape of the file; monitor sections are collected from the
/// remaining keys.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawConfig {
    #[serde(default)]
    default: Map<String, Value>,
    #[serde(default)]
    keys: KeyBindings,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl Config {
    /// Parse a configuration from JSON text and validate every section.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        let mut monitors = BTreeMap::new();
        for (key, value) in raw.rest {
            let Some(index) = key.strip_prefix("monitor").and_then(|n| n.parse::<usize>().ok()) else {
                continue;
            };
            match value {
                Value::Object(section) => {
                    monitors.insert(index, section);
                }
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be an object, got {}",
                        key, other
                    )))
                }
            }
        }
        let config = Self {
            default: raw.default,
            monitors,
            keys: raw.keys,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load the configuration at `path`, writing the defaults there first if
    /// the file does not exist.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, Self::default_json()?)?;
            info!("wrote default config to {}", path.display());
        }
        Self::load(path)
    }

    /// The compiled-in defaults as pretty-printed JSON.
    pub fn default_json() -> Result<String, ConfigError> {
        let raw = RawConfig {
            default: to_object(&GridConfig::default())?,
            keys: KeyBindings::default(),
            rest: Map::new(),
        };
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// Effective grid settings for the monitor at `index`.
    pub fn for_monitor(&self, index: usize) -> Result<GridConfig, ConfigError> {
        self.merged(self.monitors.get(&index))
    }

    /// Compiled defaults, overlaid by the user's default section, overlaid
    /// by `section`.
    fn merged(&self, section: Option<&Map<String, Value>>) -> Result<GridConfig, ConfigError> {
        let mut merged = to_object(&GridConfig::default())?;
        merged.extend(self.default.clone());
        if let Some(section) = section {
            merged.extend(section.clone());
        }
        let grid: GridConfig = serde_json::from_value(Value::Object(merged))?;
        Ok(grid)
    }

    /// Validate the default section and every monitor override.
    fn validate(&self) -> Result<(), ConfigError> {
        self.merged(None)?
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("default: {}", e)))?;
        for (index, section) in &self.monitors {
            self.merged(Some(section))?
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("monitor{}: {}", index, e)))?;
        }
        Ok(())
    }
}

fn to_object(grid: &GridConfig) -> Result<Map<String, Value>, ConfigError> {
    match serde_json::to_value(grid)? {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::Invalid(format!("expected object, got {}", other))),
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Anchor;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    fn tmp_config_path() -> std::path::PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("snapgrd-test-{}-{}", std::process::id(), id))
            .join("config.json")
    }

    #[test]
    fn empty_uses_defaults() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg.for_monitor(0).unwrap(), GridConfig::default());
        assert_eq!(cfg.keys, KeyBindings::default());
    }

    #[test]
    fn partial_default_inherits_the_rest() {
        let cfg = Config::from_json(r#"{ "default": { "xdivs": 4, "spacing": 0 } }"#).unwrap();
        let grid = cfg.for_monitor(0).unwrap();
        assert_eq!(grid.xdivs, 4);
        assert_eq!(grid.spacing, 0);
        assert_eq!(grid.ydivs, GridConfig::default().ydivs);
        assert_eq!(grid.maxwidth, GridConfig::default().maxwidth);
    }

    #[test]
    fn monitor_override_is_shallow() {
        let json = r#"{
            "default": { "xdivs": 4, "padding": [28, 0, 0, 0] },
            "monitor1": { "ydivs": 3, "padding": [0, 0, 0, 0] }
        }"#;
        let cfg = Config::from_json(json).unwrap();
        let m0 = cfg.for_monitor(0).unwrap();
        assert_eq!((m0.xdivs, m0.ydivs), (4, 2));
        assert_eq!(m0.padding, Padding::from([28, 0, 0, 0]));
        let m1 = cfg.for_monitor(1).unwrap();
        assert_eq!((m1.xdivs, m1.ydivs), (4, 3));
        assert_eq!(m1.padding, Padding::default());
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "default": {}, "future_section": { "key": 42 }, "monitorX": 1 }"#;
        let _cfg = Config::from_json(json).unwrap();
    }

    #[test]
    fn min_above_max_is_rejected() {
        let json = r#"{ "default": { "minwidth": 0.8, "maxwidth": 0.5 } }"#;
        assert!(matches!(Config::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn invalid_monitor_override_is_rejected() {
        let json = r#"{ "monitor2": { "xdivs": 0 } }"#;
        let err = Config::from_json(json).unwrap_err();
        assert!(err.to_string().contains("monitor2"), "{}", err);
    }

    #[test]
    fn non_object_monitor_section_is_rejected() {
        assert!(Config::from_json(r#"{ "monitor0": [1, 2] }"#).is_err());
    }

    #[test]
    fn out_of_range_fraction_is_rejected() {
        let grid = GridConfig {
            maxheight: 1.5,
            ..GridConfig::default()
        };
        assert!(matches!(grid.validate(), Err(PlacementError::InvalidConfig(_))));
    }

    #[test]
    fn key_bindings_resolve_commands() {
        let keys = KeyBindings::default();
        assert_eq!(keys.resolve("KP_4").unwrap(), Some(Command::Snap(Anchor::Left)));
        assert_eq!(keys.resolve("KP_Enter").unwrap(), Some(Command::CycleMonitor));
        assert_eq!(keys.resolve("F13").unwrap(), None);
    }

    #[test]
    fn key_bound_to_unknown_command_is_an_error() {
        let cfg = Config::from_json(r#"{ "keys": { "commands": { "F1": "diagonal" } } }"#).unwrap();
        assert!(matches!(cfg.keys.resolve("F1"), Err(PlacementError::UnknownCommand(_))));
    }

    #[test]
    fn default_json_round_trips() {
        let cfg = Config::from_json(&Config::default_json().unwrap()).unwrap();
        assert_eq!(cfg.for_monitor(3).unwrap(), GridConfig::default());
        assert_eq!(cfg.keys, KeyBindings::default());
    }

    #[test]
    fn load_or_init_writes_defaults_once() {
        let path = tmp_config_path();
        let cfg = Config::load_or_init(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.for_monitor(0).unwrap(), GridConfig::default());

        std::fs::write(&path, r#"{ "default": { "xdivs": 5 } }"#).unwrap();
        let cfg = Config::load_or_init(&path).unwrap();
        assert_eq!(cfg.for_monitor(0).unwrap().xdivs, 5);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = tmp_config_path();
        assert!(matches!(Config::load(&path), Err(ConfigError::Io(_))));
    }
}
