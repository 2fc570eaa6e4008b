//! TOML configuration: projectile settings and named hotkey chords.
//!
//! Every section and field is optional; missing values take their defaults.
//! Unknown fields are rejected so typos surface at load time. Chord key names
//! and projectile settings are validated while loading, never at use.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::platform::{parse_keys, Key, KeyParseError};
use crate::projectile::{ProjectileError, ProjectileSettings};

const DEFAULT_HOLD_MS: u64 = 50;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid [projectile] section: {0}")]
    Projectile(#[from] ProjectileError),
    #[error("chord {chord:?}: {source}")]
    Chord {
        chord: String,
        source: KeyParseError,
    },
    #[error("chord {0:?} has no keys")]
    EmptyChord(String),
}

// ---------------------------------------------------------------------------
// File layout
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    projectile: ProjectileSettings,
    hotkeys: RawHotkeys,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawHotkeys {
    hold_ms: u64,
    chords: BTreeMap<String, Vec<String>>,
}

impl Default for RawHotkeys {
    fn default() -> Self {
        Self {
            hold_ms: DEFAULT_HOLD_MS,
            chords: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validated config
// ---------------------------------------------------------------------------

/// Loaded and validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub projectile: ProjectileSettings,
    /// How long `tap` holds a chord down.
    pub hold: Duration,
    /// Named key chords, already parsed.
    pub chords: BTreeMap<String, Vec<Key>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projectile: ProjectileSettings::default(),
            hold: Duration::from_millis(DEFAULT_HOLD_MS),
            chords: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        raw.projectile.validate()?;

        let mut chords = BTreeMap::new();
        for (name, key_names) in raw.hotkeys.chords {
            if key_names.is_empty() {
                return Err(ConfigError::EmptyChord(name));
            }
            let keys = parse_keys(&key_names).map_err(|source| ConfigError::Chord {
                chord: name.clone(),
                source,
            })?;
            chords.insert(name, keys);
        }

        Ok(Self {
            projectile: raw.projectile,
            hold: Duration::from_millis(raw.hotkeys.hold_ms),
            chords,
        })
    }

    /// Loads the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("config: loaded {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given. Otherwise loads the default location if a
    /// file exists there, else returns defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn chord(&self, name: &str) -> Option<&[Key]> {
        self.chords.get(name).map(Vec::as_slice)
    }
}

/// Returns the default config file path.
///
/// Respects `$XDG_CONFIG_HOME`; falls back to `$HOME/.config`.
pub fn default_path() -> Option<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(config_dir.join("hotshot").join("config.toml"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyCode;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn full_document_parses() {
        let config = Config::from_toml_str(
            r#"
            [projectile]
            collision_radius = 10.0
            initial_speed = 1200.0
            should_bounce = false

            [hotkeys]
            hold_ms = 120

            [hotkeys.chords]
            live_coding = ["LeftControl", "LeftAlt", "F11"]
            "#,
        )
        .unwrap();

        assert_eq!(config.projectile.collision_radius, 10.0);
        assert_eq!(config.projectile.initial_speed, 1200.0);
        assert!(!config.projectile.should_bounce);
        assert_eq!(config.projectile.bounciness, 0.2);
        assert_eq!(config.hold, Duration::from_millis(120));
        assert_eq!(
            config.chord("live_coding"),
            Some(
                &[
                    Key::Code(KeyCode::Ctrl),
                    Key::Code(KeyCode::Alt),
                    Key::Code(KeyCode::F11)
                ][..]
            )
        );
        assert_eq!(config.chord("missing"), None);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Config::from_toml_str("[projectile]\nspeeed = 3.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn negative_speed_is_rejected() {
        let err = Config::from_toml_str("[projectile]\nmax_speed = -5.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Projectile(_)), "{err}");
    }

    #[test]
    fn unknown_chord_key_names_the_chord() {
        let err = Config::from_toml_str("[hotkeys.chords]\nbroken = [\"Ctrl\", \"Hyper\"]\n")
            .unwrap_err();
        match err {
            ConfigError::Chord { chord, .. } => assert_eq!(chord, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_chord_is_rejected() {
        let err = Config::from_toml_str("[hotkeys.chords]\nnothing = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyChord(name) if name == "nothing"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("hotshot-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[hotkeys]\nhold_ms = 7\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.hold, Duration::from_millis(7));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("hotshot-does-not-exist.toml");
        let err = Config::load_or_default(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
