//! Configuration loading
//!
//! Settings come from three layers: built-in defaults, an optional TOML file
//! and command-line flags, later layers winning. Every file key is optional.

use anyhow::{Context, Result};
use fretboard_core::{FretWindow, Instrument};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Number of ranked alternatives the `shape` command prints by default
pub const DEFAULT_SHAPES_SHOWN: usize = 3;

/// Raw configuration as written in a file or given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Preset name: guitar, drop-d, ukulele or bass
    pub instrument: Option<String>,
    /// Open-string notes, highest string first; replaces the preset's strings
    pub tuning: Option<Vec<String>>,
    pub fret_count: Option<u8>,
    pub min_fret: Option<i32>,
    pub max_fret: Option<i32>,
    pub shapes_shown: Option<usize>,
}

/// Validated settings the application runs with
#[derive(Debug, Clone)]
pub struct Settings {
    pub instrument: Instrument,
    pub window: FretWindow,
    pub shapes_shown: usize,
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(self, other: Config) -> Config {
        Config {
            instrument: other.instrument.or(self.instrument),
            tuning: other.tuning.or(self.tuning),
            fret_count: other.fret_count.or(self.fret_count),
            min_fret: other.min_fret.or(self.min_fret),
            max_fret: other.max_fret.or(self.max_fret),
            shapes_shown: other.shapes_shown.or(self.shapes_shown),
        }
    }

    pub fn resolve(&self) -> Result<Settings> {
        let preset = self.instrument.as_deref().unwrap_or("guitar");
        let base = Instrument::preset(preset)?;

        let instrument = match (&self.tuning, self.fret_count) {
            (Some(tuning), fret_count) => Instrument::from_tuning(
                fret_count.unwrap_or(base.fret_count()),
                tuning.as_slice(),
            )
            .context("Invalid tuning")?,
            (None, Some(fret_count)) => Instrument::new(fret_count, base.strings().to_vec())?,
            (None, None) => base,
        };

        let default_window = FretWindow::default();
        let window = FretWindow::new(
            self.min_fret.unwrap_or(default_window.min() as i32),
            self.max_fret.unwrap_or(default_window.max() as i32),
        )?;

        Ok(Settings {
            instrument,
            window,
            shapes_shown: self.shapes_shown.unwrap_or(DEFAULT_SHAPES_SHOWN).max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Config::default().resolve().unwrap();
        assert_eq!(settings.instrument, Instrument::standard_guitar());
        assert_eq!(settings.window, FretWindow::OPEN_POSITION);
        assert_eq!(settings.shapes_shown, DEFAULT_SHAPES_SHOWN);
    }

    #[test]
    fn test_parse_full_file() {
        let config = Config::from_toml_str(
            r#"
            instrument = "ukulele"
            fret_count = 15
            min_fret = 1
            max_fret = 4
            shapes_shown = 5
            "#,
        )
        .unwrap();
        let settings = config.resolve().unwrap();
        assert_eq!(settings.instrument.string_count(), 4);
        assert_eq!(settings.instrument.fret_count(), 15);
        assert_eq!(settings.window, FretWindow::new(1, 4).unwrap());
        assert_eq!(settings.shapes_shown, 5);
    }

    #[test]
    fn test_custom_tuning() {
        let config = Config::from_toml_str(r#"tuning = ["D2", "A1", "D1", "G0"]"#).unwrap();
        let settings = config.resolve().unwrap();
        assert_eq!(settings.instrument.string_count(), 4);
        assert_eq!(settings.instrument.fret_count(), 19);
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_values() {
        assert!(Config::from_toml_str("frets = 12").is_err());

        let inverted = Config {
            min_fret: Some(5),
            max_fret: Some(2),
            ..Config::default()
        };
        assert!(inverted.resolve().is_err());

        let unknown = Config {
            instrument: Some("theorbo".to_string()),
            ..Config::default()
        };
        assert!(unknown.resolve().is_err());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = Config {
            instrument: Some("bass".to_string()),
            max_fret: Some(5),
            ..Config::default()
        };
        let flags = Config {
            max_fret: Some(7),
            ..Config::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.instrument.as_deref(), Some("bass"));
        assert_eq!(merged.max_fret, Some(7));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_fret = 5").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.max_fret, Some(5));

        assert!(Config::load(Path::new("/nonexistent/fretboard.toml")).is_err());
    }
}
