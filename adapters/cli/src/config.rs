//! Settings file read at startup; command-line flags override its values.

use std::{fs, path::Path, path::PathBuf};

use abyssal_core::CellCoord;
use abyssal_session::SessionConfig;
use abyssal_system_facts::{self as facts, DEFAULT_FACT_CHANCE};
use abyssal_system_movement::{self as movement, DEFAULT_DRIFT_THRESHOLD_MPS};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Tunable values of a terminal expedition.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Current speed a component must exceed before it drifts the submersible.
    pub(crate) drift_threshold_mps: f64,
    /// Probability of sharing a biome fact after a move.
    pub(crate) fact_chance: f64,
    /// Seed of the fact generator.
    pub(crate) seed: u64,
    /// Mission catalog to load instead of the built-in missions.
    pub(crate) missions: Option<PathBuf>,
    /// Start row; both row and column are required to override the centre.
    pub(crate) start_row: Option<u32>,
    /// Start column.
    pub(crate) start_column: Option<u32>,
    /// When set, only explicit `wait` commands advance time.
    pub(crate) manual_clock: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            drift_threshold_mps: DEFAULT_DRIFT_THRESHOLD_MPS,
            fact_chance: DEFAULT_FACT_CHANCE,
            seed: 0,
            missions: None,
            start_row: None,
            start_column: None,
            manual_clock: false,
        }
    }
}

impl Settings {
    /// Reads settings from the TOML file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse settings {}", path.display()))
    }

    /// Start cell requested by the settings, if fully specified.
    pub(crate) fn start(&self) -> Option<CellCoord> {
        Some(CellCoord::new(self.start_row?, self.start_column?))
    }

    /// Session configuration derived from the settings.
    pub(crate) fn session_config(&self) -> SessionConfig {
        SessionConfig {
            movement: movement::Config::new(self.drift_threshold_mps),
            facts: facts::Config::new(self.fact_chance, self.seed),
            start: self.start(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use abyssal_core::CellCoord;

    use super::Settings;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("abyssal.toml");
        fs::write(&path, "seed = 9\nstart_row = 3\nstart_column = 4\n").expect("write settings");

        let settings = Settings::load(&path).expect("settings parse");
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.start(), Some(CellCoord::new(3, 4)));
        assert_eq!(settings.fact_chance, Settings::default().fact_chance);
        assert!(!settings.manual_clock);
    }

    #[test]
    fn half_specified_start_uses_centre() {
        let settings = Settings {
            start_row: Some(2),
            ..Settings::default()
        };
        assert_eq!(settings.session_config().start, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("abyssal.toml");
        fs::write(&path, "speed = 3\n").expect("write settings");

        assert!(Settings::load(&path).is_err());
    }
}
