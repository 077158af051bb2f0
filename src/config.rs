//! Runtime configuration with TOML file support.
//!
//! Every section uses `#[serde(default)]` so a partial file (e.g. only
//! overriding `[run]`) fills the rest with defaults. Command-line flags are
//! applied on top of the loaded file by the binary.

use crate::engine::errors::EngineError;
use crate::engine::scheduler::RunOptions;
use crate::model::element::ArrayModel;
use crate::model::grid::{Coord, Grid};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pacing of each run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Wait after every visible step, in milliseconds
    pub delay_ms: u64,
    /// Wait after each search visit, in milliseconds
    pub visit_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            delay_ms: 50,
            visit_delay_ms: 10,
        }
    }
}

/// Random input array shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    pub size: usize,
    pub min: i32,
    pub max: i32,
    /// Fixed seed for reproducible arrays; random when absent
    pub seed: Option<u64>,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        ArrayConfig {
            size: 40,
            min: 1,
            max: 100,
            seed: None,
        }
    }
}

/// Search grid layout as `[row, col]` pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: [usize; 2],
    pub end: [usize; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows: 20,
            cols: 40,
            start: [2, 2],
            end: [12, 22],
        }
    }
}

/// Snapshot history budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Upper bound on recorded snapshot memory, in bytes
    pub memory_limit: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            memory_limit: 64 * 1024 * 1024,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Write log output here instead of stderr
    pub log_file: Option<PathBuf>,
    pub run: RunConfig,
    pub array: ArrayConfig,
    pub grid: GridConfig,
    pub trace: TraceConfig,
}

impl Config {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| EngineError::ConfigParse(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.array.size == 0 {
            return Err(EngineError::InvalidConfig(
                "array.size must be at least 1".to_string(),
            ));
        }
        if self.array.min > self.array.max {
            return Err(EngineError::InvalidConfig(format!(
                "array.min ({}) is greater than array.max ({})",
                self.array.min, self.array.max
            )));
        }
        // building the grid checks dimensions and start/end placement
        self.build_grid()?;
        Ok(())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            delay: Duration::from_millis(self.run.delay_ms),
            visit_delay: Duration::from_millis(self.run.visit_delay_ms),
        }
    }

    /// Random number source for input arrays, seeded when configured
    pub fn rng(&self) -> StdRng {
        match self.array.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn build_array(&self, rng: &mut StdRng) -> Result<ArrayModel, EngineError> {
        ArrayModel::random(self.array.size, self.array.min..=self.array.max, rng)
    }

    pub fn build_grid(&self) -> Result<Grid, EngineError> {
        let [start_row, start_col] = self.grid.start;
        let [end_row, end_col] = self.grid.end;
        Grid::new(
            self.grid.rows,
            self.grid.cols,
            Coord::new(start_row, start_col),
            Coord::new(end_row, end_col),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r"
[run]
delay_ms = 5
";
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.run.delay_ms, 5);
        assert_eq!(config.run.visit_delay_ms, 10);
        assert_eq!(config.array, ArrayConfig::default());
        assert_eq!(config.grid.end, [12, 22]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.array.min = 10;
        config.array.max = 1;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let mut config = Config::default();
        config.grid.end = [30, 0];
        assert!(matches!(
            config.validate(),
            Err(EngineError::CoordinateOutOfBounds { .. })
        ));

        let mut config = Config::default();
        config.array.size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("algotty.toml");

        let mut config = Config::default();
        config.array.seed = Some(42);
        config.run.delay_ms = 0;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[run\ndelay_ms = ").unwrap();

        assert!(matches!(Config::load(&path), Err(EngineError::ConfigParse(_))));
    }

    #[test]
    fn test_seeded_arrays_repeat() {
        let mut config = Config::default();
        config.array.seed = Some(9);

        let a = config.build_array(&mut config.rng()).unwrap();
        let b = config.build_array(&mut config.rng()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
    }
}
