use std::path::Path;

use serde::Deserialize;

use crate::input::Brush;
use crate::solver::SolverParams;
use crate::state::DEFAULT_SIZE;

pub const DEFAULT_CONFIG_PATH: &str = "dyetank.yaml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub brush: BrushConfig,
    pub run: RunConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub size: usize,
    pub dt: f64,
    pub diff: f64,
    pub visc: f64,
    pub iter: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub density: f64,
    pub velocity_scale: f64,
    pub press_frames: u64,
    pub release_frames: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub steps: u64,
    pub report_every: u64,
    /// JSON-lines density dump, one line per frame. Disabled when absent.
    pub snapshot_path: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let params = SolverParams::default();
        Self {
            size: DEFAULT_SIZE,
            dt: params.dt,
            diff: params.diff,
            visc: params.visc,
            iter: params.iter,
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            density: 100.0,
            velocity_scale: 2.0,
            press_frames: 90,
            release_frames: 30,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 600,
            report_every: 60,
            snapshot_path: None,
        }
    }
}

impl SimulationConfig {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            dt: self.dt,
            diff: self.diff,
            visc: self.visc,
            iter: self.iter,
        }
    }
}

impl BrushConfig {
    pub fn brush(&self) -> Brush {
        Brush::new(self.density, self.velocity_scale)
    }
}

/// Load config from `path`. A missing file yields defaults; an unreadable or
/// malformed one is reported and also yields defaults.
pub fn load(path: &Path) -> Config {
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(cfg) => {
                    log::debug!("loaded config from {}", path.display());
                    cfg
                }
                Err(e) => {
                    log::warn!("failed to parse {}: {e}; using defaults", path.display());
                    Config::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {e}; using defaults", path.display());
                Config::default()
            }
        }
    } else {
        Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.simulation.size, 64);
        assert_eq!(cfg.simulation.dt, 0.1);
        assert_eq!(cfg.simulation.diff, 0.0001);
        assert_eq!(cfg.simulation.visc, 0.0001);
        assert_eq!(cfg.simulation.iter, 4);
        assert_eq!(cfg.brush.density, 100.0);
        assert_eq!(cfg.brush.velocity_scale, 2.0);
        assert_eq!(cfg.run.steps, 600);
        assert_eq!(cfg.run.report_every, 60);
        assert!(cfg.run.snapshot_path.is_none());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "simulation:\n  size: 32\nrun:\n  steps: 10\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.simulation.size, 32);
        assert_eq!(cfg.simulation.dt, 0.1); // default
        assert_eq!(cfg.run.steps, 10);
        assert_eq!(cfg.brush.density, 100.0); // default
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
simulation:
  size: 48
  dt: 0.05
  diff: 0.0002
  visc: 0.0003
  iter: 10
brush:
  density: 50.0
  velocity_scale: 1.5
  press_frames: 10
  release_frames: 5
run:
  steps: 100
  report_every: 10
  snapshot_path: frames.jsonl
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        let params = cfg.simulation.solver_params();
        assert_eq!(cfg.simulation.size, 48);
        assert_eq!(params.dt, 0.05);
        assert_eq!(params.diff, 0.0002);
        assert_eq!(params.visc, 0.0003);
        assert_eq!(params.iter, 10);
        assert_eq!(cfg.brush.density, 50.0);
        assert_eq!(cfg.brush.velocity_scale, 1.5);
        assert_eq!(cfg.brush.press_frames, 10);
        assert_eq!(cfg.brush.release_frames, 5);
        assert_eq!(cfg.run.steps, 100);
        assert_eq!(cfg.run.report_every, 10);
        assert_eq!(cfg.run.snapshot_path.as_deref(), Some("frames.jsonl"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(&dir.path().join("absent.yaml"));
        assert_eq!(cfg.simulation.size, 64);
        assert_eq!(cfg.run.steps, 600);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "simulation:\n  iter: 12\nbrush:\n  density: 5.0").unwrap();
        let cfg = load(file.path());
        assert_eq!(cfg.simulation.iter, 12);
        assert_eq!(cfg.brush.density, 5.0);
    }

    #[test]
    fn test_load_malformed_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "simulation: [not, a, map").unwrap();
        let cfg = load(file.path());
        assert_eq!(cfg.simulation.size, 64);
    }

    #[test]
    fn test_brush_from_config() {
        let brush = BrushConfig::default().brush();
        assert_eq!(brush.density_amount, 100.0);
        assert_eq!(brush.velocity_scale, 2.0);
        assert!(!brush.is_stroking());
    }
}
