use anyhow::Result;
use holosnap_physics::{RaycastOptions, DEFAULT_MAX_DISTANCE};
use holosnap_snap::{SnapMode, Step};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/holosnap.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Edge divisions (1 to 100).
    pub step: u32,
    /// Mode the snapper starts in.
    pub mode: SnapMode,
    /// Picking range in world units.
    pub max_distance: f32,
    pub cull_backfaces: bool,
    /// How far each new ray sample pulls the stable ray (1.0 = no smoothing).
    pub stabilizer_weight: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            step: Step::DEFAULT.get(),
            mode: SnapMode::Exact,
            max_distance: DEFAULT_MAX_DISTANCE,
            cull_backfaces: false,
            stabilizer_weight: 1.0,
        }
    }
}

impl SnapConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        let cfg = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SnapConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SnapConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                SnapConfig::default()
            }
        };
        cfg.sanitized()
    }

    /// Clamp out-of-range values back into their valid ranges.
    pub fn sanitized(mut self) -> Self {
        let step = Step::new(self.step);
        if step.get() != self.step {
            warn!(requested = self.step, step = step.get(), "step clamped");
            self.step = step.get();
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            warn!(
                max_distance = self.max_distance,
                "max_distance must be positive, using default"
            );
            self.max_distance = DEFAULT_MAX_DISTANCE;
        }
        if !self.stabilizer_weight.is_finite()
            || self.stabilizer_weight <= 0.0
            || self.stabilizer_weight > 1.0
        {
            warn!(
                weight = self.stabilizer_weight,
                "stabilizer_weight must be in (0, 1], disabling smoothing"
            );
            self.stabilizer_weight = 1.0;
        }
        self
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn step(&self) -> Step {
        Step::new(self.step)
    }

    pub fn raycast_options(&self) -> RaycastOptions {
        RaycastOptions {
            max_distance: self.max_distance,
            cull_backfaces: self.cull_backfaces,
        }
    }
}
