use anyhow::{Context, Result};
use glam::Vec3;
use holosnap_core::Ray;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptedStep {
    /// How many ticks the ray is held.
    #[serde(default = "default_ticks")]
    ticks: u32,
    origin: Vec3,
    direction: Vec3,
    #[serde(default)]
    click: bool,
    #[serde(default)]
    cycle_mode: bool,
    #[serde(default)]
    slider: Option<f32>,
}

fn default_ticks() -> u32 {
    1
}

/// Input for one tick. Actions fire only on the first tick of a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub ray: Ray,
    pub click: bool,
    pub cycle_mode: bool,
    pub slider: Option<f32>,
}

#[derive(Debug, Clone)]
struct PreparedStep {
    ticks: u32,
    ray: Ray,
    click: bool,
    cycle_mode: bool,
    slider: Option<f32>,
}

pub struct ScriptedInputPlayer {
    steps: Vec<PreparedStep>,
    index: usize,
    tick_in_step: u32,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("invalid script {}", path.display()))
    }

    pub fn from_json(input: &str) -> Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(input)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        let steps = file
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| -> Result<PreparedStep> {
                let ray = Ray::new(step.origin, step.direction)
                    .with_context(|| format!("step {i}"))?;
                Ok(PreparedStep {
                    ticks: step.ticks.max(1),
                    ray,
                    click: step.click,
                    cycle_mode: step.cycle_mode,
                    slider: step.slider,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            steps,
            index: 0,
            tick_in_step: 0,
        })
    }

    /// Measure two corners of the default cube, in vertex then edge mode.
    pub fn demo() -> Self {
        let step = |origin: Vec3, click: bool, cycle_mode: bool| PreparedStep {
            ticks: 2,
            ray: Ray::new(origin, Vec3::NEG_Z).expect("demo direction is non-zero"),
            click,
            cycle_mode,
            slider: None,
        };
        let steps = vec![
            step(Vec3::new(0.0, 0.0, 0.0), false, true),
            step(Vec3::new(-0.4, -0.35, 0.0), true, false),
            step(Vec3::new(0.45, 0.4, 0.0), true, false),
            step(Vec3::new(0.0, 0.0, 0.0), true, true),
            PreparedStep {
                slider: Some(4.0),
                ..step(Vec3::new(-0.45, 0.1, 0.0), true, false)
            },
            step(Vec3::new(0.45, -0.2, 0.0), true, false),
        ];
        Self {
            steps,
            index: 0,
            tick_in_step: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Input for the next tick, `None` once every step has run.
    pub fn advance(&mut self) -> Option<FrameInput> {
        let step = self.steps.get(self.index)?;
        let first_tick = self.tick_in_step == 0;
        let frame = FrameInput {
            ray: step.ray,
            click: first_tick && step.click,
            cycle_mode: first_tick && step.cycle_mode,
            slider: if first_tick { step.slider } else { None },
        };

        self.tick_in_step += 1;
        if self.tick_in_step >= step.ticks {
            self.index += 1;
            self.tick_in_step = 0;
        }
        Some(frame)
    }
}
