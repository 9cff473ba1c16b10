use crate::config::SnapConfig;
use crate::scripted_input::{FrameInput, ScriptedInputPlayer};
use anyhow::Result;
use holosnap_core::Tick;
use holosnap_input::{ClickEvent, ClickHandler, StabilizedRay};
use holosnap_physics::{Aabb, Scene};
use holosnap_ruler::{Ruler, RulerSegment, RulerState};
use holosnap_snap::{SnapMode, SnapResult, Step, TriangleSnapper};
use holosnap_testkit::{EventRecord, JsonlSink};
use serde::Serialize;
use std::path::PathBuf;

pub struct HeadlessConfig {
    pub snap: SnapConfig,
    pub scene: Scene,
    pub script: ScriptedInputPlayer,
    pub events: Option<PathBuf>,
    pub max_ticks: Option<u64>,
}

/// Summary printed once the script runs out.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub ticks: u64,
    pub hits: u64,
    pub clicks: u64,
    pub measurements: Vec<RulerSegment>,
    pub final_mode: SnapMode,
    pub final_step: Step,
    pub bounds: Option<Aabb>,
}

/// What changed during one tick.
#[derive(Debug, Default)]
pub struct TickOutcome {
    pub mode_changed: Option<SnapMode>,
    pub step_changed: Option<Step>,
    pub click: Option<(ClickEvent, RulerState)>,
    pub measurement: Option<RulerSegment>,
}

#[derive(Serialize)]
struct ClickPayload {
    point: Option<glam::Vec3>,
    state: RulerState,
}

/// Snapper, ruler and ray stabilizer wired together for one user.
pub struct Session {
    snapper: TriangleSnapper,
    ruler: Ruler,
    stabilizer: StabilizedRay,
}

impl Session {
    pub fn new(cfg: &SnapConfig) -> Self {
        Self {
            snapper: TriangleSnapper::new(cfg.mode, cfg.step(), cfg.raycast_options()),
            ruler: Ruler::new(),
            stabilizer: StabilizedRay::new(cfg.stabilizer_weight),
        }
    }

    pub fn snapper(&self) -> &TriangleSnapper {
        &self.snapper
    }

    pub fn ruler(&self) -> &Ruler {
        &self.ruler
    }

    /// Run one tick: UI actions, then the snap query, then the click.
    pub fn tick(&mut self, tick: Tick, frame: &FrameInput, scene: &Scene) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if frame.cycle_mode {
            outcome.mode_changed = Some(self.snapper.cycle_mode());
        }
        if let Some(value) = frame.slider {
            let step = Step::from_slider(value);
            if step != self.snapper.step() {
                self.snapper.set_step(step);
                outcome.step_changed = Some(step);
            }
        }

        let ray = self.stabilizer.push(frame.ray);
        self.snapper.query(&ray, scene);

        if frame.click {
            let event = ClickEvent {
                tick,
                point: self.snapper.sample(),
            };
            self.ruler.on_click(&event);
            outcome.click = Some((event, self.ruler.state()));
            outcome.measurement = self.ruler.segment();
        }
        outcome
    }

    pub fn latest(&self) -> &SnapResult {
        self.snapper.latest()
    }
}

pub fn run(cfg: HeadlessConfig) -> Result<SessionReport> {
    let HeadlessConfig {
        snap,
        scene,
        mut script,
        events,
        max_ticks,
    } = cfg;

    let mut sink = events.as_deref().map(JsonlSink::create).transpose()?;
    let mut session = Session::new(&snap);
    let mut report = SessionReport {
        ticks: 0,
        hits: 0,
        clicks: 0,
        measurements: Vec::new(),
        final_mode: snap.mode,
        final_step: snap.step(),
        bounds: scene.bounds(),
    };

    if scene.is_empty() {
        tracing::warn!("scene has no meshes, every query will miss");
    }

    let mut tick = Tick::ZERO;
    while max_ticks.map_or(true, |max| tick.0 < max) {
        let Some(frame) = script.advance() else {
            break;
        };
        let outcome = session.tick(tick, &frame, &scene);

        if session.latest().hit {
            report.hits += 1;
        }
        if let Some(mode) = outcome.mode_changed {
            tracing::info!(tick = tick.0, %mode, "snap mode changed");
            write_event(&mut sink, tick, "mode", mode)?;
        }
        if let Some(step) = outcome.step_changed {
            tracing::info!(tick = tick.0, step = step.get(), "step changed");
            write_event(&mut sink, tick, "step", step)?;
        }
        if let Some((event, state)) = outcome.click {
            report.clicks += 1;
            write_event(
                &mut sink,
                tick,
                "click",
                ClickPayload {
                    point: event.point,
                    state,
                },
            )?;
        }
        if let Some(segment) = outcome.measurement {
            tracing::info!(
                tick = tick.0,
                distance = segment.distance,
                "measurement captured"
            );
            write_event(&mut sink, tick, "measurement", segment)?;
            report.measurements.push(segment);
        }

        tick = tick.advance(1);
    }

    if !script.is_finished() {
        tracing::warn!(ticks = tick.0, "tick limit reached before the script finished");
    }

    report.ticks = tick.0;
    report.final_mode = session.snapper().mode();
    report.final_step = session.snapper().step();

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
        tracing::debug!(events = sink.written(), "event log closed");
    }
    Ok(report)
}

fn write_event<T: Serialize>(
    sink: &mut Option<JsonlSink>,
    tick: Tick,
    kind: &str,
    payload: T,
) -> Result<()> {
    match sink {
        Some(sink) => sink.write(&EventRecord {
            tick,
            kind,
            payload,
        }),
        None => Ok(()),
    }
}
