//! Per-query snapping and the stateful snapper driven once per tick.

use glam::Vec3;
use holosnap_core::{Ray, Triangle};
use holosnap_physics::{RaycastHit, RaycastOptions, Scene};
use serde::Serialize;
use tracing::{debug, trace};

use crate::{closest_edge, closest_step, closest_vertex, SnapMode, Step};

/// The three candidate points of one query.
///
/// All fields come from the same triangle and intersection. On a miss every
/// point is zero and `hit` is false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapResult {
    /// Raw ray intersection.
    pub intersection: Vec3,
    /// Nearest triangle corner.
    pub closest_vertex: Vec3,
    /// Quantized point on the nearest edge.
    pub closest_edge_point: Vec3,
    /// Whether the ray struck anything.
    pub hit: bool,
}

impl SnapResult {
    /// The "nothing under the ray" result.
    pub const MISS: Self = Self {
        intersection: Vec3::ZERO,
        closest_vertex: Vec3::ZERO,
        closest_edge_point: Vec3::ZERO,
        hit: false,
    };

    /// Point chosen by `mode`. Zero on a miss.
    pub fn selected(&self, mode: SnapMode) -> Vec3 {
        match mode {
            SnapMode::Exact => self.intersection,
            SnapMode::Vertex => self.closest_vertex,
            SnapMode::Edge => self.closest_edge_point,
        }
    }

    /// Point chosen by `mode`, or `None` when nothing was hit.
    pub fn sample(&self, mode: SnapMode) -> Option<Vec3> {
        self.hit.then(|| self.selected(mode))
    }
}

impl Default for SnapResult {
    fn default() -> Self {
        Self::MISS
    }
}

/// Snap `point`, assumed to lie on `triangle`, to its features.
pub fn snap_triangle(point: Vec3, triangle: &Triangle, step: Step) -> SnapResult {
    let vertex = closest_vertex(point, triangle);
    let edge_point = match closest_edge(point, triangle) {
        Some(edge) => closest_step(edge.projection, edge.start, edge.end, step),
        // All three corners coincide
        None => vertex,
    };
    SnapResult {
        intersection: point,
        closest_vertex: vertex,
        closest_edge_point: edge_point,
        hit: true,
    }
}

/// Raycasts into a [`Scene`] and snaps the hit.
///
/// Holds the current mode and step between queries along with the latest
/// result, so a renderer can read it after the driver's update.
#[derive(Debug, Clone)]
pub struct TriangleSnapper {
    mode: SnapMode,
    step: Step,
    options: RaycastOptions,
    latest: SnapResult,
    latest_hit: Option<RaycastHit>,
}

impl Default for TriangleSnapper {
    fn default() -> Self {
        Self::new(SnapMode::default(), Step::default(), RaycastOptions::default())
    }
}

impl TriangleSnapper {
    /// Create a snapper with no result yet.
    pub fn new(mode: SnapMode, step: Step, options: RaycastOptions) -> Self {
        Self {
            mode,
            step,
            options,
            latest: SnapResult::MISS,
            latest_hit: None,
        }
    }

    /// Raycast `scene` with `ray` and snap the result.
    pub fn query(&mut self, ray: &Ray, scene: &Scene) -> SnapResult {
        self.latest_hit = scene.raycast(ray, &self.options);
        self.latest = match &self.latest_hit {
            Some(hit) => snap_triangle(hit.point, &hit.triangle, self.step),
            None => SnapResult::MISS,
        };
        trace!(
            hit = self.latest.hit,
            mode = %self.mode,
            selected = ?self.selected(),
            "snap query"
        );
        self.latest
    }

    /// Forget the latest result, as if the last query missed.
    pub fn clear(&mut self) {
        self.latest = SnapResult::MISS;
        self.latest_hit = None;
    }

    /// Result of the most recent query.
    pub fn latest(&self) -> &SnapResult {
        &self.latest
    }

    /// World-space triangle struck by the most recent query.
    pub fn latest_triangle(&self) -> Option<Triangle> {
        self.latest_hit.map(|hit| hit.triangle)
    }

    /// Raw raycast behind the most recent result.
    pub fn latest_hit(&self) -> Option<&RaycastHit> {
        self.latest_hit.as_ref()
    }

    /// Whether the most recent query struck a triangle.
    pub fn hit(&self) -> bool {
        self.latest.hit
    }

    /// Latest point picked by the current mode.
    pub fn selected(&self) -> Vec3 {
        self.latest.selected(self.mode)
    }

    /// Latest point picked by the current mode, `None` on a miss.
    pub fn sample(&self) -> Option<Vec3> {
        self.latest.sample(self.mode)
    }

    /// Current mode.
    pub fn mode(&self) -> SnapMode {
        self.mode
    }

    /// Replace the mode.
    pub fn set_mode(&mut self, mode: SnapMode) {
        if mode != self.mode {
            debug!(from = %self.mode, to = %mode, "snap mode changed");
        }
        self.mode = mode;
    }

    /// Advance to the next mode and return it.
    pub fn cycle_mode(&mut self) -> SnapMode {
        self.set_mode(self.mode.next());
        self.mode
    }

    /// Current quantization step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Replace the step. Takes effect on the next query.
    pub fn set_step(&mut self, step: Step) {
        if step != self.step {
            debug!(from = self.step.get(), to = step.get(), "snap step changed");
        }
        self.step = step;
    }

    /// Raycast limits in use.
    pub fn options(&self) -> &RaycastOptions {
        &self.options
    }
}
