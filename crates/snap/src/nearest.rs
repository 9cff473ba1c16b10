//! Nearest-feature searches on a single triangle.
//!
//! Both searches scan candidates in winding order and accept a candidate when
//! its squared distance is `<=` the best so far, so on exact ties the later
//! candidate wins.

use glam::Vec3;
use holosnap_core::Triangle;

use crate::Step;

/// The edge whose supporting line passes closest to a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeProjection {
    /// Position of the edge in [`Triangle::edges`] order.
    pub index: usize,
    /// Edge start.
    pub start: Vec3,
    /// Edge end.
    pub end: Vec3,
    /// Orthogonal projection onto the infinite line through `start` and `end`.
    pub projection: Vec3,
}

/// Corner of `triangle` nearest to `point`.
pub fn closest_vertex(point: Vec3, triangle: &Triangle) -> Vec3 {
    let mut closest = triangle.p0;
    let mut closest_dist = f32::INFINITY;
    for vertex in triangle.vertices() {
        let dist = point.distance_squared(vertex);
        if dist <= closest_dist {
            closest = vertex;
            closest_dist = dist;
        }
    }
    closest
}

/// Project `point` onto the infinite line through `v1` and `v2`.
///
/// `None` when `v1 == v2`.
pub fn project_onto_line(point: Vec3, v1: Vec3, v2: Vec3) -> Option<Vec3> {
    let dir = (v2 - v1).try_normalize()?;
    Some(v1 + (point - v1).dot(dir) * dir)
}

/// Edge of `triangle` whose line projection lies nearest to `point`.
///
/// The projection is not clamped to the segment. Zero-length edges are
/// skipped; `None` only when all three are degenerate.
pub fn closest_edge(point: Vec3, triangle: &Triangle) -> Option<EdgeProjection> {
    let mut closest = None;
    let mut closest_dist = f32::INFINITY;
    for (index, (start, end)) in triangle.edges().into_iter().enumerate() {
        let Some(projection) = project_onto_line(point, start, end) else {
            continue;
        };
        let dist = point.distance_squared(projection);
        if dist <= closest_dist {
            closest_dist = dist;
            closest = Some(EdgeProjection {
                index,
                start,
                end,
                projection,
            });
        }
    }
    closest
}

/// Snap `point` to the nearest of the `step + 1` division points of the
/// segment `v1..v2`.
///
/// The distance along the edge is measured by signed projection and rounded
/// half to even, then clamped to the segment, so points past either end map
/// to that endpoint. A zero-length edge returns `v1`.
pub fn closest_step(point: Vec3, v1: Vec3, v2: Vec3, step: Step) -> Vec3 {
    let edge = v2 - v1;
    let length = edge.length();
    if length <= f32::EPSILON {
        return v1;
    }

    let steps = step.get() as f32;
    let step_length = length / steps;
    let length_to_point = (point - v1).dot(edge) / length;
    let division = (length_to_point / step_length)
        .round_ties_even()
        .clamp(0.0, steps);
    v1 + edge * division / steps
}
