#![warn(missing_docs)]
//! Snap a ray hit to the struck triangle's nearest vertex or to a quantized
//! point on its nearest edge.

mod mode;
mod nearest;
mod snapper;
mod step;

pub use mode::{Indicators, SnapMode};
pub use nearest::{closest_edge, closest_step, closest_vertex, project_onto_line, EdgeProjection};
pub use snapper::{snap_triangle, SnapResult, TriangleSnapper};
pub use step::Step;
