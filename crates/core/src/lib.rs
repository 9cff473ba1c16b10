#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod error;
pub mod geometry;
pub mod mesh;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use error::GeometryError;
pub use geometry::{Ray, Triangle};
pub use mesh::{MeshInstance, Transform, TriangleMesh};

/// Host tick counter. One tick is one query/update pass of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    /// First tick of any session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}
