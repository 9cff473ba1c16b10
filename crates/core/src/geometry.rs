//! Rays and world-space triangles.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// A picking ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    ///
    /// Fails when the direction is zero-length or not finite.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, GeometryError> {
        let length_sq = direction.length_squared();
        if !direction.is_finite() || length_sq <= f32::EPSILON * f32::EPSILON {
            return Err(GeometryError::DegenerateDirection(direction.to_array()));
        }
        Ok(Self {
            origin,
            direction: direction / length_sq.sqrt(),
        })
    }

    /// Ray origin in world space.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit-length direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Three points in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First corner.
    pub p0: Vec3,
    /// Second corner.
    pub p1: Vec3,
    /// Third corner.
    pub p2: Vec3,
}

impl Triangle {
    /// Create a triangle from its corners.
    pub const fn new(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Self { p0, p1, p2 }
    }

    /// Corners in winding order.
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Edges in winding order: (p0, p1), (p1, p2), (p2, p0).
    pub fn edges(&self) -> [(Vec3, Vec3); 3] {
        [(self.p0, self.p1), (self.p1, self.p2), (self.p2, self.p0)]
    }

    /// Unnormalized face normal, `(p1 - p0) x (p2 - p0)`.
    pub fn normal(&self) -> Vec3 {
        (self.p1 - self.p0).cross(self.p2 - self.p0)
    }

    /// Map all corners through `matrix`.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            p0: matrix.transform_point3(self.p0),
            p1: matrix.transform_point3(self.p1),
            p2: matrix.transform_point3(self.p2),
        }
    }
}
