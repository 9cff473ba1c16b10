//! Ray/triangle intersection (Möller–Trumbore).

use glam::Vec3;
use holosnap_core::{Ray, Triangle};
use serde::Serialize;

/// Picking range used when no explicit limit is configured.
pub const DEFAULT_MAX_DISTANCE: f32 = 20.0;

const RAY_EPSILON: f32 = 1e-7;

/// Result of a raycast against the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RaycastHit {
    /// Index of the mesh instance that was hit.
    pub instance: usize,
    /// Index of the triangle inside that instance's index buffer.
    pub triangle_index: usize,
    /// The struck triangle, in world space.
    pub triangle: Triangle,
    /// World-space position of the hit point.
    pub point: Vec3,
    /// The distance from the ray origin to the hit point.
    pub distance: f32,
}

/// Knobs for [`crate::Scene::raycast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastOptions {
    /// Hits farther than this are ignored.
    pub max_distance: f32,
    /// Ignore triangles whose front face points away from the ray.
    pub cull_backfaces: bool,
}

impl Default for RaycastOptions {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            cull_backfaces: false,
        }
    }
}

/// Intersect `ray` with `triangle`.
///
/// Returns the ray parameter of the hit. The front face is the side the
/// normal `(p1 - p0) x (p2 - p0)` points to. Rays parallel to the plane and
/// degenerate triangles never hit.
pub fn ray_triangle_intersection(ray: &Ray, triangle: &Triangle, cull_backfaces: bool) -> Option<f32> {
    let dir = ray.direction();
    let edge1 = triangle.p1 - triangle.p0;
    let edge2 = triangle.p2 - triangle.p0;

    let h = dir.cross(edge2);
    let det = edge1.dot(h);

    // det > 0 when the ray travels against the face normal
    if cull_backfaces {
        if det < RAY_EPSILON {
            return None;
        }
    } else if det.abs() < RAY_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin() - triangle.p0;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    (t > RAY_EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_camera() -> Triangle {
        // Normal points toward +Z
        Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn hits_triangle_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        let t = ray_triangle_intersection(&ray, &facing_camera(), true).unwrap();
        assert!((t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn misses_outside_and_behind() {
        let outside = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert!(ray_triangle_intersection(&outside, &facing_camera(), false).is_none());

        let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).unwrap();
        assert!(ray_triangle_intersection(&away, &facing_camera(), false).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X).unwrap();
        assert!(ray_triangle_intersection(&ray, &facing_camera(), false).is_none());
    }

    #[test]
    fn backface_culling_is_optional() {
        let from_behind = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();
        assert!(ray_triangle_intersection(&from_behind, &facing_camera(), true).is_none());
        let t = ray_triangle_intersection(&from_behind, &facing_camera(), false).unwrap();
        assert!((t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_triangle_misses() {
        let sliver = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        let ray = Ray::new(Vec3::new(0.5, 0.0, 1.0), Vec3::NEG_Z).unwrap();
        assert!(ray_triangle_intersection(&ray, &sliver, false).is_none());
    }
}
