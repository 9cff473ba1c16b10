//! A set of mesh instances with cached world-space triangles.

use holosnap_core::{MeshInstance, Ray, Triangle};
use tracing::trace;

use crate::{ray_triangle_intersection, Aabb, RaycastHit, RaycastOptions};

#[derive(Debug)]
struct Entry {
    instance: MeshInstance,
    triangles: Vec<Triangle>,
    bounds: Option<Aabb>,
}

impl Entry {
    fn new(instance: MeshInstance) -> Self {
        let triangles = instance.world_triangles();
        let bounds = Aabb::from_points(triangles.iter().flat_map(|t| t.vertices()));
        Self {
            instance,
            triangles,
            bounds,
        }
    }
}

/// Everything a ray can hit.
///
/// World-space triangles and bounds are computed once on insertion; moving
/// an instance means removing and re-adding it.
#[derive(Debug, Default)]
pub struct Scene {
    entries: Vec<Entry>,
}

impl Scene {
    /// Build a scene from `instances`, keeping their order as instance indices.
    pub fn new<I: IntoIterator<Item = MeshInstance>>(instances: I) -> Self {
        Self {
            entries: instances.into_iter().map(Entry::new).collect(),
        }
    }

    /// Append an instance, returning its index.
    pub fn insert(&mut self, instance: MeshInstance) -> usize {
        self.entries.push(Entry::new(instance));
        self.entries.len() - 1
    }

    /// Remove every instance.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the scene holds no instances.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instance at `index`.
    pub fn instance(&self, index: usize) -> Option<&MeshInstance> {
        self.entries.get(index).map(|e| &e.instance)
    }

    /// World-space bounds of one instance. `None` for meshes without triangles.
    pub fn instance_bounds(&self, index: usize) -> Option<Aabb> {
        self.entries.get(index).and_then(|e| e.bounds)
    }

    /// Union of all instance bounds.
    pub fn bounds(&self) -> Option<Aabb> {
        self.entries
            .iter()
            .filter_map(|e| e.bounds)
            .reduce(|mut acc, b| {
                acc.encapsulate(&b);
                acc
            })
    }

    /// Nearest triangle hit within `options.max_distance`.
    ///
    /// Equal-distance hits keep the first instance/triangle in scene order.
    pub fn raycast(&self, ray: &Ray, options: &RaycastOptions) -> Option<RaycastHit> {
        let mut best: Option<RaycastHit> = None;

        for (instance, entry) in self.entries.iter().enumerate() {
            let Some(bounds) = entry.bounds else {
                continue;
            };
            let limit = best.map_or(options.max_distance, |hit| hit.distance);
            // From inside the box the slab test reports the exit distance
            let reachable = bounds.contains_point(ray.origin())
                || bounds
                    .ray_intersection(ray.origin(), ray.direction())
                    .is_some_and(|entry_t| entry_t <= limit);
            if !reachable {
                continue;
            }

            for (triangle_index, triangle) in entry.triangles.iter().enumerate() {
                let Some(t) = ray_triangle_intersection(ray, triangle, options.cull_backfaces) else {
                    continue;
                };
                let closer = match best {
                    Some(hit) => t < hit.distance,
                    None => t <= options.max_distance,
                };
                if closer {
                    best = Some(RaycastHit {
                        instance,
                        triangle_index,
                        triangle: *triangle,
                        point: ray.at(t),
                        distance: t,
                    });
                }
            }
        }

        match &best {
            Some(hit) => trace!(
                instance = %self.entries[hit.instance].instance.name,
                triangle = hit.triangle_index,
                distance = hit.distance,
                "raycast hit"
            ),
            None => trace!(max_distance = options.max_distance, "raycast miss"),
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use holosnap_core::TriangleMesh;

    fn quad_at(z: f32) -> MeshInstance {
        let mesh = TriangleMesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap();
        MeshInstance::new(format!("quad@{z}"), mesh, Mat4::from_translation(Vec3::new(0.0, 0.0, z)))
    }

    fn down_z(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 10.0), Vec3::NEG_Z).unwrap()
    }

    #[test]
    fn nearest_instance_wins() {
        let scene = Scene::new([quad_at(-2.0), quad_at(1.0)]);
        let hit = scene.raycast(&down_z(0.5, -0.5), &RaycastOptions::default()).unwrap();
        assert_eq!(hit.instance, 1);
        assert_eq!(hit.triangle_index, 0);
        assert!((hit.distance - 9.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.5, -0.5, 1.0)).length() < 1e-5);
    }

    #[test]
    fn reports_second_triangle_of_quad() {
        let scene = Scene::new([quad_at(0.0)]);
        let hit = scene.raycast(&down_z(-0.5, 0.5), &RaycastOptions::default()).unwrap();
        assert_eq!(hit.triangle_index, 1);
        assert_eq!(hit.triangle.p2, Vec3::new(-1.0, 1.0, 0.0));
    }

    #[test]
    fn respects_max_distance() {
        let scene = Scene::new([quad_at(-15.0)]);
        let ray = down_z(0.0, 0.2);
        assert!(scene.raycast(&ray, &RaycastOptions::default()).is_none());

        let far = RaycastOptions {
            max_distance: 30.0,
            ..RaycastOptions::default()
        };
        assert!(scene.raycast(&ray, &far).is_some());
    }

    #[test]
    fn rays_along_outer_edges_hit() {
        let scene = Scene::new([quad_at(0.0)]);
        for (x, y) in [(-1.0, 0.0), (1.0, 0.0), (0.0, 1.0), (-1.0, -1.0)] {
            let hit = scene
                .raycast(&down_z(x, y), &RaycastOptions::default())
                .unwrap_or_else(|| panic!("ray at ({x}, {y}) missed"));
            assert!((hit.point - Vec3::new(x, y, 0.0)).length() < 1e-5);
        }
    }

    #[test]
    fn origin_inside_large_bounds_still_hits() {
        // Room-sized mesh around the origin with a small panel just ahead
        let mesh = TriangleMesh::new(
            vec![
                Vec3::new(-40.0, -40.0, -40.0),
                Vec3::new(40.0, -40.0, -40.0),
                Vec3::new(0.0, 40.0, -30.0),
                Vec3::new(-1.0, -1.0, -5.0),
                Vec3::new(1.0, -1.0, -5.0),
                Vec3::new(0.0, 1.0, -5.0),
                Vec3::new(30.0, 30.0, 40.0),
                Vec3::new(31.0, 30.0, 40.0),
                Vec3::new(30.0, 31.0, 40.0),
            ],
            vec![0, 1, 2, 3, 4, 5, 6, 7, 8],
        )
        .unwrap();
        let scene = Scene::new([MeshInstance::new("room", mesh, Mat4::IDENTITY)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let hit = scene.raycast(&ray, &RaycastOptions::default()).unwrap();
        assert_eq!(hit.triangle_index, 1);
        assert!((hit.distance - 5.0).abs() < 1e-5);
    }

    #[test]
    fn empty_scene_misses() {
        let scene = Scene::default();
        assert!(scene.is_empty());
        assert!(scene.raycast(&down_z(0.0, 0.0), &RaycastOptions::default()).is_none());
        assert!(scene.bounds().is_none());
    }

    #[test]
    fn bounds_cover_every_instance() {
        let mut scene = Scene::new([quad_at(-2.0)]);
        let index = scene.insert(quad_at(3.0));
        assert_eq!(index, 1);
        let bounds = scene.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 3.0));
        assert_eq!(scene.instance_bounds(1).unwrap().min.z, 3.0);
    }
}
