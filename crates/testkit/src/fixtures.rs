//! Small meshes and seeded randomness for tests and demos.

use glam::{Mat4, Vec3};
use holosnap_core::{MeshInstance, Triangle, TriangleMesh};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Right triangle in the XY plane with legs along +X and +Y, facing +Z.
pub fn right_triangle(leg: f32) -> TriangleMesh {
    TriangleMesh::new(
        vec![Vec3::ZERO, Vec3::new(leg, 0.0, 0.0), Vec3::new(0.0, leg, 0.0)],
        vec![0, 1, 2],
    )
    .expect("right triangle buffers are valid")
}

/// Unit square in the XY plane centered on the origin, facing +Z.
pub fn unit_quad() -> TriangleMesh {
    TriangleMesh::new(
        vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
    .expect("quad buffers are valid")
}

/// Unit cube centered on the origin with outward-facing triangles.
pub fn unit_cube() -> TriangleMesh {
    let h = 0.5;
    let vertices = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];
    #[rustfmt::skip]
    let indices = vec![
        4, 5, 6, 4, 6, 7, // +Z
        0, 2, 1, 0, 3, 2, // -Z
        1, 2, 6, 1, 6, 5, // +X
        0, 4, 7, 0, 7, 3, // -X
        3, 7, 6, 3, 6, 2, // +Y
        0, 1, 5, 0, 5, 4, // -Y
    ];
    TriangleMesh::new(vertices, indices).expect("cube buffers are valid")
}

/// Place `mesh` at the origin with no rotation or scale.
pub fn instance(name: &str, mesh: TriangleMesh) -> MeshInstance {
    MeshInstance::new(name, mesh, Mat4::IDENTITY)
}

/// Place `mesh` at `translation`.
pub fn instance_at(name: &str, mesh: TriangleMesh, translation: Vec3) -> MeshInstance {
    MeshInstance::new(name, mesh, Mat4::from_translation(translation))
}

/// Reproducible RNG for randomized tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random triangle with corners inside `[-extent, extent]^3`.
pub fn random_triangle(rng: &mut StdRng, extent: f32) -> Triangle {
    let mut corner = || {
        Vec3::new(
            rng.gen_range(-extent..=extent),
            rng.gen_range(-extent..=extent),
            rng.gen_range(-extent..=extent),
        )
    };
    Triangle::new(corner(), corner(), corner())
}
