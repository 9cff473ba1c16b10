use glam::Mat4;
use holosnap_core::{MeshInstance, Ray, TriangleMesh};
use holosnap_physics::Scene;
use holosnap_snap::{SnapMode, Step, TriangleSnapper};
use holosnap_testkit::{instance_at, random_triangle, seeded_rng, unit_cube};

#[test]
fn centroid_rays_hit_random_triangles() {
    let mut rng = seeded_rng(0x5eed);
    let mut snapper = TriangleSnapper::default();
    snapper.set_step(Step::new(8));

    let mut checked = 0;
    for _ in 0..200 {
        let tri = random_triangle(&mut rng, 5.0);
        let normal = tri.normal();
        if normal.length() < 1e-2 {
            continue;
        }
        let mesh = TriangleMesh::new(tri.vertices().to_vec(), vec![0, 1, 2]).unwrap();
        let scene = Scene::new([MeshInstance::new("random", mesh, Mat4::IDENTITY)]);

        let centroid = (tri.p0 + tri.p1 + tri.p2) / 3.0;
        let n = normal.normalize();
        let ray = Ray::new(centroid + n * 5.0, -n).unwrap();

        let result = snapper.query(&ray, &scene);
        assert!(result.hit, "centroid ray missed {tri:?}");
        assert!((result.intersection - centroid).length() < 1e-3);
        assert!(tri.vertices().contains(&result.closest_vertex));
        checked += 1;
    }
    assert!(checked > 150);
}

#[test]
fn cube_face_snaps_to_corner_and_edge() {
    let scene = Scene::new([instance_at("cube", unit_cube(), glam::Vec3::new(0.0, 0.0, -3.0))]);
    let mut snapper = TriangleSnapper::default();
    snapper.set_step(Step::new(2));

    // Front face sits at z = -2.5
    let ray = Ray::new(glam::Vec3::new(0.4, 0.1, 0.0), glam::Vec3::NEG_Z).unwrap();
    let result = snapper.query(&ray, &scene);
    assert!(result.hit);
    assert!((result.intersection.z + 2.5).abs() < 1e-5);

    snapper.set_mode(SnapMode::Vertex);
    let vertex = snapper.sample().unwrap();
    assert!((vertex - glam::Vec3::new(0.5, 0.5, -2.5)).length() < 1e-5);

    // Nearest edge is x = 0.5; two steps put divisions at y = -0.5, 0, 0.5
    snapper.set_mode(SnapMode::Edge);
    let edge = snapper.sample().unwrap();
    assert!((edge - glam::Vec3::new(0.5, 0.0, -2.5)).length() < 1e-5);
}
