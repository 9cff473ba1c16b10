use anyhow::{Context, Result};
use glam::Vec3;
use holosnap_core::{MeshInstance, Transform, TriangleMesh};
use holosnap_physics::Scene;
use serde::Deserialize;
use std::{fs, path::Path};

/// Where the built-in cube sits when no scene file is given.
const DEFAULT_CUBE_POSITION: Vec3 = Vec3::new(0.0, 0.0, -3.0);

#[derive(Debug, Deserialize)]
struct SceneFile {
    meshes: Vec<MeshDefinition>,
}

#[derive(Debug, Deserialize)]
struct MeshDefinition {
    name: String,
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    #[serde(default)]
    transform: Transform,
}

/// Load a JSON scene description from disk.
pub fn load_scene(path: &Path) -> Result<Scene> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene {}", path.display()))?;
    scene_from_str(&contents).with_context(|| format!("invalid scene {}", path.display()))
}

pub fn scene_from_str(input: &str) -> Result<Scene> {
    let file: SceneFile = serde_json::from_str(input)?;
    if file.meshes.is_empty() {
        anyhow::bail!("scene contains no meshes");
    }

    let mut scene = Scene::default();
    for def in file.meshes {
        let mesh = TriangleMesh::new(def.vertices, def.indices)
            .with_context(|| format!("mesh {:?}", def.name))?;
        tracing::debug!(
            name = %def.name,
            triangles = mesh.triangle_count(),
            "scene mesh loaded"
        );
        scene.insert(MeshInstance::new(def.name, mesh, def.transform.matrix()));
    }
    Ok(scene)
}

/// A single unit cube three units in front of the origin, looking down -Z.
pub fn default_scene() -> Scene {
    let transform = Transform::from_translation(DEFAULT_CUBE_POSITION);
    Scene::new([MeshInstance::new(
        "cube",
        holosnap_testkit::unit_cube(),
        transform.matrix(),
    )])
}
