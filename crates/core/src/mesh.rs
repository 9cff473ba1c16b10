//! Indexed triangle meshes and their world placement.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::{GeometryError, Triangle};

/// Vertex buffer plus a triangle-list index buffer, in local space.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

impl TriangleMesh {
    /// Validate and wrap raw buffers.
    ///
    /// Every three consecutive indices form one triangle.
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, GeometryError> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::IndexCount(indices.len()));
        }
        if let Some(bad) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(GeometryError::NonFiniteVertex(bad));
        }
        for (position, &index) in indices.iter().enumerate() {
            if index as usize >= vertices.len() {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    position,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, indices })
    }

    /// Local-space vertex buffer.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Index buffer.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Local-space triangle at `index`, if it exists.
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        let base = index.checked_mul(3)?;
        let corners = self.indices.get(base..base.checked_add(3)?)?;
        Some(Triangle::new(
            self.vertices[corners[0] as usize],
            self.vertices[corners[1] as usize],
            self.vertices[corners[2] as usize],
        ))
    }

    /// Iterate every local-space triangle in buffer order.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(move |c| {
            Triangle::new(
                self.vertices[c[0] as usize],
                self.vertices[c[1] as usize],
                self.vertices[c[2] as usize],
            )
        })
    }
}

/// Translation, rotation and scale as authored in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// World position.
    pub translation: Vec3,
    /// Euler angles in degrees, applied in Y, X, Z order.
    pub rotation_degrees: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, rotation or scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation_degrees: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Pure translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Local-to-world matrix.
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.rotation_degrees.y.to_radians(),
            self.rotation_degrees.x.to_radians(),
            self.rotation_degrees.z.to_radians(),
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

/// A mesh placed in the world.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    /// Label used in logs.
    pub name: String,
    /// Local-space geometry.
    pub mesh: TriangleMesh,
    /// Local-to-world matrix.
    pub transform: Mat4,
}

impl MeshInstance {
    /// Place `mesh` in the world with `transform`.
    pub fn new(name: impl Into<String>, mesh: TriangleMesh, transform: Mat4) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform,
        }
    }

    /// World-space triangle at `index`.
    pub fn world_triangle(&self, index: usize) -> Option<Triangle> {
        self.mesh
            .triangle(index)
            .map(|tri| tri.transformed(&self.transform))
    }

    /// All triangles transformed into world space.
    pub fn world_triangles(&self) -> Vec<Triangle> {
        self.mesh
            .triangles()
            .map(|tri| tri.transformed(&self.transform))
            .collect()
    }
}
