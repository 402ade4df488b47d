//! Mesh Data
//!
//! Parallel-array triangle mesh (positions, normals, indices) as consumed and
//! produced by the splitter, plus an interleaved `Vertex` for GPU upload.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use thiserror::Error;

// ============================================================================
// GPU VERTEX TYPE
// ============================================================================

/// Interleaved vertex: position + normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

static_assertions::assert_eq_size!(Vertex, [u8; 24]);

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Malformed mesh input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("position count {positions} does not match normal count {normals}")]
    MismatchedNormals { positions: usize, normals: usize },
    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

// ============================================================================
// MESH DATA
// ============================================================================

/// Triangle mesh stored as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Check the parallel arrays and index buffer for consistency.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.len() != self.normals.len() {
            return Err(MeshError::MismatchedNormals {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(self.indices.len()));
        }
        let vertex_count = self.positions.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange { index, vertex_count });
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate triangles as `[a, b, c]` index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Interleave positions and normals for upload.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| Vertex::new(*p, *n))
            .collect()
    }

    /// Axis-aligned cube with flat-shaded faces (24 vertices, 12 triangles).
    ///
    /// Faces wind counter-clockwise when viewed from outside.
    pub fn cube(center: Vec3, half_extent: f32) -> Self {
        let h = half_extent;
        // (normal, four corners counter-clockwise seen from outside)
        let faces: [(Vec3, [Vec3; 4]); 6] = [
            (Vec3::X, [Vec3::new(h, -h, h), Vec3::new(h, -h, -h), Vec3::new(h, h, -h), Vec3::new(h, h, h)]),
            (Vec3::NEG_X, [Vec3::new(-h, -h, -h), Vec3::new(-h, -h, h), Vec3::new(-h, h, h), Vec3::new(-h, h, -h)]),
            (Vec3::Y, [Vec3::new(-h, h, h), Vec3::new(h, h, h), Vec3::new(h, h, -h), Vec3::new(-h, h, -h)]),
            (Vec3::NEG_Y, [Vec3::new(-h, -h, -h), Vec3::new(h, -h, -h), Vec3::new(h, -h, h), Vec3::new(-h, -h, h)]),
            (Vec3::Z, [Vec3::new(-h, -h, h), Vec3::new(h, -h, h), Vec3::new(h, h, h), Vec3::new(-h, h, h)]),
            (Vec3::NEG_Z, [Vec3::new(h, -h, -h), Vec3::new(-h, -h, -h), Vec3::new(-h, h, -h), Vec3::new(h, h, -h)]),
        ];

        let mut mesh = Self::default();
        for (normal, corners) in faces {
            let base = mesh.positions.len() as u32;
            for corner in corners {
                mesh.positions.push(center + corner);
                mesh.normals.push(normal);
            }
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// Unit cube centered at the origin.
    pub fn unit_cube() -> Self {
        Self::cube(Vec3::ZERO, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cube_is_valid() {
        let cube = MeshData::unit_cube();
        assert_eq!(cube.validate(), Ok(()));
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_cube_winding_matches_normals() {
        let cube = MeshData::unit_cube();
        for [a, b, c] in cube.triangles() {
            let (pa, pb, pc) = (
                cube.positions[a as usize],
                cube.positions[b as usize],
                cube.positions[c as usize],
            );
            let face_normal = (pb - pa).cross(pc - pa);
            assert!(face_normal.dot(cube.normals[a as usize]) > 0.0);
        }
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let mut mesh = MeshData::unit_cube();
        mesh.normals.pop();
        assert_eq!(
            mesh.validate(),
            Err(MeshError::MismatchedNormals { positions: 24, normals: 23 })
        );

        let mut mesh = MeshData::unit_cube();
        mesh.indices.push(0);
        assert_eq!(mesh.validate(), Err(MeshError::PartialTriangle(37)));

        let mut mesh = MeshData::unit_cube();
        mesh.indices[5] = 99;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange { index: 99, vertex_count: 24 })
        );
    }

    #[test]
    fn test_bounds() {
        let cube = MeshData::cube(Vec3::new(1.0, 2.0, 3.0), 1.0);
        let (min, max) = cube.bounds().unwrap();
        assert_eq!(min, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(max, Vec3::new(2.0, 3.0, 4.0));
        assert!(MeshData::default().bounds().is_none());
    }

    #[test]
    fn test_interleaved_bytes() {
        let cube = MeshData::unit_cube();
        let vertices = cube.interleaved();
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 24 * 24);
        assert_eq!(vertices[0].normal, [1.0, 0.0, 0.0]);
    }
}
