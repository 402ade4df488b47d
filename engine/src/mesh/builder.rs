//! Fragment Builder
//!
//! Accumulates the geometry of one split fragment. Vertices are first collected
//! into one of two transient polygons:
//!
//! - **surface**: geometry carried over from the source mesh (one polygon per
//!   source triangle)
//! - **intersection**: the cap that closes the cut
//!
//! Committing a polygon triangulates it into the permanent vertex/index arrays
//! and clears it. Every committed polygon must be planar and convex.

use glam::Vec3;
use log::{debug, warn};

use super::data::MeshData;
use super::math::centroid;

#[derive(Debug, Clone, Copy)]
struct PolygonVertex {
    position: Vec3,
    normal: Vec3,
}

/// Builder for a single mesh fragment.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,

    surface: Vec<PolygonVertex>,
    intersection: Vec<PolygonVertex>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex to the current surface polygon.
    ///
    /// The first vertex's normal decides the winding of the polygon.
    pub fn insert_surface_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.surface.push(PolygonVertex { position, normal });
    }

    /// Add a vertex to the cut cap polygon.
    pub fn insert_intersection_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.intersection.push(PolygonVertex { position, normal });
    }

    /// Number of vertices waiting in the surface polygon.
    pub fn pending_surface_len(&self) -> usize {
        self.surface.len()
    }

    /// Number of vertices waiting in the cap polygon.
    pub fn pending_intersection_len(&self) -> usize {
        self.intersection.len()
    }

    /// Triangulate the pending surface polygon and start a new one.
    ///
    /// Returns the number of triangles emitted.
    pub fn commit_surface(&mut self) -> usize {
        let polygon = std::mem::take(&mut self.surface);
        self.commit_polygon(polygon)
    }

    /// Triangulate the pending cap polygon and start a new one.
    ///
    /// Returns the number of triangles emitted.
    pub fn commit_intersection(&mut self) -> usize {
        let polygon = std::mem::take(&mut self.intersection);
        self.commit_polygon(polygon)
    }

    /// Committed vertex count.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Committed triangle count.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Move every committed vertex so the fragment's centroid sits at the
    /// origin. Returns the centroid that was subtracted.
    pub fn offset_to_centroid(&mut self) -> Vec3 {
        let center = centroid(self.positions.iter().copied());
        for p in &mut self.positions {
            *p -= center;
        }
        center
    }

    /// Snapshot of the committed geometry. Pending polygons are not included.
    pub fn cook(&self) -> MeshData {
        MeshData::new(self.positions.clone(), self.normals.clone(), self.indices.clone())
    }

    /// Consume the builder, returning the committed geometry.
    pub fn into_mesh(self) -> MeshData {
        MeshData::new(self.positions, self.normals, self.indices)
    }

    /// Sort a convex polygon around its centroid and emit a triangle fan.
    fn commit_polygon(&mut self, mut polygon: Vec<PolygonVertex>) -> usize {
        if polygon.is_empty() {
            return 0;
        }
        if polygon.len() < 3 {
            warn!("Discarding degenerate polygon with {} vertices", polygon.len());
            return 0;
        }

        let winding_normal = polygon[0].normal.try_normalize().unwrap_or(Vec3::Y);
        let center = centroid(polygon.iter().map(|v| v.position));

        // In-plane basis around the winding normal
        let reference = polygon
            .iter()
            .map(|v| reject(v.position - center, winding_normal))
            .find(|d| d.length_squared() > f32::EPSILON)
            .map(Vec3::normalize)
            .unwrap_or_else(|| winding_normal.any_orthonormal_vector());
        let binormal = winding_normal.cross(reference);

        polygon.sort_by(|a, b| {
            let angle_a = signed_angle(a.position - center, reference, binormal);
            let angle_b = signed_angle(b.position - center, reference, binormal);
            angle_a.total_cmp(&angle_b)
        });

        let base = self.positions.len() as u32;
        let triangles = polygon.len() - 2;
        for i in 0..triangles as u32 {
            self.indices.extend_from_slice(&[base, base + i + 1, base + i + 2]);
        }

        self.positions.extend(polygon.iter().map(|v| v.position));
        self.normals.extend(polygon.iter().map(|v| v.normal));

        debug!("Committed polygon: {} vertices, {} triangles", polygon.len(), triangles);
        triangles
    }
}

/// Component of `v` perpendicular to `normal`.
fn reject(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}

/// Angle of `offset` in the plane spanned by `reference` and `binormal`,
/// in `(-PI, PI]`, increasing counter-clockwise about the winding normal.
fn signed_angle(offset: Vec3, reference: Vec3, binormal: Vec3) -> f32 {
    offset.dot(binormal).atan2(offset.dot(reference))
}
