//! Mesh Splitter
//!
//! Cuts a convex triangle mesh by a plane into an "above" and a "below"
//! fragment.
//!
//! For every source triangle there are three cases:
//! - entirely above: copied into the above fragment as-is
//! - entirely below: copied into the below fragment as-is
//! - straddling: each crossing edge yields one new vertex on the plane, shared
//!   by both fragments, so one side receives a triangle and the other a quad
//!
//! Crossing points are also collected into each fragment's cap polygon, which is
//! committed once after all triangles. The cap is only correct for meshes whose
//! cross-section is convex.

use glam::Vec3;
use log::info;

use super::builder::MeshBuilder;
use super::data::{MeshData, MeshError};
use super::plane::Plane;

/// The two fragments of a split.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitMesh {
    /// Fragment on the side the plane normal points to
    pub above: MeshData,
    /// Fragment on the other side
    pub below: MeshData,
}

/// Point where the edge `point_above -> point_below` crosses `plane`.
///
/// The edge must straddle the plane (`point_above` on or above it,
/// `point_below` strictly below); otherwise the result is meaningless.
pub fn edge_plane_intersection(plane: &Plane, point_above: Vec3, point_below: Vec3) -> Vec3 {
    point_above.lerp(point_below, edge_parameter(plane, point_above, point_below))
}

/// Parameter `t` along `point_above -> point_below` at the plane.
fn edge_parameter(plane: &Plane, point_above: Vec3, point_below: Vec3) -> f32 {
    let d_above = plane.signed_distance(point_above);
    let d_below = plane.signed_distance(point_below);
    d_above / (d_above - d_below)
}

/// Split `mesh` by `plane`.
///
/// Fails only on malformed input (see [`MeshData::validate`]).
pub fn split_mesh(mesh: &MeshData, plane: &Plane) -> Result<SplitMesh, MeshError> {
    let (above, below) = split_into_builders(mesh, plane)?;
    Ok(SplitMesh {
        above: above.into_mesh(),
        below: below.into_mesh(),
    })
}

/// Split `mesh` by `plane`, returning the fully committed `(above, below)`
/// builders so callers can post-process them (e.g. recenter) before cooking.
pub fn split_into_builders(mesh: &MeshData, plane: &Plane) -> Result<(MeshBuilder, MeshBuilder), MeshError> {
    mesh.validate()?;

    let mut above = MeshBuilder::new();
    let mut below = MeshBuilder::new();

    for triangle in mesh.triangles() {
        let corners = triangle.map(|i| (mesh.positions[i as usize], mesh.normals[i as usize]));
        let is_above = corners.map(|(position, _)| plane.is_above(position));

        // Bit (a + b) marks edge a-b as visited; 0+1, 0+2 and 1+2 are distinct
        let mut checked_edges = 0u8;

        for a in 0..3 {
            let (position_a, normal_a) = corners[a];
            let side = if is_above[a] { &mut above } else { &mut below };
            side.insert_surface_vertex(position_a, normal_a);

            for b in 0..3 {
                let edge_bit = 1u8 << (a + b);
                if a == b || checked_edges & edge_bit != 0 {
                    continue;
                }
                checked_edges |= edge_bit;

                if is_above[a] == is_above[b] {
                    continue;
                }

                let ((p_above, n_above), (p_below, n_below)) = if is_above[a] {
                    (corners[a], corners[b])
                } else {
                    (corners[b], corners[a])
                };
                let t = edge_parameter(plane, p_above, p_below);
                let point = p_above.lerp(p_below, t);
                let normal = n_above.lerp(n_below, t).try_normalize().unwrap_or(normal_a);

                above.insert_surface_vertex(point, normal);
                below.insert_surface_vertex(point, normal);

                above.insert_intersection_vertex(point, -plane.normal);
                below.insert_intersection_vertex(point, plane.normal);
            }
        }

        above.commit_surface();
        below.commit_surface();
    }

    above.commit_intersection();
    below.commit_intersection();

    info!(
        "Split mesh of {} triangles into {} above / {} below",
        mesh.triangle_count(),
        above.triangle_count(),
        below.triangle_count()
    );

    Ok((above, below))
}
