//! Mesh Tests - Plane Splitting
//!
//! End-to-end tests for cutting convex meshes: fragment counts, cap
//! orientation and side classification.

use glam::Vec3;
use playground_engine::mesh::{MeshData, Plane, Vertex, split_mesh};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const EPS: f32 = 1e-4;

/// Triangles of `mesh` whose three corners all lie on `plane`.
fn cap_triangles(mesh: &MeshData, plane: &Plane) -> Vec<[Vec3; 3]> {
    mesh.triangles()
        .map(|t| t.map(|i| mesh.positions[i as usize]))
        .filter(|corners| corners.iter().all(|p| plane.signed_distance(*p).abs() < EPS))
        .collect()
}

fn triangle_area_along(corners: &[Vec3; 3], normal: Vec3) -> f32 {
    let [a, b, c] = *corners;
    (b - a).cross(c - a).dot(normal) * 0.5
}

// ============================================================================
// Cube split
// ============================================================================

#[test]
fn test_cube_split_triangle_counts() {
    let cube = MeshData::unit_cube();
    let plane = Plane::from_normal_and_point(Vec3::Y, Vec3::new(0.0, 0.1, 0.0));
    let split = split_mesh(&cube, &plane).unwrap();

    // Top (or bottom) face: 2, four side faces: 3 each, cap: 16 points -> 14
    assert_eq!(split.above.triangle_count(), 28);
    assert_eq!(split.below.triangle_count(), 28);
    assert_eq!(split.above.validate(), Ok(()));
    assert_eq!(split.below.validate(), Ok(()));
}

#[test]
fn test_cube_split_caps_face_outward() {
    let cube = MeshData::unit_cube();
    let plane = Plane::from_normal_and_point(Vec3::Y, Vec3::new(0.0, 0.1, 0.0));
    let split = split_mesh(&cube, &plane).unwrap();

    // The above fragment is closed from below, the below fragment from above
    for (fragment, outward) in [(&split.above, Vec3::NEG_Y), (&split.below, Vec3::Y)] {
        let caps = cap_triangles(fragment, &plane);
        assert_eq!(caps.len(), 14);

        let mut area = 0.0;
        for corners in &caps {
            let signed = triangle_area_along(corners, outward);
            assert!(signed >= -EPS, "cap triangle wound inward: {corners:?}");
            area += signed;
        }
        // Cross-section of a unit cube
        assert!((area - 1.0).abs() < 1e-3, "cap area {area}");
    }
}

#[test]
fn test_cube_split_vertices_stay_on_their_side() {
    let cube = MeshData::unit_cube();
    let plane = Plane::from_normal_and_point(Vec3::new(1.0, 2.0, -0.5), Vec3::new(0.1, 0.0, 0.05));
    let split = split_mesh(&cube, &plane).unwrap();

    assert!(split.above.positions.iter().all(|p| plane.signed_distance(*p) >= -EPS));
    assert!(split.below.positions.iter().all(|p| plane.signed_distance(*p) <= EPS));
}

#[test]
fn test_plane_missing_mesh_copies_it() {
    let cube = MeshData::unit_cube();
    let plane = Plane::from_normal_and_point(Vec3::Y, Vec3::new(0.0, -3.0, 0.0));
    let split = split_mesh(&cube, &plane).unwrap();

    assert_eq!(split.above.triangle_count(), cube.triangle_count());
    assert_eq!(split.above.vertex_count(), 36);
    assert!(split.below.is_empty());
}

#[test]
fn test_flipped_plane_swaps_fragments() {
    let cube = MeshData::cube(Vec3::new(1.0, 0.0, 0.0), 1.0);
    let plane = Plane::from_normal_and_point(Vec3::X, Vec3::new(1.3, 0.0, 0.0));
    let split = split_mesh(&cube, &plane).unwrap();
    let flipped = split_mesh(&cube, &plane.flipped()).unwrap();

    assert_eq!(split.above.triangle_count(), flipped.below.triangle_count());
    assert_eq!(split.below.triangle_count(), flipped.above.triangle_count());
}

#[test]
fn test_interleaved_vertex_bytes() {
    let cube = MeshData::unit_cube();
    let vertices: Vec<Vertex> = cube.interleaved();
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    assert_eq!(bytes.len(), 24 * 24);
}

// ============================================================================
// Properties
// ============================================================================

fn plane_through_cube() -> impl Strategy<Value = Plane> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0, -0.4f32..0.4)
        .prop_filter("normal must not vanish", |(x, y, z, _)| Vec3::new(*x, *y, *z).length() > 0.1)
        .prop_map(|(x, y, z, offset)| {
            let normal = Vec3::new(x, y, z).normalize();
            Plane::from_normal_and_point(normal, normal * offset)
        })
}

proptest! {
    #[test]
    fn prop_split_never_loses_triangles(plane in plane_through_cube()) {
        let cube = MeshData::unit_cube();
        let split = split_mesh(&cube, &plane).unwrap();

        prop_assert!(split.above.triangle_count() + split.below.triangle_count() >= cube.triangle_count());
        prop_assert_eq!(split.above.validate(), Ok(()));
        prop_assert_eq!(split.below.validate(), Ok(()));
        prop_assert!(split.above.positions.iter().all(|p| plane.signed_distance(*p) >= -EPS));
        prop_assert!(split.below.positions.iter().all(|p| plane.signed_distance(*p) <= EPS));
    }
}
