//! Cutting Plane
//!
//! A plane stored as a unit normal and a signed distance from the origin, so
//! that `dot(normal, p) + distance` is the signed distance of `p`.
//!
//! Points with a signed distance `>= 0` are "above". A point lying exactly on
//! the plane is therefore above.

use glam::{Affine3A, Vec3, Vec3A};
use serde::{Deserialize, Serialize};

/// Infinite plane used to cut meshes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal pointing to the "above" half-space
    pub normal: Vec3,
    /// Signed distance term (`dot(normal, p) + distance == 0` on the plane)
    pub distance: f32,
}

impl Plane {
    /// Create a plane from a normal and distance. The normal is normalized.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        let len = normal.length();
        Self {
            normal: normal / len,
            distance: distance / len,
        }
    }

    /// Create a plane through `point` facing `normal`.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Create a plane through three points.
    ///
    /// The normal is `(b - a) x (c - a)`, normalized.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self::from_normal_and_point((b - a).cross(c - a), a)
    }

    /// Same plane, facing the other way.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    /// Signed distance from the plane (positive above).
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Whether `point` is on the above side (on-plane counts as above).
    #[inline]
    pub fn is_above(&self, point: Vec3) -> bool {
        self.signed_distance(point) >= 0.0
    }

    /// Distance along a ray to the plane.
    ///
    /// Returns `None` if the ray is parallel to the plane. The distance may be
    /// negative when the plane is behind the origin.
    pub fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let denom = direction.dot(self.normal);
        if denom == 0.0 {
            return None;
        }
        Some(-self.signed_distance(origin) / denom)
    }

    /// Express a world-space plane in the local space of an object whose
    /// local-to-world transform is `object_to_world`.
    ///
    /// Substituting `p_world = M * p_local + t` gives the local plane
    /// `(M^T n) . p_local + (n . t + d)`, which also holds for non-uniform scale.
    pub fn transformed_into(&self, object_to_world: &Affine3A) -> Self {
        let normal = Vec3::from(object_to_world.matrix3.transpose() * Vec3A::from(self.normal));
        let distance = self.normal.dot(Vec3::from(object_to_world.translation)) + self.distance;
        Self::new(normal, distance)
    }
}
