//! Mesh Module
//!
//! Plane cutting for convex triangle meshes.
//!
//! A mesh is cut into two fragments (above and below the plane). Triangles that
//! straddle the plane are clipped, and the open cut on each fragment is closed
//! with a cap polygon built from the intersection points.
//!
//! # Submodules
//!
//! - [`plane`] - Cutting plane (normal + distance) and side classification
//! - [`data`] - Parallel-array mesh data and the interleaved GPU vertex
//! - [`builder`] - Fragment builder with convex fan triangulation
//! - [`splitter`] - The split itself
//! - [`math`] - Small numeric helpers (centroid, regression slope)

pub mod builder;
pub mod data;
pub mod math;
pub mod plane;
pub mod splitter;

pub use builder::MeshBuilder;
pub use data::{MeshData, MeshError, Vertex};
pub use math::{centroid, linear_regression_slope};
pub use plane::Plane;
pub use splitter::{SplitMesh, edge_plane_intersection, split_into_builders, split_mesh};
