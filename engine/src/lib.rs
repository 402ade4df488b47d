//! Playground Engine Library
//!
//! Engine-free cores of the playground demos: a convex mesh splitter used to
//! slice targets with a plane, and the falling-block grid model used by the
//! block game.
//!
//! # Modules
//!
//! - [`mesh`] - Mesh data, cutting planes, the fragment builder and the splitter
//! - [`world`] - Grid coordinates and the world/grid transform
//! - [`schedule`] - Deadline timers that replace frame-resumed coroutines
//! - [`game`] - Block grid model, spawners, persistence, game flow, racetrack targets and the target cutter
//!
//! # Example
//!
//! ```ignore
//! use playground_engine::mesh::{MeshData, Plane, split_mesh};
//! use glam::Vec3;
//!
//! let cube = MeshData::unit_cube();
//! let plane = Plane::from_normal_and_point(Vec3::Y, Vec3::ZERO);
//! let split = split_mesh(&cube, &plane)?;
//! println!("above: {} tris, below: {} tris", split.above.triangle_count(), split.below.triangle_count());
//! ```

pub mod mesh;
pub mod schedule;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types at crate level for convenience
pub use mesh::{MeshBuilder, MeshData, MeshError, Plane, SplitMesh, Vertex, split_mesh};
pub use schedule::{Scheduler, Timer};
pub use world::{Bounds, GridPosition, GridTransform, Rounding};
