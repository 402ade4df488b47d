//! Target Cutting
//!
//! The slicing demo: one target at a time is shown, the player slashes it,
//! the target splits into two debris fragments pushed apart along the cut
//! normal, and the next target appears after a delay.
//!
//! - [`TargetCutter`] - target rotation, cutting and respawn timing
//! - [`SlashGesture`] - turns a dragged 2D stroke into a cutting plane

use glam::{Affine3A, Vec2, Vec3};
use log::{debug, info, warn};

use crate::game::config::CuttingConfig;
use crate::mesh::{MeshData, MeshError, Plane, linear_regression_slope, split_into_builders};
use crate::schedule::Scheduler;

// ============================================================================
// TARGETS AND DEBRIS
// ============================================================================

/// The object currently waiting to be cut.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Which template it was spawned from
    pub template_index: usize,
    /// Object-space geometry
    pub mesh: MeshData,
    /// Object to world
    pub transform: Affine3A,
}

/// One fragment of a cut target.
#[derive(Debug, Clone, PartialEq)]
pub struct Debris {
    /// Object-space geometry
    pub mesh: MeshData,
    /// Object to world
    pub transform: Affine3A,
    /// Push applied when the fragment is released (world space)
    pub force: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CutterTask {
    SpawnTarget,
}

// ============================================================================
// TARGET CUTTER
// ============================================================================

pub struct TargetCutter {
    templates: Vec<MeshData>,
    next_template: usize,
    placement: Affine3A,
    target: Option<Target>,
    scheduler: Scheduler<CutterTask>,
    config: CuttingConfig,
}

impl TargetCutter {
    /// Create the cutter and show the first target at `placement`.
    pub fn new(templates: Vec<MeshData>, placement: Affine3A, config: CuttingConfig) -> Self {
        let mut cutter = Self {
            templates,
            next_template: 0,
            placement,
            target: None,
            scheduler: Scheduler::new(),
            config,
        };
        cutter.spawn_target();
        cutter
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn config(&self) -> &CuttingConfig {
        &self.config
    }

    /// Show the next template, wrapping around.
    fn spawn_target(&mut self) {
        let Some(mesh) = self.templates.get(self.next_template) else {
            warn!("No target templates to spawn");
            return;
        };
        debug!("Spawning target template {}", self.next_template);
        self.target = Some(Target {
            template_index: self.next_template,
            mesh: mesh.clone(),
            transform: self.placement,
        });
        self.next_template = (self.next_template + 1) % self.templates.len();
    }

    /// Cut the current target with a world-space plane.
    ///
    /// Returns the `[above, below]` fragments, or `None` when there is no
    /// target to cut. The next target is scheduled after the spawn delay.
    pub fn cut(&mut self, world_plane: &Plane) -> Result<Option<[Debris; 2]>, MeshError> {
        let Some(target) = self.target.as_ref() else {
            debug!("Cut ignored: no target");
            return Ok(None);
        };

        let local_plane = world_plane.transformed_into(&target.transform);
        let (mut above, mut below) = split_into_builders(&target.mesh, &local_plane)?;

        let force = world_plane.normal * self.config.debris_force;
        let mut debris = [(&mut above, force), (&mut below, -force)].map(|(builder, force)| {
            let mut transform = target.transform;
            if self.config.recenter_debris {
                let center = builder.offset_to_centroid();
                transform = transform * Affine3A::from_translation(center);
            }
            Debris {
                mesh: builder.cook(),
                transform,
                force,
            }
        });
        // Fragments with no geometry (plane missed the target) carry no push
        for fragment in &mut debris {
            if fragment.mesh.is_empty() {
                fragment.force = Vec3::ZERO;
            }
        }

        info!(
            "Cut target {}: {} / {} triangles",
            target.template_index,
            debris[0].mesh.triangle_count(),
            debris[1].mesh.triangle_count()
        );

        self.target = None;
        self.scheduler.schedule(self.config.spawn_delay, CutterTask::SpawnTarget);
        Ok(Some(debris))
    }

    /// Advance time. Returns true when a new target appeared.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        let mut spawned = false;
        for task in self.scheduler.tick(delta_seconds) {
            match task {
                CutterTask::SpawnTarget => {
                    self.spawn_target();
                    spawned = true;
                }
            }
        }
        spawned
    }

    /// Drop pending spawns and show the next target right away.
    pub fn reset(&mut self) {
        self.scheduler.clear();
        self.spawn_target();
    }
}

// ============================================================================
// SLASH GESTURE
// ============================================================================

/// Collects the points of one drag and converts it to a cutting plane on
/// release.
#[derive(Debug, Clone, Default)]
pub struct SlashGesture {
    points: Vec<Vec2>,
    min_distance: f32,
}

impl SlashGesture {
    pub fn new(min_distance: f32) -> Self {
        Self {
            points: Vec::new(),
            min_distance,
        }
    }

    /// Record a point while the button is held.
    pub fn drag(&mut self, point: Vec2) {
        self.points.push(point);
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Finish the stroke. Returns a plane when the stroke was long enough.
    ///
    /// The plane contains the Z axis offset `(0, 0, 2)` and is tilted to the
    /// stroke's regression slope. A vertical stroke yields the YZ plane.
    pub fn release(&mut self) -> Option<Plane> {
        let points = std::mem::take(&mut self.points);
        let (first, last) = (points.first()?, points.last()?);
        if first.distance(*last) <= self.min_distance {
            debug!("Slash too short: {:.2}", first.distance(*last));
            return None;
        }

        let plane = match linear_regression_slope(&points) {
            Some(slope) => Plane::from_points(
                Vec3::new(-1.0, -slope, -1.0),
                Vec3::new(0.0, 0.0, 2.0),
                Vec3::new(1.0, slope, 1.0),
            ),
            None => Plane::from_normal_and_point(Vec3::X, Vec3::ZERO),
        };
        Some(plane)
    }
}
