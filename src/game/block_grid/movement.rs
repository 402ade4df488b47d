//! Piece Movement
//!
//! Views move the falling piece continuously in world space and ask the model
//! whether each translation is allowed. The model snaps the candidate
//! position to the grid, rounding toward the direction of travel, so a
//! collision is detected as soon as the piece's leading edge crosses into an
//! occupied cell.
//!
//! A blocked downward move lands the piece: it is merged into the floor,
//! complete cols are cleared and the next piece spawns.

use glam::Vec3;
use log::info;

use crate::world::{GridPosition, Rounding};

use super::error::GridError;
use super::events::{EventQueue, GridEvent, GridKind};
use super::field::GameFieldState;
use super::partial_grid::RotateDirection;

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Piece moved to a new cell. The view applies the translation.
    Moved,
    /// Still in the same cell. The view applies the translation.
    Unchanged,
    /// Sideways or upward move into an obstacle, or any move after the
    /// field topped out. The view rejects it.
    Blocked,
    /// Downward move into an obstacle: the piece was placed and replaced.
    Landed {
        /// Number of cols cleared by this landing
        cleared_rows: usize,
        /// The new piece already collides; no further moves are possible
        topped_out: bool,
    },
}

impl MoveOutcome {
    /// Whether the view should apply the translation it asked for.
    pub fn accepted(&self) -> bool {
        matches!(self, MoveOutcome::Moved | MoveOutcome::Unchanged)
    }
}

impl GameFieldState {
    /// Try to move the piece currently drawn at `world_position` by
    /// `translation`.
    pub fn attempt_move(
        &mut self,
        world_position: Vec3,
        translation: Vec3,
        events: &mut EventQueue,
    ) -> Result<MoveOutcome, GridError> {
        let row_rounding = Rounding::for_travel(translation.x, Rounding::Ceil);
        // World Y points up while col grows downward
        let col_rounding = Rounding::for_travel(-translation.y, Rounding::Ceil);

        let target = self
            .transform()
            .world_to_grid_with(world_position + translation, row_rounding, col_rounding);
        self.move_detached_to(target, translation.y < 0.0, events)
    }

    /// Move the piece by whole cells. Positive `col` is downward.
    pub fn attempt_step(&mut self, delta: GridPosition, events: &mut EventQueue) -> Result<MoveOutcome, GridError> {
        let target = self.detached.origin() + delta;
        self.move_detached_to(target, delta.col > 0, events)
    }

    /// Step the piece down until it lands.
    pub fn hard_drop(&mut self, events: &mut EventQueue) -> Result<MoveOutcome, GridError> {
        // A piece without cells never collides and would fall forever
        if self.detached.is_empty() {
            return Ok(MoveOutcome::Unchanged);
        }
        loop {
            let outcome = self.attempt_step(GridPosition::new(0, 1), events)?;
            if !outcome.accepted() {
                return Ok(outcome);
            }
        }
    }

    /// Turn the piece a quarter turn in place. Returns false (and leaves the
    /// piece untouched) when the rotated piece would collide.
    pub fn attempt_rotate(&mut self, direction: RotateDirection, events: &mut EventQueue) -> Result<bool, GridError> {
        let rotated = self.detached.rotated(direction);
        let previous = std::mem::replace(&mut self.detached, rotated);

        if self.test_grids_collision()? {
            self.detached = previous;
            return Ok(false);
        }
        events.push(GridEvent::ReplaceGrid(GridKind::Detached));
        Ok(true)
    }

    fn move_detached_to(
        &mut self,
        target: GridPosition,
        downward: bool,
        events: &mut EventQueue,
    ) -> Result<MoveOutcome, GridError> {
        // After a top-out the spawned piece overlaps the floor; landing it
        // again would merge over occupied cells
        if self.test_grids_collision()? {
            return Ok(MoveOutcome::Blocked);
        }

        let previous = self.detached.origin();
        self.detached.rebase(target);
        if target == previous {
            return Ok(MoveOutcome::Unchanged);
        }
        if !self.test_grids_collision()? {
            return Ok(MoveOutcome::Moved);
        }

        self.detached.rebase(previous);
        if !downward {
            return Ok(MoveOutcome::Blocked);
        }

        self.merge_detached_grid()?;
        let cleared_rows = self.remove_completed_rows();
        if cleared_rows > 0 {
            events.push(GridEvent::ReplaceGrid(GridKind::Attached));
        } else {
            events.push(GridEvent::MergeGrid(GridKind::Attached));
        }

        self.spawn_new_detached_grid();
        events.push(GridEvent::ReplaceGrid(GridKind::Detached));

        let topped_out = self.test_grids_collision()?;
        info!(
            "Piece landed at {}, cleared {} col(s){}",
            previous,
            cleared_rows,
            if topped_out { ", field topped out" } else { "" }
        );
        Ok(MoveOutcome::Landed {
            cleared_rows,
            topped_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::block_grid::FloorMode;
    use crate::game::spawner::SpecificFiguresSpawner;
    use crate::world::GridTransform;

    fn started_field(figures: &[&str]) -> (GameFieldState, EventQueue) {
        let spawner = SpecificFiguresSpawner::new(figures.iter().map(|f| f.to_string()).collect());
        let mut field = GameFieldState::new(GridTransform::default(), FloorMode::Empty, Box::new(spawner));
        let mut events = EventQueue::new();
        field.start_new_game(&mut events);
        events.drain().for_each(drop);
        (field, events)
    }

    #[test]
    fn test_move_rounds_toward_travel() {
        let (mut field, mut events) = started_field(&["xx /xx /   "]);
        let world = field.transform().grid_to_world(field.detached_grid().origin());

        // A fifth of a cell to the right already enters the next cell
        let outcome = field.attempt_move(world, Vec3::new(0.2, 0.0, 0.0), &mut events).unwrap();
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(field.detached_grid().origin(), GridPosition::new(4, 0));

        // Zero translation rounds to nearest: same cell
        let world = field.transform().grid_to_world(field.detached_grid().origin());
        let outcome = field.attempt_move(world, Vec3::ZERO, &mut events).unwrap();
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert!(events.is_empty());
    }

    #[test]
    fn test_sideways_into_wall_is_blocked() {
        let (mut field, mut events) = started_field(&["xx /xx /   "]);
        for _ in 0..3 {
            assert_eq!(
                field.attempt_step(GridPosition::new(-1, 0), &mut events).unwrap(),
                MoveOutcome::Moved
            );
        }
        assert_eq!(
            field.attempt_step(GridPosition::new(-1, 0), &mut events).unwrap(),
            MoveOutcome::Blocked
        );
        assert_eq!(field.detached_grid().origin(), GridPosition::new(0, 0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_landing_merges_and_respawns() {
        let (mut field, mut events) = started_field(&["xx /xx /   "]);
        let outcome = field.hard_drop(&mut events).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Landed {
                cleared_rows: 0,
                topped_out: false
            }
        );

        assert_eq!(field.placed_cell_count(), 4);
        assert!(field.attached_grid().is_position_occupied(GridPosition::new(3, 19)).unwrap());
        assert_eq!(field.detached_grid().origin(), GridPosition::new(3, 0));
        let drained: Vec<_> = events.drain().collect();
        assert_eq!(
            drained,
            vec![
                GridEvent::MergeGrid(GridKind::Attached),
                GridEvent::ReplaceGrid(GridKind::Detached),
            ]
        );
    }

    #[test]
    fn test_world_space_fall_lands_on_leading_edge() {
        let (mut field, mut events) = started_field(&["xx /xx /   "]);
        // Drop straight to rest just above the floor edge
        field.detached.rebase(GridPosition::new(3, 18));
        let world = field.transform().grid_to_world(GridPosition::new(3, 18));

        // Any downward nudge rounds up into col 19 and collides with the edge
        let outcome = field.attempt_move(world, Vec3::new(0.0, -0.05, 0.0), &mut events).unwrap();
        assert!(matches!(outcome, MoveOutcome::Landed { .. }));
        assert!(!outcome.accepted());
    }

    #[test]
    fn test_clearing_a_full_line() {
        // A flat bar three cells wide
        let (mut field, mut events) = started_field(&["   /   /xxx"]);
        let mut cleared = 0;
        for shift in [-3, 0, 3] {
            field.attempt_step(GridPosition::new(shift, 0), &mut events).unwrap();
            if let MoveOutcome::Landed { cleared_rows, .. } = field.hard_drop(&mut events).unwrap() {
                cleared += cleared_rows;
            }
        }
        assert_eq!(cleared, 0);
        assert_eq!(field.placed_cell_count(), 9);

        // Fill the last cell of the bottom line with a rotated bar standing upright
        field.attempt_rotate(RotateDirection::Clockwise, &mut events).unwrap();
        field.attempt_step(GridPosition::new(6, 0), &mut events).unwrap();
        let outcome = field.hard_drop(&mut events).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Landed {
                cleared_rows: 1,
                topped_out: false
            }
        );
        // Bottom line cleared; the upright bar's top two cells fell by one
        assert_eq!(field.placed_cell_count(), 2);
        assert!(events.drain().any(|e| e == GridEvent::ReplaceGrid(GridKind::Attached)));
    }

    #[test]
    fn test_rotation_rolls_back_on_collision() {
        let (mut field, mut events) = started_field(&["   /   /xxx"]);
        // Stand the bar up at local row 0, then slide it to the right wall
        // where turning it flat again would stick out of the field.
        field.detached.rebase(GridPosition::new(7, 0));
        assert!(field.attempt_rotate(RotateDirection::Clockwise, &mut events).unwrap());
        let origin = field.detached_grid().origin();
        field.detached.rebase(GridPosition::new(origin.row + 1, origin.col));
        assert!(!field.test_grids_collision().unwrap());
        assert!(!field.attempt_rotate(RotateDirection::CounterClockwise, &mut events).unwrap());
        assert_eq!(field.detached_grid().origin(), GridPosition::new(8, 0));
    }
}
