//! Target Racetrack
//!
//! A closed loop of waypoints that a target travels along. Progress is kept
//! as the current segment plus an offset from its start, so advancing by any
//! distance (forward or backward) wraps around the loop.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RacetrackError {
    #[error("a racetrack needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Racetrack {
    points: Vec<Vec3>,
    /// Start waypoint of the current segment
    from_idx: usize,
    /// Distance travelled from the start of the current segment
    offset: f32,
}

impl Racetrack {
    pub fn new(points: Vec<Vec3>) -> Result<Self, RacetrackError> {
        if points.len() < 2 {
            return Err(RacetrackError::TooFewPoints(points.len()));
        }
        Ok(Self {
            points,
            from_idx: 0,
            offset: 0.0,
        })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Same waypoints, progress back at the first point.
    pub fn restarted(&self) -> Self {
        Self {
            points: self.points.clone(),
            from_idx: 0,
            offset: 0.0,
        }
    }

    /// Index of the waypoint the current segment starts at.
    pub fn segment(&self) -> usize {
        self.from_idx
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    fn to_idx(&self) -> usize {
        (self.from_idx + 1) % self.points.len()
    }

    fn segment_length(&self) -> f32 {
        self.points[self.from_idx].distance(self.points[self.to_idx()])
    }

    pub fn total_length(&self) -> f32 {
        (0..self.points.len())
            .map(|i| self.points[i].distance(self.points[(i + 1) % self.points.len()]))
            .sum()
    }

    /// Current point on the track.
    pub fn position(&self) -> Vec3 {
        let length = self.segment_length();
        let t = if length > 0.0 {
            (self.offset / length).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.points[self.from_idx].lerp(self.points[self.to_idx()], t)
    }

    /// Move along the track. Negative distances travel backward.
    pub fn advance(&mut self, distance: f32) {
        // A loop of coincident points has nowhere to go
        if !distance.is_finite() || self.total_length() <= 0.0 {
            return;
        }
        self.offset += distance;

        if self.offset < 0.0 {
            while self.offset < 0.0 {
                self.from_idx = self.from_idx.checked_sub(1).unwrap_or(self.points.len() - 1);
                self.offset += self.segment_length();
            }
            return;
        }

        while self.offset > self.segment_length() {
            self.offset -= self.segment_length();
            self.from_idx = self.to_idx();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    /// Unit square in the XZ plane, 4 segments of length 1.
    fn square() -> Racetrack {
        Racetrack::new(vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ])
        .unwrap()
    }

    fn assert_near(a: Vec3, b: Vec3) {
        assert!(a.distance(b) < EPS, "{a:?} != {b:?}");
    }

    #[test]
    fn test_needs_two_points() {
        assert_eq!(Racetrack::new(vec![Vec3::ONE]), Err(RacetrackError::TooFewPoints(1)));
    }

    #[test]
    fn test_position_lerps_along_segment() {
        let mut track = square();
        track.advance(0.25);
        assert_near(track.position(), Vec3::new(0.25, 0.0, 0.0));
        assert_eq!(track.segment(), 0);
    }

    #[test]
    fn test_forward_overrun_skips_segments() {
        let mut track = square();
        track.advance(2.5);
        assert_eq!(track.segment(), 2);
        assert_near(track.position(), Vec3::new(0.5, 0.0, 1.0));
    }

    #[test]
    fn test_forward_wraps_to_first_segment() {
        let mut track = square();
        track.advance(4.25);
        assert_eq!(track.segment(), 0);
        assert_near(track.position(), Vec3::new(0.25, 0.0, 0.0));
    }

    #[test]
    fn test_backward_wraps_to_last_segment() {
        let mut track = square();
        track.advance(-0.25);
        assert_eq!(track.segment(), 3);
        // Last segment runs (0,0,1) -> (0,0,0)
        assert_near(track.position(), Vec3::new(0.0, 0.0, 0.25));
    }

    #[test]
    fn test_backward_overrun_skips_segments() {
        let mut track = square();
        track.advance(0.5);
        track.advance(-2.0);
        assert_eq!(track.segment(), 2);
        assert_near(track.position(), Vec3::new(0.5, 0.0, 1.0));
    }

    #[test]
    fn test_segment_end_is_not_an_overrun() {
        let mut track = square();
        track.advance(1.0);
        assert_eq!(track.segment(), 0);
        assert_near(track.position(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_restarted_discards_progress() {
        let mut track = square();
        track.advance(1.5);
        let fresh = track.restarted();
        assert_eq!(fresh.segment(), 0);
        assert_near(fresh.position(), Vec3::ZERO);
    }

    #[test]
    fn test_degenerate_track_stays_put() {
        let mut track = Racetrack::new(vec![Vec3::ONE, Vec3::ONE]).unwrap();
        track.advance(3.0);
        track.advance(-3.0);
        assert_near(track.position(), Vec3::ONE);
    }
}
