//! Game Flow
//!
//! Session-level state machine for the timed cutting game: waiting for the
//! camera to track the play area, waiting for the player, playing, the three
//! pause states and the finished screen.
//!
//! Each transition drives the [`GameModel`] (start, pause, resume, restart).
//! `update(delta_seconds)` advances the play timer and finishes the game when
//! it runs out.
//!
//! The model also runs the hit targets: one per [`Racetrack`], moving along
//! it while the round is in progress. A committed hit scores a point and the
//! track gets a new target after [`HIT_RESPAWN_DELAY`] seconds of play.

use glam::Vec3;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::game::racetrack::Racetrack;
use crate::schedule::{Scheduler, Timer};

/// Default round length in seconds.
pub const DEFAULT_GAME_LENGTH: f32 = 60.0;

/// Seconds of play between a hit and the replacement target.
pub const HIT_RESPAWN_DELAY: f32 = 2.0;

/// Distance per second a target travels along its track. Negative runs the
/// loop backward.
pub const DEFAULT_TARGET_SPEED: f32 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlowState {
    #[default]
    WaitingForTracking,
    WaitingForUserToStart,
    InProgress,
    PausedByUser,
    PausedByTracking,
    PausedByUserAndTracking,
    Finished,
}

impl FlowState {
    pub fn is_paused(&self) -> bool {
        matches!(
            self,
            FlowState::PausedByUser | FlowState::PausedByTracking | FlowState::PausedByUserAndTracking
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowInput {
    TrackingStarted,
    TrackingStopped,
    StartPressed,
    PauseTogglePressed,
    RestartPressed,
    /// Play timer ran out
    TimeUp,
}

/// What a transition did to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEffect {
    Start,
    Pause,
    Resume,
    Restart,
}

// ============================================================================
// GAME MODEL
// ============================================================================

/// Score, play clock and hit targets of one round.
#[derive(Debug, Clone)]
pub struct GameModel {
    score: u32,
    timer: Timer,
    running: bool,
    tracks: Vec<Racetrack>,
    /// One slot per track; `None` while the track waits for a respawn
    targets: Vec<Option<Racetrack>>,
    respawns: Scheduler<usize>,
    target_speed: f32,
}

impl Default for GameModel {
    fn default() -> Self {
        Self::new(DEFAULT_GAME_LENGTH)
    }
}

impl GameModel {
    pub fn new(game_length: f32) -> Self {
        let mut timer = Timer::new(game_length);
        timer.pause();
        Self {
            score: 0,
            timer,
            running: false,
            tracks: Vec::new(),
            targets: Vec::new(),
            respawns: Scheduler::new(),
            target_speed: DEFAULT_TARGET_SPEED,
        }
    }

    /// Tracks used from the next start on.
    pub fn with_tracks(mut self, tracks: Vec<Racetrack>) -> Self {
        self.tracks = tracks;
        self
    }

    pub fn with_target_speed(mut self, speed: f32) -> Self {
        self.target_speed = speed;
        self
    }

    /// Zero the score, restart the clock and put a fresh target on every
    /// track. Pending respawns from an earlier round are dropped.
    pub fn start(&mut self) {
        self.score = 0;
        self.timer.reset();
        self.running = true;
        self.respawns.clear();
        self.targets = self.tracks.iter().map(|track| Some(track.restarted())).collect();
        debug!("Round started with {} targets", self.targets.len());
    }

    pub fn pause(&mut self) {
        self.timer.pause();
    }

    pub fn resume(&mut self) {
        self.timer.resume();
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn add_score(&mut self, points: u32) {
        if self.is_in_progress() {
            self.score += points;
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> f32 {
        self.timer.remaining()
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    /// Started, not paused and not out of time.
    pub fn is_in_progress(&self) -> bool {
        self.running && !self.timer.is_paused() && !self.timer.is_finished()
    }

    /// The clock ran out.
    pub fn is_finished(&self) -> bool {
        self.running && self.timer.is_finished()
    }

    /// Position of the target on track `idx`, if it has one.
    pub fn target_position(&self, idx: usize) -> Option<Vec3> {
        self.targets.get(idx)?.as_ref().map(Racetrack::position)
    }

    /// `(track index, position)` of every live target.
    pub fn target_positions(&self) -> impl Iterator<Item = (usize, Vec3)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(idx, target)| target.as_ref().map(|t| (idx, t.position())))
    }

    pub fn pending_respawns(&self) -> usize {
        self.respawns.pending_count()
    }

    /// Index of a target closer than `threshold` to `position`.
    /// Pass it to [`commit_user_hit`](Self::commit_user_hit) to score it.
    pub fn test_user_hit(&self, position: Vec3, threshold: f32) -> Option<usize> {
        self.target_positions()
            .find(|(_, target)| target.distance(position) < threshold)
            .map(|(idx, _)| idx)
    }

    /// Score the target on track `idx` and schedule its replacement.
    /// Returns false when there is no live target there or the round is not
    /// in progress.
    pub fn commit_user_hit(&mut self, idx: usize) -> bool {
        if !self.is_in_progress() {
            return false;
        }
        let Some(slot) = self.targets.get_mut(idx) else {
            return false;
        };
        if slot.take().is_none() {
            return false;
        }
        self.score += 1;
        self.respawns.schedule(HIT_RESPAWN_DELAY, idx);
        debug!("Hit target on track {}, score {}", idx, self.score);
        true
    }

    /// Put a fresh target on track `idx`.
    fn spawn_target(&mut self, idx: usize) {
        if let (Some(track), Some(slot)) = (self.tracks.get(idx), self.targets.get_mut(idx)) {
            *slot = Some(track.restarted());
        }
    }

    /// Advance the clock, move the targets and bring back hit ones.
    /// Nothing moves unless the round is in progress.
    /// Returns true on the tick that ends the round.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        if !self.is_in_progress() {
            return false;
        }
        let distance = self.target_speed * delta_seconds;
        for target in self.targets.iter_mut().flatten() {
            target.advance(distance);
        }
        for idx in self.respawns.tick(delta_seconds) {
            self.spawn_target(idx);
        }
        self.timer.tick(delta_seconds)
    }
}

// ============================================================================
// FLOW
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct GameFlow {
    state: FlowState,
}

impl GameFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Target state for `input`, or `None` if it is ignored in this state.
    pub fn next_state(state: FlowState, input: FlowInput) -> Option<FlowState> {
        use FlowInput::*;
        use FlowState::*;

        match (input, state) {
            (TrackingStarted, PausedByTracking) => Some(InProgress),
            (TrackingStarted, PausedByUserAndTracking) => Some(PausedByUser),
            (TrackingStarted, WaitingForTracking) => Some(WaitingForUserToStart),

            (TrackingStopped, WaitingForUserToStart) => Some(WaitingForTracking),
            (TrackingStopped, PausedByUser) => Some(PausedByUserAndTracking),
            (TrackingStopped, InProgress) => Some(PausedByTracking),

            (StartPressed, WaitingForUserToStart) => Some(InProgress),

            (PauseTogglePressed, InProgress) => Some(PausedByUser),
            (PauseTogglePressed, PausedByTracking) => Some(PausedByUserAndTracking),
            (PauseTogglePressed, PausedByUserAndTracking) => Some(PausedByTracking),
            (PauseTogglePressed, PausedByUser) => Some(InProgress),

            (RestartPressed, Finished) => Some(InProgress),

            (TimeUp, InProgress) => Some(Finished),

            _ => None,
        }
    }

    /// Model side effect of moving `from -> to`.
    fn effect(from: FlowState, to: FlowState) -> Option<FlowEffect> {
        match (from, to) {
            (FlowState::WaitingForUserToStart, FlowState::InProgress) => Some(FlowEffect::Start),
            (FlowState::Finished, FlowState::InProgress) => Some(FlowEffect::Restart),
            (FlowState::InProgress, to) if to.is_paused() => Some(FlowEffect::Pause),
            (from, FlowState::InProgress) if from.is_paused() => Some(FlowEffect::Resume),
            _ => None,
        }
    }

    /// Apply an input. Returns the effect applied to `model`, if any.
    pub fn handle(&mut self, input: FlowInput, model: &mut GameModel) -> Option<FlowEffect> {
        // Restarting mid-round resets the model without a state change
        if input == FlowInput::RestartPressed && self.state == FlowState::InProgress {
            model.restart();
            info!("Round restarted");
            return Some(FlowEffect::Restart);
        }

        let Some(next) = Self::next_state(self.state, input) else {
            warn!("Ignoring {:?} in {:?}", input, self.state);
            return None;
        };

        let effect = Self::effect(self.state, next);
        info!("Flow {:?} -> {:?}", self.state, next);
        self.state = next;

        match effect {
            Some(FlowEffect::Start) => model.start(),
            Some(FlowEffect::Restart) => model.restart(),
            Some(FlowEffect::Pause) => model.pause(),
            Some(FlowEffect::Resume) => model.resume(),
            None => {}
        }
        effect
    }

    /// Advance the round clock; finishes the round when time is up.
    pub fn update(&mut self, delta_seconds: f32, model: &mut GameModel) {
        if self.state != FlowState::InProgress {
            return;
        }
        if model.tick(delta_seconds) || model.is_finished() {
            self.handle(FlowInput::TimeUp, model);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> (GameFlow, GameModel) {
        let mut flow = GameFlow::new();
        let mut model = GameModel::new(10.0);
        flow.handle(FlowInput::TrackingStarted, &mut model);
        assert_eq!(flow.handle(FlowInput::StartPressed, &mut model), Some(FlowEffect::Start));
        (flow, model)
    }

    #[test]
    fn test_start_sequence() {
        let (flow, model) = playing();
        assert_eq!(flow.state(), FlowState::InProgress);
        assert_eq!(model.time_left(), 10.0);
        assert!(!model.is_paused());
    }

    #[test]
    fn test_start_ignored_without_tracking() {
        let mut flow = GameFlow::new();
        let mut model = GameModel::default();
        assert_eq!(flow.handle(FlowInput::StartPressed, &mut model), None);
        assert_eq!(flow.state(), FlowState::WaitingForTracking);
    }

    #[test]
    fn test_pause_states_combine() {
        let (mut flow, mut model) = playing();

        assert_eq!(flow.handle(FlowInput::PauseTogglePressed, &mut model), Some(FlowEffect::Pause));
        assert_eq!(flow.state(), FlowState::PausedByUser);
        flow.handle(FlowInput::TrackingStopped, &mut model);
        assert_eq!(flow.state(), FlowState::PausedByUserAndTracking);
        flow.handle(FlowInput::PauseTogglePressed, &mut model);
        assert_eq!(flow.state(), FlowState::PausedByTracking);
        assert!(model.is_paused());

        assert_eq!(flow.handle(FlowInput::TrackingStarted, &mut model), Some(FlowEffect::Resume));
        assert_eq!(flow.state(), FlowState::InProgress);
        assert!(!model.is_paused());
    }

    #[test]
    fn test_clock_stops_while_paused() {
        let (mut flow, mut model) = playing();
        flow.update(4.0, &mut model);
        flow.handle(FlowInput::TrackingStopped, &mut model);
        flow.update(100.0, &mut model);
        assert_eq!(model.time_left(), 6.0);
        assert_eq!(flow.state(), FlowState::PausedByTracking);
    }

    #[test]
    fn test_time_up_and_restart() {
        let (mut flow, mut model) = playing();
        model.add_score(3);
        flow.update(10.0, &mut model);
        assert_eq!(flow.state(), FlowState::Finished);
        assert_eq!(model.score(), 3);

        // No scoring after the round ends
        model.add_score(1);
        assert_eq!(model.score(), 3);

        assert_eq!(flow.handle(FlowInput::RestartPressed, &mut model), Some(FlowEffect::Restart));
        assert_eq!(flow.state(), FlowState::InProgress);
        assert_eq!(model.score(), 0);
        assert_eq!(model.time_left(), 10.0);
    }

    #[test]
    fn test_restart_mid_round_keeps_state() {
        let (mut flow, mut model) = playing();
        model.add_score(5);
        flow.update(3.0, &mut model);
        assert_eq!(flow.handle(FlowInput::RestartPressed, &mut model), Some(FlowEffect::Restart));
        assert_eq!(flow.state(), FlowState::InProgress);
        assert_eq!(model.score(), 0);
        assert_eq!(model.time_left(), 10.0);
    }

    // ========================================================================
    // Hit targets
    // ========================================================================

    fn line_track(x: f32) -> Racetrack {
        Racetrack::new(vec![Vec3::new(x, 0.0, 0.0), Vec3::new(x, 0.0, 10.0)]).unwrap()
    }

    fn hit_round() -> (GameFlow, GameModel) {
        let mut flow = GameFlow::new();
        let mut model = GameModel::new(30.0)
            .with_tracks(vec![line_track(0.0), line_track(5.0)])
            .with_target_speed(1.0);
        flow.handle(FlowInput::TrackingStarted, &mut model);
        flow.handle(FlowInput::StartPressed, &mut model);
        (flow, model)
    }

    #[test]
    fn test_one_target_per_track_at_start() {
        let (_, model) = hit_round();
        let positions: Vec<_> = model.target_positions().collect();
        assert_eq!(positions, vec![(0, Vec3::ZERO), (1, Vec3::new(5.0, 0.0, 0.0))]);
    }

    #[test]
    fn test_targets_move_only_in_progress() {
        let (mut flow, mut model) = hit_round();
        flow.update(0.5, &mut model);
        assert_eq!(model.target_position(0), Some(Vec3::new(0.0, 0.0, 0.5)));

        flow.handle(FlowInput::PauseTogglePressed, &mut model);
        flow.update(3.0, &mut model);
        assert_eq!(model.target_position(0), Some(Vec3::new(0.0, 0.0, 0.5)));
    }

    #[test]
    fn test_hit_threshold() {
        let (_, model) = hit_round();
        assert_eq!(model.test_user_hit(Vec3::new(5.0, 0.0, 0.4), 0.5), Some(1));
        assert_eq!(model.test_user_hit(Vec3::new(5.0, 0.0, 0.5), 0.5), None);
        assert_eq!(model.test_user_hit(Vec3::new(2.5, 0.0, 0.0), 1.0), None);
    }

    #[test]
    fn test_committed_hit_scores_and_respawns() {
        let (mut flow, mut model) = hit_round();
        flow.update(1.0, &mut model);

        let idx = model.test_user_hit(Vec3::new(0.0, 0.0, 1.0), 0.1).unwrap();
        assert!(model.commit_user_hit(idx));
        assert_eq!(model.score(), 1);
        assert_eq!(model.target_position(0), None);
        // Already gone
        assert!(!model.commit_user_hit(idx));
        assert_eq!(model.test_user_hit(Vec3::new(0.0, 0.0, 1.0), 0.1), None);

        flow.update(1.5, &mut model);
        assert_eq!(model.target_position(0), None);
        flow.update(0.5, &mut model);
        // Respawned at the start of its track
        assert_eq!(model.target_position(0), Some(Vec3::ZERO));
        assert_eq!(model.pending_respawns(), 0);
    }

    #[test]
    fn test_respawn_waits_while_paused() {
        let (mut flow, mut model) = hit_round();
        assert!(model.commit_user_hit(1));
        flow.handle(FlowInput::PauseTogglePressed, &mut model);
        flow.update(5.0, &mut model);
        assert_eq!(model.target_position(1), None);

        flow.handle(FlowInput::PauseTogglePressed, &mut model);
        flow.update(2.0, &mut model);
        assert_eq!(model.target_position(1), Some(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_restart_cancels_pending_respawns() {
        let (mut flow, mut model) = hit_round();
        flow.update(1.0, &mut model);
        assert!(model.commit_user_hit(0));
        assert_eq!(model.pending_respawns(), 1);

        flow.handle(FlowInput::RestartPressed, &mut model);
        assert_eq!(model.pending_respawns(), 0);
        assert_eq!(model.score(), 0);
        // Both targets back at their track starts
        assert_eq!(model.target_position(0), Some(Vec3::ZERO));
        assert_eq!(model.target_position(1), Some(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_hits_ignored_after_time_up() {
        let (mut flow, mut model) = hit_round();
        flow.update(30.0, &mut model);
        assert_eq!(flow.state(), FlowState::Finished);
        assert!(!model.commit_user_hit(0));
        assert_eq!(model.score(), 0);
    }
}
