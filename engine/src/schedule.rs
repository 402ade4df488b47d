//! Frame-Driven Scheduling
//!
//! Deadline-based replacements for "wait N seconds, then continue" coroutines.
//! Nothing runs on its own: the owner advances time once per frame with
//! `tick(delta_seconds)` and acts on whatever became due.

/// Countdown that fires once when it reaches zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    /// Total duration in seconds
    duration: f32,
    /// Seconds elapsed so far
    elapsed: f32,
    /// Is the timer paused?
    paused: bool,
}

impl Timer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            paused: false,
        }
    }

    /// Advance the timer.
    /// Returns true exactly once, on the tick that reaches the duration.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        if self.paused || self.is_finished() {
            return false;
        }
        self.elapsed += delta_seconds;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Seconds left, never negative.
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Restart from zero (and unpause).
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.paused = false;
    }
}

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    due_at: f32,
    /// Insertion order, breaks deadline ties
    sequence: u64,
    task: T,
}

/// Queue of tasks that become due after a delay.
///
/// `T` is whatever the owner needs to act on later, typically a small enum.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: f32,
    next_sequence: u64,
    pending: Vec<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_sequence: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `task` to become due `delay_seconds` from now.
    pub fn schedule(&mut self, delay_seconds: f32, task: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push(ScheduledTask {
            due_at: self.now + delay_seconds.max(0.0),
            sequence,
            task,
        });
    }

    /// Advance time and return every task now due, earliest first.
    pub fn tick(&mut self, delta_seconds: f32) -> Vec<T> {
        self.now += delta_seconds;

        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|t| t.due_at <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at).then(a.sequence.cmp(&b.sequence)));
        due.into_iter().map(|t| t.task).collect()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Seconds since the scheduler was created.
    pub fn now(&self) -> f32 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once() {
        let mut timer = Timer::new(1.0);
        assert!(!timer.tick(0.5));
        assert!(timer.tick(0.5));
        assert!(!timer.tick(0.5));
        assert!(timer.is_finished());
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn test_timer_pause() {
        let mut timer = Timer::new(1.0);
        timer.tick(0.25);
        timer.pause();
        assert!(!timer.tick(5.0));
        assert_eq!(timer.elapsed(), 0.25);
        timer.resume();
        assert!(timer.tick(0.75));
    }

    #[test]
    fn test_scheduler_orders_by_deadline() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(2.0, "late");
        scheduler.schedule(1.0, "early");
        scheduler.schedule(1.0, "early-second");

        assert!(scheduler.tick(0.5).is_empty());
        assert_eq!(scheduler.tick(2.0), vec!["early", "early-second", "late"]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_scheduler_partial_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1.0, 1);
        scheduler.schedule(3.0, 3);

        assert_eq!(scheduler.tick(1.5), vec![1]);
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.tick(1.5), vec![3]);
    }

    #[test]
    fn test_scheduler_clear_cancels() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.1, ());
        scheduler.clear();
        assert!(scheduler.tick(1.0).is_empty());
    }
}
