//! View notifications emitted by the block grid.
//!
//! The model never calls views directly. It pushes events into a queue owned
//! by the caller, who drains it once per frame and re-reads whatever grid the
//! event names.

use std::collections::VecDeque;

/// Which of the two long-lived grids an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    /// Static floor of placed cells
    Attached,
    /// Falling piece
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// The grid was rebuilt; redraw it from scratch.
    ReplaceGrid(GridKind),
    /// The detached piece was merged into this grid; append its cells.
    MergeGrid(GridKind),
}

#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<GridEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GridEvent) {
        self.events.push_back(event);
    }

    /// Remove and return every queued event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = GridEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
