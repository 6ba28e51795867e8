//! Cursor position tracking.

/// Motion between two consecutive cursor samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

/// Remembers the last cursor position and the step that led to it.
///
/// Only one step of history is kept.  Until the first sample arrives the
/// position and delta are both zero.
#[derive(Debug, Clone, Default)]
pub struct CursorTracker {
    last_pos: (i32, i32),
    last_delta: Delta,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new cursor position.
    pub fn update(&mut self, x: i32, y: i32) {
        let (last_x, last_y) = self.last_pos;
        self.last_delta = Delta {
            dx: x.saturating_sub(last_x),
            dy: y.saturating_sub(last_y),
        };
        self.last_pos = (x, y);
    }

    pub fn last_pos(&self) -> (i32, i32) {
        self.last_pos
    }

    pub fn last_delta(&self) -> Delta {
        self.last_delta
    }
}
