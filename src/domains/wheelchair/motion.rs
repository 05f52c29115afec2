use crate::domains::navigation::{Path, Point};
use serde::{Deserialize, Serialize};

/// Replays a path one cell per tick. No interpolation: between ticks the
/// agent sits exactly on the cell last emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionPlayer {
    path: Path,
    cursor: usize,
}

impl MotionPlayer {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Replace whatever is playing with `path` and rewind to index 0.
    pub fn start(&mut self, path: Path) {
        self.path = path;
        self.cursor = 0;
    }

    /// Drop the current path. Returns how many cells were left unplayed.
    pub fn cancel(&mut self) -> usize {
        let remaining = self.remaining();
        self.path = Path::empty();
        self.cursor = 0;
        remaining
    }

    /// Emit the cell at the cursor and advance. `None` once exhausted.
    pub fn tick(&mut self) -> Option<Point> {
        let next = self.path.get(self.cursor)?;
        self.cursor += 1;
        Some(next)
    }

    pub fn is_active(&self) -> bool {
        self.cursor < self.path.len()
    }

    pub fn is_finished(&self) -> bool {
        !self.path.is_empty() && self.cursor >= self.path.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.path.len().saturating_sub(self.cursor)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
