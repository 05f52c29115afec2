use super::types::Point;
use serde::{Deserialize, Serialize};

/// Ordered cells from start to goal, both inclusive. Empty means no route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<Point>,
}

impl Path {
    pub fn new(cells: Vec<Point>) -> Self {
        Self { cells }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.cells.get(index).copied()
    }

    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    /// Number of unit moves (cells minus one); zero for empty and single-cell paths.
    pub fn cost(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// True when every consecutive pair differs by one unit on exactly one axis.
    pub fn is_four_connected(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.cells.iter()
    }
}

impl From<Vec<Point>> for Path {
    fn from(cells: Vec<Point>) -> Self {
        Self { cells }
    }
}
