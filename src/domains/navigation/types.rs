use serde::{Deserialize, Serialize};

/// A discrete grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four axis-aligned neighbors in expansion order: +x, -x, +y, -y.
    pub fn neighbors(self) -> [Point; 4] {
        [
            Point::new(self.x + 1, self.y),
            Point::new(self.x - 1, self.y),
            Point::new(self.x, self.y + 1),
            Point::new(self.x, self.y - 1),
        ]
    }

    /// True if the cell lies inside a `width` x `height` grid anchored at the origin.
    pub fn within(self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }

    pub fn is_adjacent(self, other: Point) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Convert render coordinates to a grid cell by dividing by `scale` and flooring.
    pub fn from_world(world: WorldPoint, scale: f64) -> Self {
        Self {
            x: (world.x / scale).floor() as i32,
            y: (world.y / scale).floor() as i32,
        }
    }

    pub fn to_world(self, scale: f64) -> WorldPoint {
        WorldPoint {
            x: self.x as f64 * scale,
            y: self.y as f64 * scale,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A position in continuous world (render) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
