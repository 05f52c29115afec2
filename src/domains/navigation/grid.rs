use super::obstacles::ObstacleField;
use super::types::Point;
use crate::config::GridConfig;

/// Cells blocked on each side of an obstacle's top-left cell.
pub const DILATION_RADIUS: i32 = 1;

/// Square boolean occupancy map covering the arena in grid units.
///
/// Rebuilt for every planning call; never shared between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; width * height],
        }
    }

    /// Rasterize `field` with a fixed 3x3 margin around each obstacle's
    /// top-left cell. Obstacle width and height are ignored: a 50-unit
    /// rectangle blocks exactly the same cells as a 30-unit one.
    pub fn build(field: &ObstacleField, width: usize, height: usize, scale: f64) -> Self {
        let mut grid = Self::empty(width, height);
        for obstacle in field.iter() {
            let anchor = Point::new(
                (obstacle.x / scale).floor() as i32,
                (obstacle.y / scale).floor() as i32,
            );
            for dx in -DILATION_RADIUS..=DILATION_RADIUS {
                for dy in -DILATION_RADIUS..=DILATION_RADIUS {
                    grid.set_blocked(Point::new(anchor.x + dx, anchor.y + dy), true);
                }
            }
        }
        grid
    }

    pub fn from_config(field: &ObstacleField, config: &GridConfig) -> Self {
        Self::build(field, config.width, config.height, config.scale)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.within(self.width, self.height)
    }

    /// Out-of-bounds cells report `false`; callers check bounds separately.
    pub fn is_blocked(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.blocked[i])
    }

    pub fn is_traversable(&self, p: Point) -> bool {
        self.in_bounds(p) && !self.is_blocked(p)
    }

    /// Writes outside the grid are silently dropped.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) {
        if let Some(i) = self.index(p) {
            self.blocked[i] = blocked;
        }
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    /// Clamp each axis of `p` into `[0, width - 1] x [0, height - 1]`.
    pub fn clamp(&self, p: Point) -> Point {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_y = self.height.saturating_sub(1) as i32;
        Point::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y))
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub(crate) fn index(&self, p: Point) -> Option<usize> {
        if self.in_bounds(p) {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        let grid = OccupancyGrid::empty(4, 3);
        assert_eq!(grid.index(Point::new(0, 0)), Some(0));
        assert_eq!(grid.index(Point::new(3, 0)), Some(3));
        assert_eq!(grid.index(Point::new(0, 1)), Some(4));
        assert_eq!(grid.index(Point::new(3, 2)), Some(11));
        assert_eq!(grid.index(Point::new(4, 0)), None);
        assert_eq!(grid.index(Point::new(-1, 0)), None);
    }

    #[test]
    fn clamp_pulls_both_axes_inside() {
        let grid = OccupancyGrid::empty(100, 100);
        assert_eq!(grid.clamp(Point::new(-3, 150)), Point::new(0, 99));
        assert_eq!(grid.clamp(Point::new(42, 7)), Point::new(42, 7));
    }
}
