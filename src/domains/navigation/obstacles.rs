use super::types::WorldPoint;
use crate::common::{DomainError, DomainResult};
use crate::config::{ArenaConfig, ObstacleConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world coordinates. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// The fixed set of obstacles for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Place `config.count` obstacles uniformly at random inside the arena.
    ///
    /// Origins are drawn from `[0, arena - edge_margin)` on each axis, sizes
    /// from `[min_size, max_size)`.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        arena: &ArenaConfig,
        config: &ObstacleConfig,
    ) -> DomainResult<Self> {
        let max_x = arena.width - config.edge_margin;
        let max_y = arena.height - config.edge_margin;
        if max_x <= 0.0 || max_y <= 0.0 {
            return Err(DomainError::InvalidConfiguration {
                reason: format!(
                    "edge margin {} leaves no room in a {}x{} arena",
                    config.edge_margin, arena.width, arena.height
                ),
            });
        }
        if config.min_size >= config.max_size {
            return Err(DomainError::InvalidConfiguration {
                reason: format!(
                    "obstacle size range [{}, {}) is empty",
                    config.min_size, config.max_size
                ),
            });
        }

        let obstacles = (0..config.count)
            .map(|_| Obstacle {
                x: rng.gen_range(0.0..max_x),
                y: rng.gen_range(0.0..max_y),
                width: rng.gen_range(config.min_size..config.max_size),
                height: rng.gen_range(config.min_size..config.max_size),
            })
            .collect();

        Ok(Self { obstacles })
    }

    /// Deterministic variant of [`ObstacleField::generate`].
    pub fn seeded(seed: u64, arena: &ArenaConfig, config: &ObstacleConfig) -> DomainResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(&mut rng, arena, config)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}
