use crate::common::{DomainError, DomainResult};
use crate::domains::navigation::Point;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Prefix for environment overrides, e.g. `WHEELCHAIR__MOTION__TICK_INTERVAL_MS=50`.
pub const ENV_PREFIX: &str = "WHEELCHAIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena: ArenaConfig,
    pub grid: GridConfig,
    pub obstacles: ObstacleConfig,
    pub motion: MotionConfig,
    pub logging: LoggingConfig,
    pub demo: DemoConfig,
}

/// World-space extents of the drawable arena and the agent's start cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub start: Point,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// World units per grid cell.
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObstacleConfig {
    pub count: usize,
    pub min_size: f64,
    pub max_size: f64,
    pub edge_margin: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: String,
}

/// Scripted destination requests replayed by the headless binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Render coordinates.
    pub destinations: Vec<[f64; 2]>,
    pub interval_ms: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 300.0,
            start: Point::new(50, 50),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            scale: 5.0,
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            count: 5,
            min_size: 30.0,
            max_size: 50.0,
            edge_margin: 50.0,
            seed: None,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { tick_interval_ms: 100 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            destinations: vec![[450.0, 100.0], [20.0, 20.0]],
            interval_ms: 3000,
        }
    }
}

impl GridConfig {
    pub fn contains(&self, p: Point) -> bool {
        p.within(self.width, self.height)
    }
}

impl MotionConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Defaults, then `path` if it exists, then `WHEELCHAIR__*` environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let invalid = |reason: String| Err(DomainError::InvalidConfiguration { reason });

        if self.grid.width == 0 || self.grid.height == 0 {
            return invalid(format!("grid must be non-empty, got {}x{}", self.grid.width, self.grid.height));
        }
        if !(self.grid.scale > 0.0) {
            return invalid(format!("grid scale must be positive, got {}", self.grid.scale));
        }
        if !(self.obstacles.min_size < self.obstacles.max_size) {
            return invalid(format!(
                "obstacle size range [{}, {}) is empty",
                self.obstacles.min_size, self.obstacles.max_size
            ));
        }
        if self.obstacles.edge_margin >= self.arena.width || self.obstacles.edge_margin >= self.arena.height {
            return invalid(format!(
                "edge margin {} must be smaller than the {}x{} arena",
                self.obstacles.edge_margin, self.arena.width, self.arena.height
            ));
        }
        let start = self.arena.start;
        if !self.grid.contains(start) {
            return invalid(format!("start ({}, {}) lies outside the grid", start.x, start.y));
        }
        if self.motion.tick_interval_ms == 0 {
            return invalid("tick interval must be non-zero".to_string());
        }
        Ok(())
    }
}
