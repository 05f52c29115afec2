pub mod adapters;
pub mod application;
pub mod common;
pub mod config;
pub mod domains;

pub use crate::config::Config;

pub use common::{
    AggregateRoot, ApplicationError, ApplicationResult, DomainError, DomainEvent, DomainResult, EventEnvelope,
};
pub use domains::navigation::{AStarPlanner, Obstacle, ObstacleField, OccupancyGrid, Path, Point, WorldPoint};
pub use domains::wheelchair::{MotionPlayer, RouteStatus, SceneProjection, SessionState, SimulationSession};
