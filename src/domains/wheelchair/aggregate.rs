use super::events::SessionEvent;
use super::motion::MotionPlayer;
use crate::common::{AggregateRoot, DomainError, DomainResult};
use crate::config::{Config, GridConfig};
use crate::domains::navigation::{AStarPlanner, ObstacleField, OccupancyGrid, Path, Point, WorldPoint};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Planning, // Only observable while set_destination is running
    Moving,
}

/// Outcome of a destination request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RouteStatus {
    Planned { steps: usize },
    Unreachable,
}

/// One wheelchair in one arena. Owns the agent position, the obstacle field
/// and the active route; all changes go through `SessionEvent`s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSession {
    pub id: String,
    grid: GridConfig,
    obstacles: ObstacleField,
    position: Point,
    destination: Option<Point>,
    state: SessionState,
    unreachable: bool,
    motion: MotionPlayer,
    steps_taken: u64,
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<SessionEvent>,
}

impl SimulationSession {
    pub fn new(id: String, obstacles: ObstacleField, start: Point, grid: GridConfig) -> DomainResult<Self> {
        if !grid.contains(start) {
            return Err(DomainError::InvalidCommand {
                reason: format!(
                    "Start ({}, {}) is outside the {}x{} grid",
                    start.x, start.y, grid.width, grid.height
                ),
            });
        }

        let mut session = Self::blank();
        let event = SessionEvent::SessionStarted {
            session_id: id,
            obstacles,
            start,
            grid,
            timestamp: Utc::now(),
        };

        session.add_event(event.clone());
        session.apply(&event)?;
        Ok(session)
    }

    /// Start a session with a freshly generated, seeded obstacle field.
    pub fn from_config(config: &Config, seed: u64) -> DomainResult<Self> {
        let obstacles = ObstacleField::seeded(seed, &config.arena, &config.obstacles)?;
        Self::new(
            format!("session-{}", Uuid::new_v4()),
            obstacles,
            config.arena.start,
            config.grid.clone(),
        )
    }

    /// Rebuild a session by replaying its event history.
    pub fn from_history(events: &[SessionEvent]) -> DomainResult<Self> {
        match events.first() {
            Some(SessionEvent::SessionStarted { .. }) => {}
            _ => {
                return Err(DomainError::InvalidCommand {
                    reason: "History must begin with SessionStarted".to_string(),
                })
            }
        }

        let mut session = Self::blank();
        for event in events {
            session.apply(event)?;
        }
        Ok(session)
    }

    fn blank() -> Self {
        Self {
            id: String::new(),
            grid: GridConfig::default(),
            obstacles: ObstacleField::empty(),
            position: Point::new(0, 0),
            destination: None,
            state: SessionState::Idle,
            unreachable: false,
            motion: MotionPlayer::idle(),
            steps_taken: 0,
            version: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Route the agent to `destination`, cancelling any route in progress.
    ///
    /// Out-of-grid destinations are clamped. An unreachable destination is not
    /// an error: the session goes idle with the destination recorded and
    /// `is_unreachable()` set.
    pub fn set_destination(&mut self, requested: Point) -> DomainResult<RouteStatus> {
        let grid = OccupancyGrid::from_config(&self.obstacles, &self.grid);
        let destination = grid.clamp(requested);

        if self.motion.is_active() {
            let event = SessionEvent::RouteCancelled {
                session_id: self.id.clone(),
                abandoned_at: self.position,
                remaining: self.motion.remaining(),
                timestamp: Utc::now(),
            };
            self.add_event(event.clone());
            self.apply(&event)?;
        }

        let event = SessionEvent::DestinationRequested {
            session_id: self.id.clone(),
            requested,
            destination,
            timestamp: Utc::now(),
        };
        self.add_event(event.clone());
        self.apply(&event)?;

        let path = AStarPlanner::new().plan(&grid, self.position, destination);

        if path.is_empty() {
            let event = SessionEvent::DestinationUnreachable {
                session_id: self.id.clone(),
                destination,
                timestamp: Utc::now(),
            };
            self.add_event(event.clone());
            self.apply(&event)?;
            return Ok(RouteStatus::Unreachable);
        }

        let steps = path.cost();
        let event = SessionEvent::RoutePlanned {
            session_id: self.id.clone(),
            destination,
            path,
            timestamp: Utc::now(),
        };
        self.add_event(event.clone());
        self.apply(&event)?;
        Ok(RouteStatus::Planned { steps })
    }

    /// Same as [`set_destination`](Self::set_destination) for render coordinates.
    pub fn set_destination_world(&mut self, target: WorldPoint) -> DomainResult<RouteStatus> {
        self.set_destination(Point::from_world(target, self.grid.scale))
    }

    /// Advance one cell along the route. No-op unless moving.
    pub fn tick(&mut self) -> DomainResult<Option<Point>> {
        if self.state != SessionState::Moving {
            return Ok(None);
        }
        let Some(next) = self.motion.path().get(self.motion.cursor()) else {
            return Ok(None);
        };

        let event = SessionEvent::PositionAdvanced {
            session_id: self.id.clone(),
            position: next,
            cursor: self.motion.cursor() + 1,
            timestamp: Utc::now(),
        };
        self.add_event(event.clone());
        self.apply(&event)?;

        if !self.motion.is_active() {
            let event = SessionEvent::DestinationReached {
                session_id: self.id.clone(),
                position: self.position,
                timestamp: Utc::now(),
            };
            self.add_event(event.clone());
            self.apply(&event)?;
        }

        Ok(Some(next))
    }

    pub fn current_position(&self) -> Point {
        self.position
    }

    /// The active route, or the last completed one. Empty after an unreachable request.
    pub fn current_path(&self) -> &Path {
        self.motion.path()
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        self.state == SessionState::Moving
    }

    pub fn is_unreachable(&self) -> bool {
        self.unreachable
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn grid_config(&self) -> &GridConfig {
        &self.grid
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn remaining_steps(&self) -> usize {
        self.motion.remaining()
    }

    /// The occupancy grid the next planning call would search.
    pub fn occupancy_grid(&self) -> OccupancyGrid {
        OccupancyGrid::from_config(&self.obstacles, &self.grid)
    }
}

impl AggregateRoot for SimulationSession {
    type Event = SessionEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            SessionEvent::SessionStarted { session_id, obstacles, start, grid, .. } => {
                self.id = session_id.clone();
                self.obstacles = obstacles.clone();
                self.position = *start;
                self.grid = grid.clone();
                self.destination = None;
                self.state = SessionState::Idle;
                self.unreachable = false;
                self.motion = MotionPlayer::idle();
                self.steps_taken = 0;
            }
            SessionEvent::DestinationRequested { destination, .. } => {
                self.destination = Some(*destination);
                self.state = SessionState::Planning;
                self.unreachable = false;
            }
            SessionEvent::RouteCancelled { .. } => {
                self.motion.cancel();
            }
            SessionEvent::RoutePlanned { path, .. } => {
                self.motion.start(path.clone());
                self.state = SessionState::Moving;
            }
            SessionEvent::DestinationUnreachable { .. } => {
                self.motion.start(Path::empty());
                self.state = SessionState::Idle;
                self.unreachable = true;
            }
            SessionEvent::PositionAdvanced { position, .. } => {
                self.motion.tick();
                self.position = *position;
                self.steps_taken += 1;
            }
            SessionEvent::DestinationReached { .. } => {
                self.state = SessionState::Idle;
                self.destination = None;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: Self::Event) {
        self.uncommitted_events.push(event);
    }
}
