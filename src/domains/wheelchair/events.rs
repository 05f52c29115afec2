use crate::common::DomainEvent;
use crate::config::GridConfig;
use crate::domains::navigation::{ObstacleField, Path, Point};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    SessionStarted {
        session_id: String,
        obstacles: ObstacleField,
        start: Point,
        grid: GridConfig,
        timestamp: DateTime<Utc>,
    },
    DestinationRequested {
        session_id: String,
        requested: Point,
        destination: Point,
        timestamp: DateTime<Utc>,
    },
    RouteCancelled {
        session_id: String,
        abandoned_at: Point,
        remaining: usize,
        timestamp: DateTime<Utc>,
    },
    RoutePlanned {
        session_id: String,
        destination: Point,
        path: Path,
        timestamp: DateTime<Utc>,
    },
    DestinationUnreachable {
        session_id: String,
        destination: Point,
        timestamp: DateTime<Utc>,
    },
    PositionAdvanced {
        session_id: String,
        position: Point,
        cursor: usize,
        timestamp: DateTime<Utc>,
    },
    DestinationReached {
        session_id: String,
        position: Point,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::SessionStarted { .. } => "SessionStarted",
            SessionEvent::DestinationRequested { .. } => "DestinationRequested",
            SessionEvent::RouteCancelled { .. } => "RouteCancelled",
            SessionEvent::RoutePlanned { .. } => "RoutePlanned",
            SessionEvent::DestinationUnreachable { .. } => "DestinationUnreachable",
            SessionEvent::PositionAdvanced { .. } => "PositionAdvanced",
            SessionEvent::DestinationReached { .. } => "DestinationReached",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            SessionEvent::SessionStarted { session_id, .. } => session_id,
            SessionEvent::DestinationRequested { session_id, .. } => session_id,
            SessionEvent::RouteCancelled { session_id, .. } => session_id,
            SessionEvent::RoutePlanned { session_id, .. } => session_id,
            SessionEvent::DestinationUnreachable { session_id, .. } => session_id,
            SessionEvent::PositionAdvanced { session_id, .. } => session_id,
            SessionEvent::DestinationReached { session_id, .. } => session_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::SessionStarted { timestamp, .. } => *timestamp,
            SessionEvent::DestinationRequested { timestamp, .. } => *timestamp,
            SessionEvent::RouteCancelled { timestamp, .. } => *timestamp,
            SessionEvent::RoutePlanned { timestamp, .. } => *timestamp,
            SessionEvent::DestinationUnreachable { timestamp, .. } => *timestamp,
            SessionEvent::PositionAdvanced { timestamp, .. } => *timestamp,
            SessionEvent::DestinationReached { timestamp, .. } => *timestamp,
        }
    }
}
