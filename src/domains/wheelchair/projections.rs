// Read model handed to the renderer once per frame.
use super::aggregate::{SessionState, SimulationSession};
use crate::domains::navigation::{Obstacle, Point, WorldPoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneProjection {
    pub session_id: String,
    pub state: SessionState,
    pub steps_taken: u64,
    pub position: Point,
    pub destination: Option<Point>,
    pub path: Vec<Point>,
    pub obstacles: Vec<Obstacle>,
    pub unreachable: bool,
    pub scale: f64,
}

impl SceneProjection {
    pub fn from_session(session: &SimulationSession) -> Self {
        Self {
            session_id: session.id.clone(),
            state: session.state(),
            steps_taken: session.steps_taken(),
            position: session.current_position(),
            destination: session.destination(),
            path: session.current_path().cells().to_vec(),
            obstacles: session.obstacles().obstacles().to_vec(),
            unreachable: session.is_unreachable(),
            scale: session.grid_config().scale,
        }
    }

    /// Agent position in render coordinates.
    pub fn render_position(&self) -> WorldPoint {
        self.position.to_world(self.scale)
    }

    pub fn render_path(&self) -> Vec<WorldPoint> {
        self.path.iter().map(|p| p.to_world(self.scale)).collect()
    }
}
