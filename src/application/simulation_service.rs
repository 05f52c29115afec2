// Drives a SimulationSession: the clock (tick interval) and the input
// channel on one task, with every resulting event logged, journaled and
// followed by a rendered frame.
use crate::common::{AggregateRoot, ApplicationResult, DomainError, DomainResult, EventEnvelope, EventMetadata};
use crate::config::Config;
use crate::domains::logger::DynLogger;
use crate::domains::navigation::{Point, WorldPoint};
use crate::domains::wheelchair::{
    RouteStatus, SceneProjection, SceneRenderer, SessionEvent, SimulationCommand, SimulationSession,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};

const AGGREGATE_TYPE: &str = "SimulationSession";
const EVENT_SOURCE: &str = "SimulationService";

pub struct SimulationService {
    session: SimulationSession,
    renderer: Box<dyn SceneRenderer>,
    logger: DynLogger,
    tick_interval: Duration,
    journal: Vec<EventEnvelope>,
}

impl SimulationService {
    /// Validate `config`, generate the obstacle field and start a session.
    /// Without a configured seed one is drawn at random and logged.
    pub fn new(config: &Config, logger: DynLogger, renderer: Box<dyn SceneRenderer>) -> ApplicationResult<Self> {
        config.validate()?;
        let seed = config.obstacles.seed.unwrap_or_else(rand::random);
        let session = SimulationSession::from_config(config, seed)?;

        info!(session_id = %session.id, seed, "simulation session created");
        logger.info(&format!("Obstacle seed for session {}: {}", session.id, seed));

        Self::with_session(session, logger, renderer, config.motion.tick_interval())
    }

    /// Wrap an existing session, e.g. one built over a hand-made obstacle field.
    pub fn with_session(
        session: SimulationSession,
        logger: DynLogger,
        renderer: Box<dyn SceneRenderer>,
        tick_interval: Duration,
    ) -> ApplicationResult<Self> {
        let mut service = Self {
            session,
            renderer,
            logger,
            tick_interval,
            journal: Vec::new(),
        };
        service.publish()?;
        Ok(service)
    }

    /// Route to a point in render coordinates. The latest request always wins.
    pub fn request_destination(&mut self, target: WorldPoint) -> ApplicationResult<RouteStatus> {
        let status = self.session.set_destination_world(target)?;
        self.publish()?;
        Ok(status)
    }

    /// Route to a grid cell.
    pub fn request_cell(&mut self, cell: Point) -> ApplicationResult<RouteStatus> {
        let status = self.session.set_destination(cell)?;
        self.publish()?;
        Ok(status)
    }

    /// One clock tick: advance the agent (if moving) and render.
    pub fn step(&mut self) -> ApplicationResult<Option<Point>> {
        let moved = self.session.tick()?;
        self.publish()?;
        Ok(moved)
    }

    /// Tick until the current route is exhausted or `max_ticks` is hit.
    /// Returns the number of ticks that moved the agent.
    pub fn run_to_idle(&mut self, max_ticks: usize) -> ApplicationResult<usize> {
        let mut moved = 0;
        while self.session.is_moving() && moved < max_ticks {
            if self.step()?.is_some() {
                moved += 1;
            }
        }
        Ok(moved)
    }

    /// Process commands and clock ticks until shut down. Once every sender is
    /// dropped the loop stops, unless `ShutdownWhenIdle` was received: then
    /// the current route is played out first.
    pub async fn run(mut self, mut commands: mpsc::Receiver<SimulationCommand>) -> ApplicationResult<SimulationSession> {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut stop_when_idle = false;
        let mut commands_closed = false;

        info!(interval_ms = self.tick_interval.as_millis() as u64, "simulation loop running");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.step()?;
                    if stop_when_idle && !self.session.is_moving() {
                        break;
                    }
                }
                command = commands.recv(), if !commands_closed => match command {
                    Some(SimulationCommand::SetDestination { x, y }) => {
                        self.request_destination(WorldPoint::new(x, y))?;
                    }
                    Some(SimulationCommand::ShutdownWhenIdle) => {
                        stop_when_idle = true;
                    }
                    Some(SimulationCommand::Shutdown) => break,
                    None if stop_when_idle => {
                        debug!("command channel closed, finishing current route");
                        commands_closed = true;
                    }
                    None => break,
                },
            }
        }

        info!(steps = self.session.steps_taken(), "simulation loop stopped");
        Ok(self.session)
    }

    pub fn session(&self) -> &SimulationSession {
        &self.session
    }

    pub fn scene(&self) -> SceneProjection {
        SceneProjection::from_session(&self.session)
    }

    pub fn journal(&self) -> &[EventEnvelope] {
        &self.journal
    }

    /// Decode the journal back into domain events.
    pub fn history(&self) -> DomainResult<Vec<SessionEvent>> {
        self.journal
            .iter()
            .map(|envelope| -> DomainResult<SessionEvent> {
                Ok(serde_json::from_value(envelope.event_data.clone())?)
            })
            .collect()
    }

    fn publish(&mut self) -> ApplicationResult<()> {
        let events = self.session.uncommitted_events().to_vec();
        for event in &events {
            self.report(event);
            let envelope = EventEnvelope::new(event, AGGREGATE_TYPE, EventMetadata::from_source(EVENT_SOURCE))
                .map_err(DomainError::from)?;
            self.journal.push(envelope);
        }
        self.session.mark_events_as_committed();

        // A broken renderer must not stop the agent.
        if let Err(e) = self.renderer.render(&self.scene()) {
            self.logger.error(&format!("Failed to render frame: {}", e));
        }
        Ok(())
    }

    fn report(&self, event: &SessionEvent) {
        match event {
            SessionEvent::SessionStarted { session_id, obstacles, start, .. } => {
                self.logger.info(&format!(
                    "Session {} started at ({}, {}) with {} obstacles",
                    session_id, start.x, start.y, obstacles.len()
                ));
            }
            SessionEvent::DestinationRequested { requested, destination, .. } => {
                if requested != destination {
                    self.logger.warn(&format!(
                        "Destination ({}, {}) is outside the grid, clamped to ({}, {})",
                        requested.x, requested.y, destination.x, destination.y
                    ));
                } else {
                    debug!(x = destination.x, y = destination.y, "destination requested");
                }
            }
            SessionEvent::RouteCancelled { abandoned_at, remaining, .. } => {
                self.logger.info(&format!(
                    "Route cancelled at ({}, {}) with {} cells unplayed",
                    abandoned_at.x, abandoned_at.y, remaining
                ));
            }
            SessionEvent::RoutePlanned { destination, path, .. } => {
                self.logger.info(&format!(
                    "Route to ({}, {}) planned: {} steps",
                    destination.x,
                    destination.y,
                    path.cost()
                ));
            }
            SessionEvent::DestinationUnreachable { destination, .. } => {
                self.logger.warn(&format!(
                    "Destination ({}, {}) is unreachable; staying put",
                    destination.x, destination.y
                ));
            }
            SessionEvent::PositionAdvanced { position, cursor, .. } => {
                trace!(x = position.x, y = position.y, cursor, "position advanced");
            }
            SessionEvent::DestinationReached { position, .. } => {
                self.logger.info(&format!("Arrived at ({}, {})", position.x, position.y));
            }
        }
    }
}
