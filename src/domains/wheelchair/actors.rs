// Command actor: the input side of the simulation (clicks, voice, scripts).
use crate::common::{ApplicationError, ApplicationResult};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationCommand {
    /// Destination in render coordinates.
    SetDestination { x: f64, y: f64 },
    /// Stop once the agent has no route left to play. Dropping every sender
    /// afterwards does not cut the current route short.
    ShutdownWhenIdle,
    Shutdown,
}

#[derive(Clone)]
pub struct SimulationCommandActor {
    command_sender: mpsc::Sender<SimulationCommand>,
}

impl SimulationCommandActor {
    pub fn new(command_sender: mpsc::Sender<SimulationCommand>) -> Self {
        Self { command_sender }
    }

    /// Actor plus the receiving end to hand to `SimulationService::run`.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<SimulationCommand>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    pub async fn set_destination(&self, x: f64, y: f64) -> ApplicationResult<()> {
        self.send(SimulationCommand::SetDestination { x, y }).await
    }

    pub async fn shutdown_when_idle(&self) -> ApplicationResult<()> {
        self.send(SimulationCommand::ShutdownWhenIdle).await
    }

    pub async fn shutdown(&self) -> ApplicationResult<()> {
        self.send(SimulationCommand::Shutdown).await
    }

    async fn send(&self, command: SimulationCommand) -> ApplicationResult<()> {
        self.command_sender
            .send(command)
            .await
            .map_err(|e| ApplicationError::CommandChannel(format!("Failed to send command: {}", e)))
    }
}
