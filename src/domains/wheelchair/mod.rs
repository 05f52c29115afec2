pub mod actors;
pub mod aggregate;
pub mod events;
pub mod motion;
pub mod ports;
pub mod projections;

pub use actors::*;
pub use aggregate::*;
pub use events::*;
pub use motion::*;
pub use ports::*;
pub use projections::*;
