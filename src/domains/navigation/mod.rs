pub mod grid;
pub mod obstacles;
pub mod path;
pub mod planner;
pub mod types;

pub use grid::*;
pub use obstacles::*;
pub use path::*;
pub use planner::{plan, AStarPlanner};
pub use types::*;
