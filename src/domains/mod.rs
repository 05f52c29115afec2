pub mod logger;
pub mod navigation;
pub mod wheelchair;

pub use logger::*;
pub use navigation::*;
pub use wheelchair::*;
