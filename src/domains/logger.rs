use log::LevelFilter;
use std::sync::Arc;

/// Domain-level logging port.
/// Small and infallible: a failing sink must never stop the simulation.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn DomainLogger>;

/// File sink backed by `fast_log`.
pub struct FileLogger;

impl FileLogger {
    /// Install `fast_log` as the global `log` backend writing to `path` only.
    /// Stdout carries scene frames, so no console appender is added here.
    /// Fails if another `log` backend is already installed.
    pub fn init(path: &str, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
        fast_log::init(fast_log::config::Config::new().file(path).level(level))?;
        Ok(())
    }
}
