use std::error::Error;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wheelchair_nav::adapters::outbound::{init_buffered_logger, init_combined_logger, init_console_logger, JsonLinesRenderer};
use wheelchair_nav::application::SimulationService;
use wheelchair_nav::domains::wheelchair::SimulationCommandActor;
use wheelchair_nav::{ApplicationError, Config};

const CONFIG_ENV: &str = "WHEELCHAIR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Installed as the tracing dispatcher only, leaving the `log` facade to fast_log.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path).map_err(ApplicationError::Configuration)?;
    info!(path = %config_path, "configuration loaded");

    let logger = match &config.logging.file {
        Some(path) => init_combined_logger(path, config.logging.level_filter()),
        None => init_console_logger(),
    };
    let logger = init_buffered_logger(logger, 256);

    let renderer = JsonLinesRenderer::new(std::io::stdout());
    let service = SimulationService::new(&config, logger, Box::new(renderer))?;

    let (actor, commands) = SimulationCommandActor::channel(16);
    let demo = config.demo.clone();
    let driver = tokio::spawn(async move {
        for [x, y] in demo.destinations {
            if let Err(e) = actor.set_destination(x, y).await {
                warn!(error = %e, "demo driver stopped");
                return;
            }
            tokio::time::sleep(Duration::from_millis(demo.interval_ms)).await;
        }
        let _ = actor.shutdown_when_idle().await;
    });

    let session = service.run(commands).await?;
    driver.abort();

    info!(
        position = ?session.current_position(),
        steps = session.steps_taken(),
        "simulation finished"
    );
    // Let the buffered logger drain.
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}
