use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use eld_server::cache::{CacheConfig, PlanCache};
use eld_server::config::ServerConfig;
use eld_server::planner::{MockPlanner, PlannerClient, PlannerConfig, PlanningBackend};
use eld_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let planner = match &config.mock_plan {
        Some(path) => PlanningBackend::Mock(MockPlanner::new(path)?),
        None => {
            let planner_config = PlannerConfig::new(&config.planner_url)
                .with_timeout(config.planner_timeout.as_secs())
                .with_max_concurrent(config.planner_max_concurrent);
            PlanningBackend::Remote(PlannerClient::new(planner_config)?)
        }
    };
    info!(backend = %planner.describe(), "planning backend ready");

    let plans = PlanCache::new(&CacheConfig {
        ttl: config.plan_ttl,
        ..CacheConfig::default()
    });

    let state = AppState::new(planner, plans);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        "ELD log server listening on http://{}",
        listener.local_addr()?
    );
    info!("  GET  /                               - Trip form");
    info!("  GET  /health                         - Health check");
    info!("  POST /api/plan-trip                  - Plan a trip");
    info!("  GET  /trip/:id/eld-log-sheet.pdf     - Download log sheets");
    info!("  POST /api/export                     - Export a posted plan");

    axum::serve(listener, app).await?;
    Ok(())
}
