//! Timekeep API Server
//!
//! Main entry point for the Timekeep backend service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timekeep_api::{AppState, create_router};
use timekeep_core::{
    calendar::SwedishCalendar,
    workday::{WorkdayCalculator, WorkdayPolicy},
};
use timekeep_db::connect_with_pool;
use timekeep_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timekeep=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect_with_pool(
        &config.database.url,
        config.database.min_connections,
        config.database.max_connections,
    )
    .await?;
    info!("Connected to database");

    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    let policy = WorkdayPolicy::new(config.timesheet.hours_per_day)?;
    info!(hours_per_day = %policy.hours_per_day(), "Workday policy configured");

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        calculator: WorkdayCalculator::new(policy),
        calendar: Arc::new(SwedishCalendar),
    };

    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
