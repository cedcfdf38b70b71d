use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use vitalog::config::AppConfig;
use vitalog::oura::client::OuraClient;
use vitalog::state::AppState;
use vitalog::{app, scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "vitalog=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env();
    let state = AppState::init(&config).await?;

    sqlx::migrate!()
        .run(&state.db)
        .await
        .context("run database migrations")?;

    // The API server runs fine without a ring credential; only the
    // scheduled sync requires one.
    let mut sched = match OuraClient::new(&config.oura) {
        Ok(client) => Some(scheduler::start(state.db.clone(), Arc::new(client)).await?),
        Err(e) => {
            warn!(error = %e, "scheduled Oura sync disabled");
            None
        }
    };

    let app = app::build_app(state.clone());
    app::serve(app, &config.host, config.port).await?;

    if let Some(sched) = sched.as_mut() {
        if let Err(e) = sched.shutdown().await {
            error!(error = %e, "scheduler shutdown failed");
        }
    }
    state.db.close().await;
    info!("shutdown complete");
    Ok(())
}
