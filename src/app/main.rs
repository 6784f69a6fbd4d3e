use std::time::Duration;
use anyhow::Context;
use clap::Parser;
use crate::app::{AppController, Args};
use crate::app::prettylog::{log_server_running, log_startup_banner, print_current};
use crate::config::Config;
use crate::utils;

pub async fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();

    utils::init_tracing().map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut app = AppController::load(&config_path);

    // command line overrides are persisted like edits in the settings
    if let Some(file) = &args.file {
        app.select_file(file);
    }
    if args.host.is_some() || args.port.is_some() {
        let host = args.host.clone().unwrap_or_else(|| app.config().listen_addr.clone());
        let port = args.port.unwrap_or(app.config().listen_port);
        app.set_listen_addr(&host, port);
    }

    log_startup_banner(&app, &config_path);

    app.toggle().await.context("Failed to start server")?;
    log_server_running(&app, app.refresh_current().await);

    run_event_loop(&app, args.status_interval).await?;

    tracing::info!("Shutting down");
    app.shutdown().await.context("Failed to stop server")?;
    Ok(())
}

/// Wait for Ctrl-C, printing the current value on the optional interval.
async fn run_event_loop(app: &AppController, status_interval: Option<u64>) -> anyhow::Result<()> {
    let Some(secs) = status_interval.filter(|secs| *secs > 0) else {
        tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")?;
        return Ok(());
    };

    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    // first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                return Ok(());
            }
            _ = ticker.tick() => {
                print_current(app.refresh_current().await);
            }
        }
    }
}
