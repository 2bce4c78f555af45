mod config;
mod render;

use beltwatch_core::{
    fetch_infographics_inputs, ApiClient, FeedEvent, HealthReport, InfographicsView,
    NotificationFeed,
};
use config::BeltConsoleConfig;
use std::time::Duration;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // BELTWATCH_* variables may come from a local .env
    let dotenv = dotenvy::dotenv().ok();

    // Logging / tracing
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,beltwatch_core=info,belt_console=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        target = "belt_console",
        "Starting belt console: login → defects + parameters → grid → notifications"
    );

    if let Some(path) = dotenv {
        info!(target = "belt_console", path = %path.display(), "Loaded .env");
    }

    // Defaults + env + optional TOML overlay
    let cfg = BeltConsoleConfig::load();
    let client = ApiClient::new(cfg.client.clone());
    info!(target = "belt_console", server = %client.base_url(), zoom = %cfg.zoom, "Configured");

    // 1) Sign in unless a stored token is still good
    if !client.auth().is_signed_in() {
        match &cfg.credentials {
            Some(creds) => {
                client.auth().login(&creds.username, &creds.password).await?;
                info!(target = "belt_console", user = %creds.username, "Signed in");
            }
            None => {
                error!(
                    target = "belt_console",
                    "No valid session and no credentials (set BELTWATCH_USERNAME/BELTWATCH_PASSWORD or [auth] in TOML)"
                );
                return Ok(());
            }
        }
    }

    // 2) Defects and belt parameters, fetched independently
    let mut view = InfographicsView::new(cfg.zoom);
    let (recomputed, errors) = fetch_infographics_inputs(&client).await.apply(&mut view);
    for e in &errors {
        error!(target = "belt_console", error = %e, "Infographic input fetch failed");
    }
    if !recomputed {
        warn!(
            target = "belt_console",
            defects = view.defects().len(),
            ready = view.dimensions().is_ready(),
            "Grid not computed; showing empty belt"
        );
    }

    // 3) Render
    println!("{}", render::grid(view.grid(), &view.labels()));
    println!("{}", render::legend());
    print!("{}", render::summaries(view.grid()));

    match client.defects().count().await {
        Ok(count) => println!(
            "Defects: {} total, {} extreme, {} critical, {} placed on grid",
            count.total,
            count.extreme,
            count.critical,
            view.grid().placed_count()
        ),
        Err(e) => warn!(target = "belt_console", error = %e, "Defect count unavailable"),
    }
    match client.conveyor().status().await {
        Ok(status) => println!("Conveyor status: {}", status.status),
        Err(e) => warn!(target = "belt_console", error = %e, "Conveyor status unavailable"),
    }

    if !cfg.follow {
        return Ok(());
    }

    // 4) Live notifications
    let feed = NotificationFeed::default();
    let mut events = feed.subscribe();
    let feed_handle = feed.spawn(client.clone());
    let printer_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(FeedEvent::Notification(n)) => {
                    info!(target = "belt_console", title = %n.title, "Notification");
                    println!("[{}] {}", n.title, n.text);
                }
                Ok(FeedEvent::Malformed { raw, error }) => {
                    warn!(target = "belt_console", %raw, %error, "Unreadable notification");
                }
                Ok(FeedEvent::Closed { reason }) => {
                    warn!(target = "belt_console", %reason, "Notification stream closed");
                    break;
                }
                Err(RecvError::Lagged(n)) => {
                    warn!(target = "belt_console", skipped = n, "Notification printer lagging");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // 5) Periodic server/database probes
    let health_task = (cfg.health_interval_secs > 0).then(|| {
        let client = client.clone();
        let period = Duration::from_secs(cfg.health_interval_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                match client.maintenance().health().await {
                    HealthReport::Healthy => {
                        info!(target = "belt_console", "Server and database reachable")
                    }
                    HealthReport::ServerUnavailable(e) => {
                        error!(target = "belt_console", error = %e, "Server is not responding")
                    }
                    HealthReport::DatabaseUnavailable(e) => {
                        error!(target = "belt_console", error = %e, "Database is not responding")
                    }
                }
            }
        })
    });

    // Ctrl+C handler to shutdown gracefully
    if let Err(e) = signal::ctrl_c().await {
        error!(target = "belt_console", error = %e, "Failed to listen for Ctrl+C");
    }
    info!(target = "belt_console", "Shutting down...");

    feed_handle.abort();
    printer_task.abort();
    if let Some(handle) = health_task {
        handle.abort();
    }
    Ok(())
}
