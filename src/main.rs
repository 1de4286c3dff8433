//! SOS Beacon - main entry point.
//!
//! A thin command-line presentation layer over the alert core: it resolves
//! the logged-in user, refreshes the location in the background, shows the
//! confirmation gate, and renders the dispatch report.

use anyhow::Result;
use sos_beacon::services::{spawn_alert, spawn_location_refresh};
use sos_beacon::{
    AlertService, AlertServiceImpl, Config, ContactRepository, DispatchEngine,
    JsonContactRepository, JsonUserRepository, LocationAcquirer, Metrics, SystemUriLauncher,
    UriLauncher, UserRepository, UserService,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr so report output on stdout stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let contacts =
        Arc::new(JsonContactRepository::open(&config.data_dir)?) as Arc<dyn ContactRepository>;
    let users = Arc::new(JsonUserRepository::open(&config.data_dir)?) as Arc<dyn UserRepository>;
    let launcher = Arc::new(SystemUriLauncher) as Arc<dyn UriLauncher>;
    let metrics = Metrics::new();

    let acquirer = LocationAcquirer::new(&config, launcher.clone(), metrics.clone());
    let engine = DispatchEngine::with_defaults(&config, launcher, metrics);
    let service = Arc::new(AlertServiceImpl::new(
        &config,
        contacts.clone(),
        users.clone(),
        acquirer,
        engine,
    )) as Arc<dyn AlertService>;

    let user_service = UserService::new(users);
    let Some(user) = user_service.current_user()? else {
        eprintln!("No active session. Register or log in first.");
        return Ok(());
    };
    println!("Logged in as {} <{}>", user.full_name, user.email);

    // Kick the location refresh off in the background; the result arrives
    // once, after the whole acquisition has finished.
    let location_rx = spawn_location_refresh(service.clone(), Some(user.email.clone()));

    let saved = contacts.load(&user.email)?;
    if saved.is_empty() {
        println!("No saved contacts to send SOS to.");
        return Ok(());
    }

    match location_rx.await {
        Ok(Ok(resolved)) => info!(
            "Location ready via {:?}: ({:.6}, {:.6})",
            resolved.source, resolved.coordinates.latitude, resolved.coordinates.longitude
        ),
        Ok(Err(e)) => warn!("Could not get location: {} (using last known)", e),
        Err(_) => warn!("Location task dropped (using last known)"),
    }

    // Confirmation gate: the engine itself never prompts.
    print!(
        "This will open {} messaging tab(s). You must press Send in each one. Continue? [y/N] ",
        saved.len()
    );
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    if !answer.trim().eq_ignore_ascii_case("y") {
        println!("SOS cancelled.");
        return Ok(());
    }

    let report_rx = spawn_alert(service, user.email.clone(), user.full_name.clone());
    let report = match report_rx.await {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            error!("Dispatch failed: {}", e);
            return Err(e.into());
        }
        Err(_) => {
            error!("Dispatch task dropped");
            return Ok(());
        }
    };

    println!("{} Click Send in each tab!", report.summary());
    if !report.failed.is_empty() {
        println!("The following contacts were not reached:");
        for outcome in &report.failed {
            let reason = outcome
                .failure
                .map(|f| f.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "  - {} ({}) - {}",
                outcome.contact.name, outcome.contact.phone_raw, reason
            );
        }
        println!(
            "Edit these contacts so numbers include the country code and only digits \
             (e.g., 919876543210)."
        );
    }

    Ok(())
}
