//! Wiring between the configuration and the engine

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use netwatch::audit::truncated_now;
use netwatch::{
    AuditOutcome, Auditor, Category, Coordinator, HttpProbe, LinkStatus, PingProbe, Probe, Registry,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::Config;
use crate::notify;
use crate::tui;

/// Server and website registries, loaded once before polling or auditing
pub struct Targets {
    pub servers: Registry,
    pub websites: Registry,
}

/// Probes for each category, built from the probe settings
pub struct Probes {
    pub ping: Arc<dyn Probe>,
    pub http: Arc<dyn Probe>,
}

pub fn load_targets(config: &Config) -> Result<Targets> {
    let servers = config.server_registry().context("Failed to load servers")?;
    let websites = config.website_registry().context("Failed to load websites")?;

    info!(servers = servers.size(), websites = websites.size(), "Targets loaded");
    if servers.is_empty() && websites.is_empty() {
        warn!("No servers or websites configured, nothing will be probed");
    }

    Ok(Targets { servers, websites })
}

pub fn build_probes(config: &Config) -> Result<Probes> {
    let ping = PingProbe::new(config.ping_command(), config.ping_retry());
    let http = HttpProbe::new(config.http_timeout(), config.http_retry())
        .context("Failed to build HTTP client")?;

    Ok(Probes { ping: Arc::new(ping), http: Arc::new(http) })
}

/// Continuous mode, drawing the status board or logging when headless
pub async fn watch(config: &Config, headless: bool) -> Result<()> {
    let Targets { servers, websites } = load_targets(config)?;
    let probes = build_probes(config)?;

    if headless {
        watch_headless(&servers, &websites, probes, config.tick(), config.watch.event_buffer).await
    } else {
        tui::run_status_board(
            servers,
            websites,
            probes.ping,
            probes.http,
            config.tick(),
            config.watch.event_buffer,
        )
        .await
    }
}

async fn watch_headless(
    servers: &Registry,
    websites: &Registry,
    probes: Probes,
    tick: Duration,
    buffer: usize,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(buffer);
    let server_pool = Coordinator::start(servers, probes.ping, tick, tx.clone());
    let website_pool = Coordinator::start(websites, probes.http, tick, tx);
    if server_pool.is_empty() && website_pool.is_empty() {
        return Ok(());
    }
    info!(loops = server_pool.len() + website_pool.len(), "Watching, press Ctrl-C to stop");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Interrupted, stopping poll loops");
                break;
            }
            Some(transition) = rx.recv() => {
                let registry = match transition.category {
                    Category::Server => servers,
                    Category::Website => websites,
                };
                let name = registry.by_index(transition.index).map(|t| t.name.as_str()).unwrap_or("?");

                match transition.status {
                    LinkStatus::Offline => warn!(category = %transition.category, name, "OFFLINE"),
                    _ => info!(category = %transition.category, name, "{}", transition.status),
                }
            }
        }
    }

    Coordinator::shutdown_all([server_pool, website_pool]).await;
    Ok(())
}

/// Batch mode, once or every revision interval until Ctrl-C
pub async fn audit(config: &Config, repeat: bool) -> Result<()> {
    let Targets { servers, websites } = load_targets(config)?;
    let probes = build_probes(config)?;
    let sink = notify::build_sink(config)?;

    let auditor = Auditor::new(config.notify_policy()?, sink)
        .with_suite(servers, probes.ping)
        .with_suite(websites, probes.http);

    if !repeat {
        log_outcome(auditor.run_pass(truncated_now()).await);
        return Ok(());
    }

    let mut interval = tokio::time::interval(config.revision_interval());
    info!(
        every_minutes = config.audit.revision_interval_minutes,
        "Auditing repeatedly, press Ctrl-C to stop"
    );

    // Created once so a Ctrl-C during a pass is seen right after it
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Interrupted, no further audits");
                return Ok(());
            }
            _ = interval.tick() => {
                log_outcome(auditor.run_pass(truncated_now()).await);
            }
        }
    }
}

fn log_outcome(outcome: AuditOutcome) {
    match outcome {
        AuditOutcome::Notified(kind) => info!(%kind, "Report sent"),
        AuditOutcome::Skipped => info!("Nothing to report"),
        AuditOutcome::DispatchFailed(kind) => warn!(%kind, "Report could not be sent"),
    }
}
