//! TTL Cache demo
//!
//! Memoizes a slow simulated lookup through the cache and reports hit/miss
//! statistics until interrupted.

use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{Cache, CacheConfig};

/// Keys the demo cycles through.
const USERS: [&str; 4] = ["ada", "grace", "edsger", "barbara"];

/// Pause between lookup rounds.
const ROUND_INTERVAL: Duration = Duration::from_millis(750);

/// Entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache (starts the background sweeper)
/// 4. Run lookup rounds until SIGINT/SIGTERM
/// 5. Stop the sweeper and print final statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: ttl={:?}, cleanup_interval={:?}",
        config.ttl,
        config.effective_cleanup_interval()
    );

    let cache: Cache = Cache::from_config(&config);

    let mut ticker = tokio::time::interval(ROUND_INTERVAL);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut round: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                round += 1;
                run_round(&cache, round).await;
            }
            _ = &mut shutdown => break,
        }
    }

    cache.shutdown();
    warn!("Cleanup task stopped");

    let stats = serde_json::to_string_pretty(&cache.stats())
        .context("failed to serialize cache statistics")?;
    info!("Final statistics:\n{}", stats);
    Ok(())
}

/// Looks up one user per round, hitting the slow path only on a cache miss.
async fn run_round(cache: &Cache, round: u64) {
    let user = USERS[(round as usize) % USERS.len()];
    let key = format!("user:{}", user);

    let followers = match cache.get(&key) {
        Some(entry) => {
            info!(round, user, "cache hit");
            entry.value().must_map(None).get("followers").map_or(0, |v| v.must_u64(None))
        }
        None => {
            info!(round, user, "cache miss, fetching");
            let profile = fetch_profile(user, round).await;
            let followers = profile["followers"].as_u64().unwrap_or_default();
            cache.set(key, profile);
            followers
        }
    };

    let stats = cache.stats();
    info!(
        followers,
        entries = cache.count(),
        hit_rate = stats.hit_rate(),
        "round {} complete",
        round
    );
}

/// Stand-in for a remote call.
async fn fetch_profile(user: &str, round: u64) -> serde_json::Value {
    tokio::time::sleep(Duration::from_millis(200)).await;
    serde_json::json!({
        "login": user,
        "followers": user.len() as u64 * 100 + round,
        "fetched_in_round": round,
    })
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
