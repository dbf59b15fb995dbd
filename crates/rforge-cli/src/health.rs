//! # Health CLI — Probe the backend.

use anyhow::Result;
use rforge_client::ForgeClient;

/// Execute the health subcommand. Exit code 0 only for a healthy backend.
pub async fn run_health(client: &ForgeClient) -> Result<u8> {
    match client.health().check().await {
        Ok(health) if health.is_healthy() => {
            println!("{}: {}", health.service, health.status);
            Ok(0)
        }
        Ok(health) => {
            println!("{}: {} (unhealthy)", health.service, health.status);
            Ok(1)
        }
        Err(e) => {
            tracing::warn!(error = %e, "health probe failed");
            println!("backend unreachable: {e}");
            Ok(1)
        }
    }
}
