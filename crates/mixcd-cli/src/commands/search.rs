use anyhow::{Context, Result};
use mixcd_compose::{Config, SpotifyClient};

use super::{credential, describe_track};

pub const DEFAULT_LIMIT: usize = 10;

/// Free-text track search for picking a seed.
pub async fn run_search(config: &Config, query: &str, limit: usize) -> Result<()> {
    let credential = credential(config)?;
    let client = SpotifyClient::new(config).context("Failed to create catalog client")?;

    let tracks = client
        .search(query, limit, &credential)
        .await
        .with_context(|| format!("Search for '{}' failed", query))?;

    if tracks.is_empty() {
        println!("No tracks found for '{}'", query);
        return Ok(());
    }

    println!("Found {} tracks:\n", tracks.len());
    for (i, track) in tracks.iter().enumerate() {
        println!("{:>2}. {}", i + 1, describe_track(track));
    }
    println!("\nRun 'mixcd compose <ID>' with one of the ids above.");

    Ok(())
}
