use anyhow::{Context, Result};
use mixcd_compose::{Config, SpotifyClient};

use super::{credential, describe_track};

pub async fn run_now_playing(config: &Config) -> Result<()> {
    let credential = credential(config)?;
    let client = SpotifyClient::new(config).context("Failed to create catalog client")?;

    match client
        .currently_playing(&credential)
        .await
        .context("Failed to read playback state")?
    {
        Some(track) => {
            println!("Now playing: {}", describe_track(&track));
            println!("\nRun 'mixcd compose {}' to build a mix from it.", track.id);
        }
        None => println!("Nothing is playing right now."),
    }

    Ok(())
}
