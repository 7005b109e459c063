use anyhow::{Context, Result};
use mixcd_compose::{random_title, Composer, Composition, Config, SpotifyClient};
use mixcd_core::model::TrackId;

use super::credential;

pub async fn run_compose(config: &Config, seed_id: &str, target: usize, json: bool) -> Result<()> {
    let credential = credential(config)?;
    let client = SpotifyClient::new(config).context("Failed to create catalog client")?;
    let composer = Composer::new(client).with_target_len(target);

    log::info!("Composing mix from seed {}", seed_id);
    let composition = composer
        .compose(&TrackId::new(seed_id), &credential)
        .await
        .context("Failed to compose mix")?;

    let title = random_title();

    if json {
        let output = serde_json::json!({
            "title": title,
            "genre": composition.genre,
            "years": composition.years.map(|y| y.to_string()),
            "tracks": composition.tracks,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_composition(&title, &composition);
    }

    Ok(())
}

fn print_composition(title: &str, composition: &Composition) {
    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count()));

    let genre = composition
        .genre
        .map_or_else(|| "unknown".to_string(), |g| g.to_string());
    let era = composition
        .years
        .map_or_else(|| "any".to_string(), |y| y.to_string());
    println!("Genre: {}   Era: {}\n", genre, era);

    for (i, track) in composition.tracks.iter().enumerate() {
        println!("{:>2}. {} - {}", i + 1, track.name, track.artist);
        if let Some(url) = &track.external_url {
            println!("    {}", url);
        }
    }

    println!("\nSources:");
    for stage in &composition.stages {
        println!(
            "  {:<24} +{:<3} (pool {})",
            stage.stage, stage.fetched, stage.pool_size
        );
    }

    if composition.tracks.len() < 2 {
        println!("\nNo similar tracks were found; the mix holds only the seed.");
    }
}
