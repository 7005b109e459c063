use anyhow::Result;
use mixcd_compose::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let path = config::config_file_path();
    println!("Config file: {}", path.display());
    println!(
        "File exists: {}\n",
        if path.exists() { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  access_token: {}", redact(config.access_token.as_deref()));
    println!(
        "  client_id: {}",
        config.client_id.as_deref().unwrap_or("<not set>")
    );
    println!("  redirect_uri: {}", config.redirect_uri);
    println!("  api_base_url: {}", config.api_base_url);
    println!("  accounts_base_url: {}", config.accounts_base_url);
    println!("  market: {}", config.market);
    println!("  request_timeout_secs: {}", config.request_timeout_secs);
    println!(
        "  requests_per_second: {}",
        config
            .requests_per_second
            .map_or_else(|| "unlimited".to_string(), |r| r.to_string())
    );
    println!("  logging.level: {:?}", config.logging.level());
    println!("  logging.coloured: {}", config.logging.coloured());
    println!("  logging.output: {:?}", config.logging.output());

    println!("\nPriority: CLI args > ENV vars (MIXCD_*) > Config file > Defaults");

    Ok(())
}

fn redact(token: Option<&str>) -> String {
    match token {
        None | Some("") => "<not set>".to_string(),
        Some(t) if t.len() <= 8 => "<set>".to_string(),
        Some(t) => format!("{}…", t.chars().take(6).collect::<String>()),
    }
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure mixcd.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        assert_eq!(redact(None), "<not set>");
        assert_eq!(redact(Some("")), "<not set>");
        assert_eq!(redact(Some("short")), "<set>");
        assert_eq!(redact(Some("BQDxyz1234567890")), "BQDxyz…");
    }
}
