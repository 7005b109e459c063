use anyhow::{Context, Result};
use mixcd_compose::auth::DEFAULT_SCOPES;
use mixcd_compose::{Config, OAuthClient, PkceChallenge};

/// Print the authorization URL and the verifier needed to redeem the code.
pub fn show_authorize_url(config: &Config) -> Result<()> {
    let client = OAuthClient::new(config).context("Failed to create OAuth client")?;
    let pkce = PkceChallenge::generate();
    let url = client
        .authorize_url(&pkce, DEFAULT_SCOPES)
        .context("Failed to build authorization URL")?;

    println!("Open this URL in a browser and approve access:\n");
    println!("  {}\n", url);
    println!("Keep this verifier for the exchange step:\n");
    println!("  {}\n", pkce.verifier);
    println!("Then run:");
    println!("  mixcd auth exchange --code <CODE> --verifier {}", pkce.verifier);

    Ok(())
}

/// Redeem an authorization code and print the access token.
pub async fn exchange_code(config: &Config, code: &str, verifier: &str) -> Result<()> {
    let client = OAuthClient::new(config).context("Failed to create OAuth client")?;
    let grant = client
        .exchange_code(code, verifier)
        .await
        .context("Token exchange failed")?;

    println!("✓ Access token received (expires {})\n", grant.expires_at);
    println!("{}\n", grant.access_token);
    println!("Use it with --token, MIXCD_ACCESS_TOKEN, or access_token in the config file.");

    Ok(())
}
