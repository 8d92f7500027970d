use phantomlink_core::config::{self, Config};

fn mask(value: &Option<String>) -> String {
    match value {
        Some(secret) if secret.chars().count() > 4 => {
            let head: String = secret.chars().take(4).collect();
            format!("{head}… ✓")
        }
        Some(_) => "set ✓".to_string(),
        None => "✗ (not set)".to_string(),
    }
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env();

    println!("phantomlink status");
    println!("==================");
    println!();

    println!("Credentials:");
    println!(
        "  {:<24} {}",
        config::ENV_API_KEY,
        mask(&config.phantombuster_api_key)
    );
    println!(
        "  {:<24} {}",
        config::ENV_SESSION_COOKIE,
        mask(&config.linkedin_session_cookie)
    );
    println!(
        "  {:<24} {}",
        config::ENV_BROWSER_AGENT,
        mask(&config.linkedin_browser_agent)
    );
    println!();

    println!("Polling:");
    println!("  max_retries:      {}", config.max_retries);
    println!("  retry_delay_secs: {}", config.retry_delay_secs);
    println!();

    match config.credentials() {
        Ok(_) => println!("Ready."),
        Err(err) => println!("Not ready: {err}"),
    }

    Ok(())
}
