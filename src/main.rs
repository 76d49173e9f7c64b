mod client;
mod decode;
mod diary;
mod enrich;
mod model;
mod output;
mod parser;

use std::path::Path;
use std::time::Instant;

use clap::Parser;

use client::SessionClient;
use enrich::{Enricher, RetryPolicy};

const BASE_URL: &str = "https://lezec.cz";

#[derive(Parser)]
#[command(name = "lezec_scraper", about = "Lezec.cz climbing diary exporter")]
struct Cli {
    /// Skip this many diary entries before exporting
    #[arg(long, default_value_t = 0)]
    offset: usize,
    /// Max entries to export (default: everything from the offset)
    #[arg(short = 'n', long)]
    limit: Option<usize>,
    /// Look up sector/location for each exported entry
    #[arg(long)]
    enrich: bool,
}

struct Credentials {
    username: String,
    password: String,
}

/// Credentials come from the environment; a `.env` file is loaded
/// before this runs. Checked before the first network call.
fn load_credentials() -> anyhow::Result<Credentials> {
    let username = std::env::var("LEZEC_USER").ok().filter(|v| !v.is_empty());
    let password = std::env::var("LEZEC_PASS").ok().filter(|v| !v.is_empty());
    match (username, password) {
        (Some(username), Some(password)) => Ok(Credentials { username, password }),
        _ => anyhow::bail!(
            "Missing LEZEC_USER or LEZEC_PASS (set them in the environment or a .env file)"
        ),
    }
}

/// Select the contiguous window `[offset, offset+limit)`. An offset past
/// the end selects nothing.
fn apply_window<T>(items: Vec<T>, offset: usize, limit: Option<usize>) -> Vec<T> {
    let rest = items.into_iter().skip(offset);
    match limit {
        Some(n) => rest.take(n).collect(),
        None => rest.collect(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let credentials = load_credentials()?;

    let client = SessionClient::new(BASE_URL)?;
    let session = client
        .authenticate(&credentials.username, &credentials.password)
        .await?;
    println!("Logged in to lezec.cz");

    let climbs = diary::fetch_diary(&client, &session).await?;
    println!("Parsed {} diary entries", climbs.len());

    let mut window = apply_window(climbs, cli.offset, cli.limit);

    if cli.enrich {
        let keyed = window.iter().filter(|c| !c.route_key.is_empty()).count();
        println!("Enriching {} entries with route details...", keyed);
        let enricher = Enricher::new(BASE_URL, RetryPolicy::default())?;
        enricher.enrich_all(&mut window).await;
    }

    let path = output::output_path(cli.enrich);
    output::write_climbs(Path::new(path), &window)?;
    println!("Saved {} climbs to {}", window.len(), path);

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_selects_requested_slice() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(apply_window(items, 2, Some(3)), vec![2, 3, 4]);
    }

    #[test]
    fn window_without_limit_runs_to_the_end() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(apply_window(items, 3, None), vec![3, 4]);
    }

    #[test]
    fn window_past_the_end_is_empty() {
        let items: Vec<u32> = (0..4).collect();
        assert!(apply_window(items, 14, Some(3)).is_empty());
    }

    #[test]
    fn limit_larger_than_remainder_is_clamped() {
        let items: Vec<u32> = (0..4).collect();
        assert_eq!(apply_window(items, 2, Some(10)), vec![2, 3]);
    }
}
