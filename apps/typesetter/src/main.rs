use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use typesetter::config::Config;
use typesetter::layout::{RenderSession, SimulatedHost};
use typesetter::models::Card;
use typesetter::pipeline::Typesetter;

fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting typesetter v{}", env!("CARGO_PKG_VERSION"));

    let cards = load_cards(Path::new(&config.card_list_path))?;
    info!(cards = cards.len(), path = %config.card_list_path, "Card list loaded");

    let settings = config.engine_settings();
    let typesetter = Typesetter::new(&settings).context("Failed to compile text patterns")?;

    let mut session = RenderSession::open(SimulatedHost::new()).context("Failed to open render host")?;
    let report = typesetter.run_batch(session.host_mut(), &cards);
    let host = session.close().context("Failed to close render host")?;
    info!(finalized = host.finalized().len(), discarded = host.discarded().len(), "Render session closed");

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Reads a JSON array of card records.
fn load_cards(path: &Path) -> Result<Vec<Card>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read card list '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Card list '{}' is not valid JSON", path.display()))
}
