//! Startup data for the in-memory store.

use anyhow::Context;
use cadence_recur::Occurrence;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SeedFile {
    events: Vec<Occurrence>,
}

/// ## Summary
/// Parses a seed document of the form `{ "events": [...] }`.
///
/// ## Errors
/// Returns an error if the document is not valid JSON or an event is malformed.
pub fn parse_seed(contents: &str) -> anyhow::Result<Vec<Occurrence>> {
    let seed: SeedFile = serde_json::from_str(contents).context("malformed seed document")?;
    Ok(seed.events)
}

/// ## Summary
/// Reads and parses the seed file at `path`.
///
/// ## Errors
/// Returns an error if the file cannot be read or parsed.
pub async fn load_seed_file(path: &str) -> anyhow::Result<Vec<Occurrence>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {path}"))?;
    let events = parse_seed(&contents).with_context(|| format!("in seed file {path}"))?;
    tracing::info!(path, count = events.len(), "Loaded seed events");
    Ok(events)
}
