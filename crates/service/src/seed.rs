//! Initial data loaded at startup.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::place::domain::PlaceRecord;
use crate::place::repository::PlaceRepository;
use crate::place::PlaceService;

pub fn parse_seed(content: &str) -> anyhow::Result<Vec<PlaceRecord>> {
    serde_json::from_str(content).context("seed file must be a JSON array of places")
}

/// Load places from a JSON file when no place is stored yet.
/// Returns the number of places inserted.
pub async fn seed_if_empty<R: PlaceRepository>(svc: &PlaceService<R>, path: &Path) -> anyhow::Result<usize> {
    if svc.count().await? > 0 {
        info!(path = %path.display(), "database not empty, seed skipped");
        return Ok(0);
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read seed file {}", path.display()))?;
    let places = parse_seed(&content)?;
    if places.is_empty() {
        return Ok(0);
    }
    let saved = svc.save_places(places).await?;
    info!(path = %path.display(), count = saved.len(), "seed loaded");
    Ok(saved.len())
}
