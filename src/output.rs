//! Persistence of the annotated routes list.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::route::Route;

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "routes.json";

/// Writes `routes` to `path` as compact JSON, replacing any existing file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display(), routes = routes.len()))]
pub fn write_routes(path: impl AsRef<Path>, routes: &[Route]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec(routes)?;
    debug!(bytes = json.len(), "Routes serialized");

    std::fs::write(path, &json)
        .with_context(|| format!("failed to write routes to '{}'", path.display()))?;

    info!("Routes written");
    Ok(())
}
