//! JSON parser for the routes feed.

use anyhow::{Context, Result};

use crate::route::Route;

/// Decodes the routes feed body: a JSON array of route objects.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON, or are not an array of
/// objects. Nothing else about the records is checked.
pub fn parse_routes(bytes: &[u8]) -> Result<Vec<Route>> {
    serde_json::from_slice(bytes).context("routes feed is not a JSON array of objects")
}
