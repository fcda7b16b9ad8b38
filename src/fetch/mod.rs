//! Retrieval of the routes feed.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::parser::parse_routes;
use crate::route::Route;

/// The agency's published routes feed.
pub const ROUTES_FEED_URL: &str = "https://s3.amazonaws.com/flat-api.septa.org/metro/routes.json";

/// Whether `source` names an HTTP(S) resource rather than a local file.
pub fn is_remote_source(source: &str) -> bool {
    reqwest::Url::parse(source).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Issues a GET for `url` and returns the body. Non-success statuses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse::<reqwest::Url>().with_context(|| format!("invalid feed URL '{url}'"))?,
    );

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("request to '{url}' failed"))?
        .error_for_status()?;
    debug!(status = %resp.status(), "Feed responded");

    Ok(resp.bytes().await?.to_vec())
}

/// Fetches and parses the routes feed at `url`, keeping feed order.
#[tracing::instrument(skip(client))]
pub async fn fetch_routes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<Route>> {
    let bytes = fetch_bytes(client, url).await?;
    let routes = parse_routes(&bytes)?;
    info!(routes = routes.len(), bytes = bytes.len(), "Routes feed fetched");
    Ok(routes)
}
