//! Document links attached to each route.

use serde::Serialize;
use serde_json::{Value, json};

pub const SCHEDULE_LINK_LABEL: &str = "Open Schedule PDF";
pub const MAP_LINK_LABEL: &str = "Open Map PDF";

/// Where per-route schedule PDFs are published, keyed by the legacy route id.
pub const SCHEDULE_URL_BASE: &str = "https://s3.amazonaws.com/schedules.septa.org/current/";

/// Where per-route map PDFs are published, keyed by the current route id.
pub const ROUTE_MAP_URL_BASE: &str = "https://www5.septa.org/wp-content/uploads/route/maps/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Schedule,
    Map,
}

impl DocumentKind {
    pub fn link_label(self) -> &'static str {
        match self {
            DocumentKind::Schedule => SCHEDULE_LINK_LABEL,
            DocumentKind::Map => MAP_LINK_LABEL,
        }
    }
}

/// A single schedule or map PDF link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub kind: DocumentKind,
    pub title: String,
    pub url: String,
    pub link_label: &'static str,
}

impl Document {
    pub fn schedule(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(DocumentKind::Schedule, title, url)
    }

    pub fn map(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(DocumentKind::Map, title, url)
    }

    fn new(kind: DocumentKind, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            url: url.into(),
            link_label: kind.link_label(),
        }
    }
}

// Field names follow the routes feed, not Rust naming.
impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        json!({
            "type": doc.kind,
            "title": doc.title,
            "url": doc.url,
            "linkLabel": doc.link_label,
        })
    }
}
