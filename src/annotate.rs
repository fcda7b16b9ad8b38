//! Route annotation: frequent-service flag and document links.
//!
//! All route knowledge lives in the static tables below. Every lookup miss
//! falls through to a default derived from the route's own fields, so
//! annotation never fails.

use serde_json::Value;
use tracing::debug;

use crate::documents::{Document, ROUTE_MAP_URL_BASE, SCHEDULE_URL_BASE};
use crate::route::Route;

/// Bus and trolley routes marketed as frequent service.
pub const FREQUENT_BUS_ROUTE_IDS: &[&str] = &[
    "3", "6", "17", "18", "21", "23", "33", "45", "46", "47", "48", "52", "56", "58", "60", "66",
    "70", "79", "108", "113", "G", "L", "R",
];

/// Current route ids mapped to the ids their schedule PDFs are still filed under.
pub const NEW_TO_OLD_ROUTE_IDS: &[(&str, &str)] = &[
    ("T1", "10"),
    ("T1 Bus", "10"),
    ("T2", "34"),
    ("T2 Bus", "34"),
    ("T3", "13"),
    ("T3B", "13"),
    ("T3 Bus", "13"),
    ("T4", "11"),
    ("T4 Bus", "11"),
    ("T5", "36"),
    ("T5 Bus", "36"),
    ("G1", "15"),
    ("D1", "101"),
    ("D2", "102"),
    ("L1", "MFL"),
    ("B1", "BSL"),
    ("B2", "BSL"),
    ("B3", "BSL"),
    ("M1", "NHSL"),
];

pub const RAIL_MAP_TITLE: &str = "Regional Rail System Map (PDF)";
pub const RAIL_MAP_URL: &str = "https://www5.septa.org/wp-content/uploads/travel/line-map-rr.pdf";

/// A set of routes that share one system map.
#[derive(Debug)]
pub struct MapGroup {
    pub route_ids: &'static [&'static str],
    pub title: &'static str,
    pub url: &'static str,
}

/// Non-rail routes whose map is a line or system map rather than a per-route PDF.
pub const MAP_GROUPS: &[MapGroup] = &[
    MapGroup {
        route_ids: &[
            "T1", "T2", "T3", "T3B", "T3 Bus", "T4", "T4 Bus", "T5", "T5 Bus", "G1",
        ],
        title: "Trolley Lines Map (PDF)",
        url: "https://wwww.septa.org/wp-content/uploads/travel/line-map-trolley.pdf",
    },
    MapGroup {
        route_ids: &["D1", "D2"],
        title: "Route 101 & 102 Map (PDF)",
        url: "https://wwww.septa.org/wp-content/uploads/travel/line-map-101-102.pdf",
    },
    MapGroup {
        route_ids: &["B1", "B2", "B3"],
        title: "Broad Street Line Map (PDF)",
        url: "https://wwww.septa.org/wp-content/uploads/travel/line-map-bsl.pdf",
    },
    MapGroup {
        route_ids: &["L1"],
        title: "Market-Frankford Line Map (PDF)",
        url: "https://wwww.septa.org/wp-content/uploads/travel/line-map-mfl.pdf",
    },
    MapGroup {
        route_ids: &["M1"],
        title: "Norristown High Speed Line Map (PDF)",
        url: "https://wwww.septa.org/wp-content/uploads/travel/line-map-nhsl.pdf",
    },
];

/// A combined schedule covering several routes through one station area.
#[derive(Debug)]
pub struct Corridor {
    pub name: &'static str,
    pub route_ids: &'static [&'static str],
    pub url: &'static str,
}

impl Corridor {
    pub fn document(&self) -> Document {
        Document::schedule(format!("{} Combined Schedule (PDF)", self.name), self.url)
    }
}

// Glenside and Fern Rock list the same lines today but are published
// separately and can diverge.
pub const CORRIDORS: &[Corridor] = &[
    Corridor {
        name: "Glenside",
        route_ids: &["WAR", "WTR", "LAN"],
        url: "https://s3.amazonaws.com/schedules.septa.org/current/GLN.pdf",
    },
    Corridor {
        name: "Fern Rock",
        route_ids: &["WAR", "WTR", "LAN"],
        url: "https://s3.amazonaws.com/schedules.septa.org/current/FERN.pdf",
    },
    Corridor {
        name: "Penn Medicine",
        route_ids: &["WIL", "MED", "AIR"],
        url: "https://s3.amazonaws.com/schedules.septa.org/current/PENN.pdf",
    },
];

pub fn is_frequent_bus(route_id: Option<&str>) -> bool {
    route_id.is_some_and(|id| FREQUENT_BUS_ROUTE_IDS.contains(&id))
}

/// Returns the id the route's schedule PDF is filed under.
pub fn old_route_id(route_id: &str) -> &str {
    NEW_TO_OLD_ROUTE_IDS
        .iter()
        .find(|(new, _)| *new == route_id)
        .map_or(route_id, |(_, old)| *old)
}

pub fn map_group(route_id: &str) -> Option<&'static MapGroup> {
    MAP_GROUPS
        .iter()
        .find(|g| g.route_ids.iter().any(|id| *id == route_id))
}

/// Combined-schedule corridors the route belongs to, in publication order.
pub fn corridors(route_id: &str) -> impl Iterator<Item = &'static Corridor> + '_ {
    CORRIDORS
        .iter()
        .filter(move |c| c.route_ids.iter().any(|id| *id == route_id))
}

fn bus_prefix(route: &Route) -> &'static str {
    if route.is_bus() { "Bus " } else { "" }
}

pub fn schedule_document(route: &Route) -> Document {
    let route_id = route.route_id_text();
    let old_id = old_route_id(&route_id);

    Document::schedule(
        format!("{}{} Schedule (PDF)", bus_prefix(route), route.short_name_text()),
        format!("{SCHEDULE_URL_BASE}{old_id}.pdf"),
    )
}

pub fn map_document(route: &Route) -> Document {
    if route.is_rail() {
        return Document::map(RAIL_MAP_TITLE, RAIL_MAP_URL);
    }

    match route.route_id().and_then(map_group) {
        Some(group) => Document::map(group.title, group.url),
        None => Document::map(
            format!("{}{} Map (PDF)", bus_prefix(route), route.short_name_text()),
            format!("{ROUTE_MAP_URL_BASE}{}.pdf", route.route_id_text()),
        ),
    }
}

/// All documents for a route: schedule, map, then any combined schedules.
pub fn documents(route: &Route) -> Vec<Document> {
    let mut docs = vec![schedule_document(route), map_document(route)];

    if let Some(route_id) = route.route_id() {
        docs.extend(corridors(route_id).map(Corridor::document));
    }

    docs
}

/// Adds `is_frequent_bus` and `documents` to a route, leaving every other field as is.
pub fn annotate(mut route: Route) -> Route {
    let frequent = is_frequent_bus(route.route_id());
    let docs = documents(&route);

    debug!(
        route_id = route.route_id().unwrap_or_default(),
        frequent,
        documents = docs.len(),
        "Annotated route"
    );

    route.insert("is_frequent_bus", Value::Bool(frequent));
    route.insert(
        "documents",
        Value::Array(docs.into_iter().map(Value::from).collect()),
    );
    route
}

pub fn annotate_all(routes: Vec<Route>) -> Vec<Route> {
    routes.into_iter().map(annotate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::DocumentKind;
    use serde_json::json;

    fn route(value: Value) -> Route {
        serde_json::from_value(value).unwrap()
    }

    fn bus(id: &str) -> Route {
        route(json!({ "route_id": id, "route_type": 3, "route_short_name": id }))
    }

    #[test]
    fn test_frequent_bus_membership() {
        assert!(is_frequent_bus(Some("47")));
        assert!(is_frequent_bus(Some("G")));
        assert!(!is_frequent_bus(Some("99")));
        assert!(!is_frequent_bus(None));
    }

    #[test]
    fn test_old_route_id_lookup() {
        assert_eq!(old_route_id("T1"), "10");
        assert_eq!(old_route_id("T3 Bus"), "13");
        assert_eq!(old_route_id("B2"), "BSL");
        assert_eq!(old_route_id("99"), "99");
    }

    #[test]
    fn test_schedule_uses_old_id() {
        let doc = schedule_document(&route(json!({
            "route_id": "T1",
            "route_type": 0,
            "route_short_name": "T1",
        })));
        assert_eq!(doc.title, "T1 Schedule (PDF)");
        assert!(doc.url.ends_with("/10.pdf"));

        let doc = schedule_document(&bus("99"));
        assert!(doc.url.ends_with("/99.pdf"));
    }

    #[test]
    fn test_plain_bus_route() {
        let docs = documents(&bus("47"));

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].title, "Bus 47 Schedule (PDF)");
        assert_eq!(
            docs[0].url,
            "https://s3.amazonaws.com/schedules.septa.org/current/47.pdf"
        );
        assert_eq!(docs[1].kind, DocumentKind::Map);
        assert_eq!(docs[1].title, "Bus 47 Map (PDF)");
        assert_eq!(
            docs[1].url,
            "https://www5.septa.org/wp-content/uploads/route/maps/47.pdf"
        );
    }

    #[test]
    fn test_rail_map_ignores_route_id() {
        let r = route(json!({
            "route_id": "T1",
            "route_type": 2,
            "route_short_name": "Trenton",
        }));
        let doc = map_document(&r);
        assert_eq!(doc.title, "Regional Rail System Map (PDF)");
        assert_eq!(doc.url, RAIL_MAP_URL);
    }

    #[test]
    fn test_map_groups() {
        let cases = [
            ("T3 Bus", "Trolley Lines Map (PDF)"),
            ("G1", "Trolley Lines Map (PDF)"),
            ("D2", "Route 101 & 102 Map (PDF)"),
            ("B3", "Broad Street Line Map (PDF)"),
            ("L1", "Market-Frankford Line Map (PDF)"),
            ("M1", "Norristown High Speed Line Map (PDF)"),
        ];

        for (id, title) in cases {
            assert_eq!(map_document(&bus(id)).title, title, "route {id}");
        }
    }

    #[test]
    fn test_trolley_bus_variant_without_map_group_gets_route_map() {
        let doc = map_document(&bus("T1 Bus"));
        assert_eq!(doc.title, "Bus T1 Bus Map (PDF)");
        assert!(doc.url.ends_with("/route/maps/T1 Bus.pdf"));
    }

    #[test]
    fn test_float_bus_type_and_missing_short_name() {
        let r: Route = serde_json::from_str(r#"{"route_id":"47","route_type":3.0}"#).unwrap();
        assert_eq!(schedule_document(&r).title, "Bus undefined Schedule (PDF)");
        assert_eq!(map_document(&r).title, "Bus undefined Map (PDF)");

        let r: Route =
            serde_json::from_str(r#"{"route_id":"47","route_type":3.0,"route_short_name":"47"}"#)
                .unwrap();
        assert_eq!(schedule_document(&r).title, "Bus 47 Schedule (PDF)");
    }

    #[test]
    fn test_non_bus_titles_have_no_prefix() {
        let r = route(json!({ "route_id": "X9", "route_type": 0, "route_short_name": "X9" }));
        assert_eq!(schedule_document(&r).title, "X9 Schedule (PDF)");
        assert_eq!(map_document(&r).title, "X9 Map (PDF)");
    }

    #[test]
    fn test_corridor_documents_in_order() {
        let docs = documents(&route(json!({
            "route_id": "WAR",
            "route_type": 2,
            "route_short_name": "Warminster",
        })));

        let titles: Vec<_> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Warminster Schedule (PDF)",
                "Regional Rail System Map (PDF)",
                "Glenside Combined Schedule (PDF)",
                "Fern Rock Combined Schedule (PDF)",
            ]
        );
        assert!(docs[2..].iter().all(|d| d.kind == DocumentKind::Schedule));
    }

    #[test]
    fn test_penn_medicine_corridor() {
        let docs = documents(&route(json!({ "route_id": "AIR", "route_type": 2 })));
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[2].title, "Penn Medicine Combined Schedule (PDF)");
        assert!(docs[2].url.ends_with("/PENN.pdf"));
    }

    #[test]
    fn test_annotate_keeps_existing_fields() {
        let original = json!({
            "route_id": "47",
            "route_type": 3,
            "route_short_name": "47",
            "route_color": "FFFFFF",
            "extra": { "nested": [1, 2] },
        });
        let annotated = annotate(route(original.clone()));

        for (key, value) in original.as_object().unwrap() {
            assert_eq!(annotated.get(key), Some(value), "field {key}");
        }
        assert_eq!(annotated.get("is_frequent_bus"), Some(&json!(true)));

        let docs = annotated.get("documents").unwrap().as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["type"], "schedule");
        assert_eq!(docs[0]["linkLabel"], "Open Schedule PDF");
        assert_eq!(docs[1]["type"], "map");
        assert_eq!(docs[1]["linkLabel"], "Open Map PDF");
    }

    #[test]
    fn test_annotate_appends_new_keys_last() {
        let annotated = annotate(bus("99"));
        let keys: Vec<_> = annotated.fields().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "route_id",
                "route_type",
                "route_short_name",
                "is_frequent_bus",
                "documents",
            ]
        );
    }

    #[test]
    fn test_annotate_all_preserves_order() {
        let routes = annotate_all(vec![bus("3"), bus("99"), bus("L")]);
        let ids: Vec<_> = routes.iter().map(|r| r.route_id().unwrap()).collect();
        assert_eq!(ids, vec!["3", "99", "L"]);
        assert_eq!(routes[1].get("is_frequent_bus"), Some(&json!(false)));
    }
}
