//! Route records as published by the upstream feed.
//!
//! A [`Route`] is kept as the raw JSON object so that every field we do not
//! interpret passes through untouched, in its original order. Typed accessors
//! expose the few fields the annotator reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GTFS `route_type` as used by the annotator.
///
/// Only rail and bus change how documents are titled; every other mode is
/// carried as its raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteType {
    Rail,
    Bus,
    Other(i64),
}

impl From<i64> for RouteType {
    fn from(value: i64) -> Self {
        match value {
            2 => RouteType::Rail,
            3 => RouteType::Bus,
            other => RouteType::Other(other),
        }
    }
}

/// One transit line's record from the routes feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(Map<String, Value>);

impl Route {
    /// The route identifier, if the feed provides it as a string.
    pub fn route_id(&self) -> Option<&str> {
        self.0.get("route_id").and_then(Value::as_str)
    }

    /// The route mode, if the feed provides a whole-number `route_type`.
    ///
    /// `3` and `3.0` are the same mode.
    pub fn route_type(&self) -> Option<RouteType> {
        let value = self.0.get("route_type")?;
        value.as_i64().map(RouteType::from).or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| RouteType::from(f as i64))
        })
    }

    pub fn is_bus(&self) -> bool {
        self.route_type() == Some(RouteType::Bus)
    }

    pub fn is_rail(&self) -> bool {
        self.route_type() == Some(RouteType::Rail)
    }

    /// `route_short_name` rendered for use in titles.
    pub fn short_name_text(&self) -> String {
        display_value(self.0.get("route_short_name"))
    }

    /// `route_id` rendered for use in URLs.
    pub fn route_id_text(&self) -> String {
        display_value(self.0.get("route_id"))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets `key`, replacing any value the feed already carried for it.
    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

// Strings are used verbatim; a missing field renders as `undefined`.
fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
