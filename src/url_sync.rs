//! Mirrors the filter state into the page's query string.
//!
//! Parsing and serialization are pure so they can be tested on the host;
//! the two `*_address_bar` functions are the only browser touch points.

use crate::filters::{FilterKey, FilterState, FilterValue};
use log::{debug, warn};
use std::collections::HashSet;
use url::form_urlencoded;
use wasm_bindgen::JsValue;

/// Build a filter state from a query string (leading `?` optional).
///
/// Unrecognized parameters are ignored. Values for every key except the
/// free-text search become numbers when they parse as one.
pub fn filters_from_query(query: &str) -> FilterState {
    let mut filters = FilterState::default();
    let query = query.strip_prefix('?').unwrap_or(query);

    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        let Some(key) = FilterKey::from_param(&name) else {
            debug!("Ignoring unrecognized query parameter '{}'", name);
            continue;
        };
        let value = if key.is_free_text() {
            FilterValue::Text(value.into_owned())
        } else {
            FilterValue::coerce(&value)
        };
        filters.set(key, value);
    }
    filters
}

/// Rewrite `existing` so that it carries exactly the non-default filters.
///
/// Foreign parameters keep their position; a filter already present is
/// updated in place, a new one is appended, a default one is dropped.
/// The result has no leading `?` and is empty when nothing remains.
pub fn sync_query(existing: &str, filters: &FilterState) -> String {
    let existing = existing.strip_prefix('?').unwrap_or(existing);
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut written = HashSet::new();

    for (name, value) in form_urlencoded::parse(existing.as_bytes()) {
        match FilterKey::from_param(&name) {
            None => pairs.push((name.into_owned(), value.into_owned())),
            Some(key) => {
                if filters.is_default(key) || !written.insert(key) {
                    continue;
                }
                pairs.push((name.into_owned(), filters.get(key).to_string()));
            }
        }
    }

    for (key, value) in filters.non_default() {
        if written.insert(key) {
            pairs.push((key.as_str().to_string(), value.to_string()));
        }
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Join the pieces of a same-document URL, omitting an empty query.
pub fn compose_url(path: &str, query: &str, hash: &str) -> String {
    if query.is_empty() {
        format!("{}{}", path, hash)
    } else {
        format!("{}?{}{}", path, query, hash)
    }
}

/// Filter state encoded in the current page address.
pub fn load_from_address_bar() -> FilterState {
    match gloo_utils::window().location().search() {
        Ok(search) => filters_from_query(&search),
        Err(e) => {
            warn!("Could not read the page address: {:?}", e);
            FilterState::default()
        }
    }
}

/// Replace the current history entry with one carrying `filters`.
/// Does not navigate or add a history entry.
pub fn write_to_address_bar(filters: &FilterState) {
    let window = gloo_utils::window();
    let location = window.location();
    let (Ok(path), Ok(search), Ok(hash)) = (location.pathname(), location.search(), location.hash())
    else {
        warn!("Could not read the page address; leaving it unchanged");
        return;
    };

    let url = compose_url(&path, &sync_query(&search, filters), &hash);
    let result = window
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url)));
    if let Err(e) = result {
        warn!("Failed to update the address bar: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        assert_eq!(filters_from_query(""), FilterState::default());
        assert_eq!(filters_from_query("?"), FilterState::default());
        assert_eq!(filters_from_query("?page=2&sort=name"), FilterState::default());
    }

    #[test]
    fn recognized_keys_are_coerced() {
        let filters = filters_from_query("?tier=2&state=TX&maxDistance=150&minReviews=abc");
        assert_eq!(filters.get(FilterKey::Tier), &FilterValue::Number(2.0));
        assert_eq!(filters.get(FilterKey::State), &FilterValue::text("TX"));
        assert_eq!(filters.get(FilterKey::MaxDistance), &FilterValue::Number(150.0));
        assert_eq!(filters.get(FilterKey::MinReviews), &FilterValue::text("abc"));
        assert!(filters.get(FilterKey::ServiceType).is_all());
    }

    #[test]
    fn search_stays_text_even_when_numeric() {
        let filters = filters_from_query("search=42&serviceType=cargo");
        assert_eq!(filters.get(FilterKey::Search), &FilterValue::text("42"));
        assert_eq!(filters.get(FilterKey::ServiceType), &FilterValue::text("cargo"));
    }

    #[test]
    fn defaults_produce_an_empty_query() {
        assert_eq!(sync_query("", &FilterState::default()), "");
        let stale = "?search=x&tier=1&state=CA&serviceType=cargo&maxDistance=5&minReviews=3";
        assert_eq!(sync_query(stale, &FilterState::default()), "");
    }

    #[test]
    fn foreign_parameters_survive_and_filters_update_in_place() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Tier, 3.0);
        filters.set(FilterKey::Search, "john's trucking");
        let query = sync_query("?ref=mail&tier=1&utm=x", &filters);
        assert_eq!(query, "ref=mail&tier=3&utm=x&search=john%27s+trucking");
    }

    #[test]
    fn sync_then_load_round_trips() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Search, "Express");
        filters.set(FilterKey::Tier, 2.0);
        filters.set(FilterKey::State, "GA");
        filters.set(FilterKey::ServiceType, "delivery");
        filters.set(FilterKey::MaxDistance, 180.0);
        filters.set(FilterKey::MinReviews, 16.0);

        let query = sync_query("", &filters);
        assert_eq!(filters_from_query(&query), filters);
        // Idempotent: syncing again against the written query changes nothing.
        assert_eq!(sync_query(&query, &filters), query);
    }

    #[test]
    fn composes_urls_without_empty_query() {
        assert_eq!(compose_url("/dashboard", "", ""), "/dashboard");
        assert_eq!(compose_url("/", "tier=1", "#top"), "/?tier=1#top");
    }
}
