//! Filter state store.
//!
//! The dashboard keeps exactly one `FilterState`; every other part of the
//! crate either reads it or receives a clone of it.

use crate::defaults;
use std::fmt;

/// The six recognized filters, in display and query-string order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKey {
    Search,
    Tier,
    State,
    ServiceType,
    MaxDistance,
    MinReviews,
}

impl FilterKey {
    pub const ALL: [FilterKey; 6] = [
        FilterKey::Search,
        FilterKey::Tier,
        FilterKey::State,
        FilterKey::ServiceType,
        FilterKey::MaxDistance,
        FilterKey::MinReviews,
    ];

    /// Name used in the address bar.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Search => "search",
            FilterKey::Tier => "tier",
            FilterKey::State => "state",
            FilterKey::ServiceType => "serviceType",
            FilterKey::MaxDistance => "maxDistance",
            FilterKey::MinReviews => "minReviews",
        }
    }

    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    pub fn default_value(self) -> FilterValue {
        match self {
            FilterKey::Search => FilterValue::Text(String::new()),
            FilterKey::Tier | FilterKey::State | FilterKey::ServiceType => FilterValue::all(),
            FilterKey::MaxDistance => FilterValue::Number(defaults::MAX_DISTANCE),
            FilterKey::MinReviews => FilterValue::Number(defaults::MIN_REVIEWS),
        }
    }

    /// Free-text filters are never coerced to numbers.
    pub fn is_free_text(self) -> bool {
        matches!(self, FilterKey::Search)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter value as produced by a widget or read from the address bar.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(f64),
}

impl FilterValue {
    pub fn all() -> Self {
        FilterValue::Text(defaults::ALL.to_string())
    }

    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    /// Best-effort numeric coercion: anything that parses as a number
    /// (other than NaN) becomes `Number`, the rest stays text verbatim.
    pub fn coerce(raw: &str) -> Self {
        match parse_number(raw) {
            Some(n) => FilterValue::Number(n),
            None => FilterValue::Text(raw.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::Text(s) if s == defaults::ALL)
    }

    /// Numeric view of the value; text is coerced the same way `coerce` does.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) => parse_number(s),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            FilterValue::Number(_) => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            // f64's Display drops the fraction of integral values: 600.0 -> "600"
            FilterValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            FilterValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

/// Numeric reading of `raw` as a browser would coerce it.
///
/// Rust's float parser also accepts `inf`, `infinity` and `nan` in any case;
/// of those only the exact spelling `Infinity` (optionally signed) counts.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) && unsigned != "Infinity" {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Partial update for `FilterState::merge`; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub search: Option<FilterValue>,
    pub tier: Option<FilterValue>,
    pub state: Option<FilterValue>,
    pub service_type: Option<FilterValue>,
    pub max_distance: Option<FilterValue>,
    pub min_reviews: Option<FilterValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    search: FilterValue,
    tier: FilterValue,
    state: FilterValue,
    service_type: FilterValue,
    max_distance: FilterValue,
    min_reviews: FilterValue,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: FilterKey::Search.default_value(),
            tier: FilterKey::Tier.default_value(),
            state: FilterKey::State.default_value(),
            service_type: FilterKey::ServiceType.default_value(),
            max_distance: FilterKey::MaxDistance.default_value(),
            min_reviews: FilterKey::MinReviews.default_value(),
        }
    }
}

impl FilterState {
    pub fn get(&self, key: FilterKey) -> &FilterValue {
        match key {
            FilterKey::Search => &self.search,
            FilterKey::Tier => &self.tier,
            FilterKey::State => &self.state,
            FilterKey::ServiceType => &self.service_type,
            FilterKey::MaxDistance => &self.max_distance,
            FilterKey::MinReviews => &self.min_reviews,
        }
    }

    fn slot_mut(&mut self, key: FilterKey) -> &mut FilterValue {
        match key {
            FilterKey::Search => &mut self.search,
            FilterKey::Tier => &mut self.tier,
            FilterKey::State => &mut self.state,
            FilterKey::ServiceType => &mut self.service_type,
            FilterKey::MaxDistance => &mut self.max_distance,
            FilterKey::MinReviews => &mut self.min_reviews,
        }
    }

    /// Overwrite one filter. Values are stored as given, no validation.
    pub fn set(&mut self, key: FilterKey, value: impl Into<FilterValue>) {
        *self.slot_mut(key) = value.into();
    }

    pub fn merge(&mut self, patch: FilterPatch) {
        let FilterPatch {
            search,
            tier,
            state,
            service_type,
            max_distance,
            min_reviews,
        } = patch;
        let updates = [
            (FilterKey::Search, search),
            (FilterKey::Tier, tier),
            (FilterKey::State, state),
            (FilterKey::ServiceType, service_type),
            (FilterKey::MaxDistance, max_distance),
            (FilterKey::MinReviews, min_reviews),
        ];
        for (key, value) in updates {
            if let Some(value) = value {
                self.set(key, value);
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self, key: FilterKey) -> bool {
        *self.get(key) == key.default_value()
    }

    /// Filters whose value differs from the default, in key order.
    pub fn non_default(&self) -> impl Iterator<Item = (FilterKey, &FilterValue)> + '_ {
        FilterKey::ALL
            .into_iter()
            .filter(move |key| !self.is_default(*key))
            .map(move |key| (key, self.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let state = FilterState::default();
        assert_eq!(state.get(FilterKey::Search), &FilterValue::text(""));
        assert!(state.get(FilterKey::Tier).is_all());
        assert!(state.get(FilterKey::State).is_all());
        assert!(state.get(FilterKey::ServiceType).is_all());
        assert_eq!(state.get(FilterKey::MaxDistance), &FilterValue::Number(600.0));
        assert_eq!(state.get(FilterKey::MinReviews), &FilterValue::Number(0.0));
        assert_eq!(state.non_default().count(), 0);
    }

    #[test]
    fn merge_only_touches_present_fields() {
        let mut state = FilterState::default();
        state.set(FilterKey::Search, "metro");
        state.merge(FilterPatch {
            tier: Some(FilterValue::Number(2.0)),
            min_reviews: Some(FilterValue::Number(15.0)),
            ..FilterPatch::default()
        });
        assert_eq!(state.get(FilterKey::Search), &FilterValue::text("metro"));
        assert_eq!(state.get(FilterKey::Tier), &FilterValue::Number(2.0));
        assert_eq!(state.get(FilterKey::MinReviews), &FilterValue::Number(15.0));
        assert!(state.is_default(FilterKey::MaxDistance));

        let changed: Vec<FilterKey> = state.non_default().map(|(k, _)| k).collect();
        assert_eq!(
            changed,
            vec![FilterKey::Search, FilterKey::Tier, FilterKey::MinReviews]
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = FilterState::default();
        state.set(FilterKey::State, "TX");
        state.set(FilterKey::MaxDistance, 100.0);
        state.reset();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn coercion_keeps_non_numbers_as_text() {
        assert_eq!(FilterValue::coerce("100"), FilterValue::Number(100.0));
        assert_eq!(FilterValue::coerce(" 2.5 "), FilterValue::Number(2.5));
        assert_eq!(FilterValue::coerce("CA"), FilterValue::text("CA"));
        assert_eq!(FilterValue::coerce(""), FilterValue::text(""));
        assert_eq!(FilterValue::coerce("NaN"), FilterValue::text("NaN"));
    }

    #[test]
    fn only_the_browser_spelling_of_infinity_is_numeric() {
        for raw in ["inf", "+inf", "-inf", "infinity", "INF", "iNfInItY", "+infinity"] {
            assert_eq!(FilterValue::coerce(raw), FilterValue::text(raw), "{}", raw);
            assert_eq!(FilterValue::text(raw).as_number(), None, "{}", raw);
        }
        assert_eq!(FilterValue::coerce("Infinity"), FilterValue::Number(f64::INFINITY));
        assert_eq!(FilterValue::coerce("+Infinity"), FilterValue::Number(f64::INFINITY));
        assert_eq!(
            FilterValue::coerce("-Infinity"),
            FilterValue::Number(f64::NEG_INFINITY)
        );
        assert_eq!(FilterValue::coerce("1e400"), FilterValue::Number(f64::INFINITY));
    }

    #[test]
    fn infinite_numbers_display_in_a_form_that_coerces_back() {
        let shown = FilterValue::Number(f64::NEG_INFINITY).to_string();
        assert_eq!(shown, "-Infinity");
        assert_eq!(FilterValue::coerce(&shown), FilterValue::Number(f64::NEG_INFINITY));
    }

    #[test]
    fn numbers_display_without_trailing_fraction() {
        assert_eq!(FilterValue::Number(600.0).to_string(), "600");
        assert_eq!(FilterValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FilterValue::all().to_string(), "all");
    }

    #[test]
    fn keys_round_trip_through_param_names() {
        for key in FilterKey::ALL {
            assert_eq!(FilterKey::from_param(key.as_str()), Some(key));
        }
        assert_eq!(FilterKey::from_param("page"), None);
        assert_eq!(FilterKey::from_param("servicetype"), None);
    }
}
