//! Record filtering.

use crate::filters::{FilterKey, FilterState, FilterValue};
use crate::Contractor;

/// Returns the records passing every active filter, in their original order.
pub fn filter_contractors<'a>(
    contractors: &'a [Contractor],
    filters: &FilterState,
) -> Vec<&'a Contractor> {
    contractors
        .iter()
        .filter(|contractor| matches_filters(contractor, filters))
        .collect()
}

/// True when the record satisfies all six criteria.
pub fn matches_filters(contractor: &Contractor, filters: &FilterState) -> bool {
    matches_search(contractor, filters.get(FilterKey::Search))
        && matches_tier(contractor, filters.get(FilterKey::Tier))
        && matches_exact(&contractor.state, filters.get(FilterKey::State))
        && matches_exact(&contractor.service_type, filters.get(FilterKey::ServiceType))
        && within_distance(contractor, filters.get(FilterKey::MaxDistance))
        && has_min_reviews(contractor, filters.get(FilterKey::MinReviews))
}

fn matches_search(contractor: &Contractor, search: &FilterValue) -> bool {
    let term = search.to_string().to_lowercase();
    if term.is_empty() {
        return true;
    }
    contractor.name.to_lowercase().contains(&term) || contractor.city.to_lowercase().contains(&term)
}

fn matches_tier(contractor: &Contractor, tier: &FilterValue) -> bool {
    if tier.is_all() {
        return true;
    }
    // Unparseable tier text matches nothing.
    tier.as_number() == Some(f64::from(contractor.tier))
}

fn matches_exact(field: &str, filter: &FilterValue) -> bool {
    filter.is_all() || filter.as_text() == Some(field)
}

fn within_distance(contractor: &Contractor, max_distance: &FilterValue) -> bool {
    match max_distance.as_number() {
        Some(max) => f64::from(contractor.distance) <= max,
        None => true,
    }
}

fn has_min_reviews(contractor: &Contractor, min_reviews: &FilterValue) -> bool {
    match min_reviews.as_number() {
        Some(min) => f64::from(contractor.reviews) >= min,
        None => true,
    }
}
