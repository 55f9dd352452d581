use crate::models::{Attraction, Hotel, Location, PointOfInterest, Restaurant};

use super::distance::{calculate_bounding_box, distance_km, is_within_bounding_box};

/// Check that a hotel has at least one room priced at or under the nightly budget
#[inline]
pub fn hotel_within_budget(hotel: &Hotel, budget_per_night: Option<f64>) -> bool {
    match budget_per_night {
        Some(budget) => hotel.rooms.iter().any(|room| room.price <= budget),
        None => true,
    }
}

/// Check that a restaurant's average price fits the per-person budget
#[inline]
pub fn restaurant_within_budget(restaurant: &Restaurant, budget_per_person: Option<f64>) -> bool {
    match budget_per_person {
        Some(budget) => restaurant.price_range.average() <= budget,
        None => true,
    }
}

/// Check that an attraction's ticket fits the activity budget
#[inline]
pub fn attraction_within_budget(attraction: &Attraction, budget_per_ticket: Option<f64>) -> bool {
    match budget_per_ticket {
        Some(budget) => attraction.price.amount <= budget,
        None => true,
    }
}

/// Distance from `center` when the POI lies within `radius_km` (inclusive)
#[inline]
pub fn distance_within_radius<P: PointOfInterest>(
    poi: &P,
    center: &Location,
    radius_km: f64,
) -> Option<f64> {
    let distance = distance_km(center, poi.location());
    (distance <= radius_km).then_some(distance)
}

/// Every POI within `radius_km` of `center`, boundary inclusive
///
/// Uses the bounding box as a cheap pre-filter; the box is a superset of the
/// radius so the exact Haversine check decides membership.
pub fn within_radius<'a, P: PointOfInterest>(
    items: &'a [P],
    center: &Location,
    radius_km: f64,
) -> impl Iterator<Item = (&'a P, f64)> + 'a {
    let bbox = calculate_bounding_box(center.latitude, center.longitude, radius_km);
    let center = center.clone();

    items
        .iter()
        .filter(move |poi| {
            let loc = poi.location();
            is_within_bounding_box(loc.latitude, loc.longitude, &bbox)
        })
        .filter_map(move |poi| distance_within_radius(poi, &center, radius_km).map(|d| (poi, d)))
}

/// POI whose price bounds lie inside `[min, max]`
#[inline]
pub fn within_price_range<P: PointOfInterest>(poi: &P, min: f64, max: f64) -> bool {
    let (low, high) = poi.price_bounds();
    low >= min && high <= max
}

/// Preference entries present in `tags`, in the POI's own tag order
pub fn matching_tags(tags: &[String], preferences: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| preferences.iter().any(|pref| pref.eq_ignore_ascii_case(tag)))
        .cloned()
        .collect()
}
