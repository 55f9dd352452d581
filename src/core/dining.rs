//! Restaurant recommendations.

use validator::Validate;

use crate::error::PlanError;
use crate::models::requests::{validate_budget, validate_center, validate_radius};
use crate::models::{Candidate, DiningRequest, DiningSlot, Restaurant};

use super::filters::{matching_tags, restaurant_within_budget, within_radius};
use super::ranking::{rank_candidates, summarize, Recommender};
use super::scoring::{calculate_score, contains_ignore_case, inputs_for, ScoringWeights};

/// Parties above this size should book a day ahead
const LARGE_PARTY: u32 = 6;

#[derive(Debug, Clone, Default)]
pub struct RestaurantScorer {
    weights: ScoringWeights,
}

impl RestaurantScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    fn validate(request: &DiningRequest) -> Result<(), PlanError> {
        request.validate()?;
        validate_center(&request.center)?;
        validate_radius(request.radius_km)?;
        validate_budget("budget_per_person", request.budget_per_person)
    }

    /// Booking advice for the slot and party size
    pub fn reservation_tip(restaurant: &Restaurant, slot: DiningSlot, party_size: u32) -> String {
        if !restaurant.reservation_required {
            return "No reservation needed".to_string();
        }
        if party_size > LARGE_PARTY {
            return "Book at least one day ahead for a group this size".to_string();
        }
        match slot {
            DiningSlot::Midday => "Peak lunch hours: book about two hours ahead".to_string(),
            DiningSlot::Evening => "Peak dinner hours: book about two hours ahead".to_string(),
        }
    }

    fn reasons(restaurant: &Restaurant, request: &DiningRequest) -> Vec<String> {
        let mut reasons = Vec::new();

        if !restaurant.signature_dishes.is_empty() {
            reasons.push(format!(
                "Signature dishes: {}",
                summarize(&restaurant.signature_dishes)
            ));
        }

        if contains_ignore_case(&request.cuisines, &restaurant.cuisine) {
            reasons.push(format!("Serves your preferred cuisine: {}", restaurant.cuisine));
        }

        let matched = matching_tags(&restaurant.features, &request.preferences);
        if !matched.is_empty() {
            reasons.push(format!("Matches your preferences: {}", summarize(&matched)));
        }

        if restaurant.price_range.is_value_level() {
            reasons.push("Good value for money".to_string());
        }

        reasons
    }

    fn notes(restaurant: &Restaurant) -> Vec<String> {
        let mut notes = Vec::new();

        if restaurant.reservation_required {
            notes.push("Reservation recommended".to_string());
        }

        if let Some(break_time) = &restaurant.opening_hours.break_time {
            notes.push(format!(
                "Closed for a break between {} and {}",
                break_time.start, break_time.end
            ));
        }

        notes
    }
}

impl Recommender for RestaurantScorer {
    type Poi = Restaurant;
    type Request = DiningRequest;

    fn name(&self) -> &str {
        "restaurant"
    }

    fn recommend(
        &self,
        request: &DiningRequest,
        universe: &[Restaurant],
    ) -> Result<Vec<Candidate<Restaurant>>, PlanError> {
        Self::validate(request)?;

        let nearby = within_radius(universe, &request.center, request.radius_km);
        let candidates: Vec<Candidate<Restaurant>> = nearby
            .filter(|(restaurant, _)| {
                restaurant_within_budget(restaurant, request.budget_per_person)
            })
            .map(|(restaurant, distance)| {
                let inputs = inputs_for(
                    restaurant,
                    &restaurant.cuisine,
                    &request.cuisines,
                    &request.preferences,
                    distance,
                    request.radius_km,
                );
                let score = calculate_score(&inputs, &self.weights);

                let mut candidate = Candidate::new(
                    restaurant.clone(),
                    distance,
                    score,
                    restaurant.price_range.average(),
                );
                candidate.reasons = Self::reasons(restaurant, request);
                candidate.notes = Self::notes(restaurant);
                candidate.tip = Some(Self::reservation_tip(
                    restaurant,
                    request.slot,
                    request.party_size,
                ));
                candidate
            })
            .collect();

        let considered = candidates.len();
        let ranked = rank_candidates(candidates, request.limit);

        tracing::debug!(
            scorer = self.name(),
            slot = request.slot.label(),
            considered,
            returned = ranked.len(),
            "ranked restaurants"
        );

        Ok(ranked)
    }
}
