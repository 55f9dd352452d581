//! Hotel recommendations.

use validator::Validate;

use crate::error::PlanError;
use crate::models::requests::{validate_budget, validate_center, validate_radius};
use crate::models::{Candidate, Hotel, HotelRequest, RoomChoice};

use super::filters::{distance_within_radius, hotel_within_budget, matching_tags};
use super::ranking::{rank_candidates, summarize, Recommender};
use super::scoring::{calculate_score, inputs_for, ScoringWeights};

/// Room features that only sleep one or two guests
const SMALL_ROOM_FEATURES: &[&str] = &["king bed", "queen bed", "single bed"];

#[derive(Debug, Clone, Default)]
pub struct HotelScorer {
    weights: ScoringWeights,
}

impl HotelScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    fn validate(request: &HotelRequest) -> Result<(), PlanError> {
        request.validate()?;
        validate_center(&request.center)?;
        validate_radius(request.radius_km)?;
        validate_budget("budget_per_night", request.budget_per_night)
    }

    /// Rooms that fit the nightly budget, with a note when they suit the party poorly
    pub fn suitable_rooms(hotel: &Hotel, request: &HotelRequest) -> Vec<RoomChoice> {
        hotel
            .rooms
            .iter()
            .filter(|room| request.budget_per_night.map_or(true, |b| room.price <= b))
            .map(|room| {
                let small = room.features.iter().any(|f| {
                    SMALL_ROOM_FEATURES.iter().any(|s| f.eq_ignore_ascii_case(s))
                });
                let note = if request.guests > 2 && small {
                    Some("may not fit the whole party".to_string())
                } else if !matching_tags(&room.features, &request.requirements).is_empty() {
                    Some("meets your requirements".to_string())
                } else {
                    None
                };

                RoomChoice {
                    room_type: room.room_type.clone(),
                    price: room.price,
                    size_sqm: room.size_sqm,
                    features: room.features.clone(),
                    note,
                }
            })
            .collect()
    }

    fn reasons(hotel: &Hotel, request: &HotelRequest) -> Vec<String> {
        let mut reasons = Vec::new();

        if !hotel.transport.nearby_stations.is_empty() {
            reasons.push(format!(
                "Convenient transit: near {}",
                summarize(&hotel.transport.nearby_stations)
            ));
        }

        let matched = matching_tags(&hotel.amenities, &request.preferences);
        if !matched.is_empty() {
            reasons.push(format!("Has the amenities you asked for: {}", summarize(&matched)));
        }

        if hotel.price_range.is_value_level() {
            reasons.push("Good value for money".to_string());
        }

        reasons
    }

    fn notes(hotel: &Hotel) -> Vec<String> {
        let mut notes = Vec::new();

        if let Some(taxi) = &hotel.transport.airport_taxi_time {
            notes.push(format!("Airport transfer: about {} by taxi", taxi));
        }

        if let Some(price_note) = hotel.price_range.notes.as_deref().filter(|n| !n.is_empty()) {
            notes.push(format!("Price note: {}", price_note));
        }

        notes
    }
}

impl Recommender for HotelScorer {
    type Poi = Hotel;
    type Request = HotelRequest;

    fn name(&self) -> &str {
        "hotel"
    }

    fn recommend(
        &self,
        request: &HotelRequest,
        universe: &[Hotel],
    ) -> Result<Vec<Candidate<Hotel>>, PlanError> {
        Self::validate(request)?;

        let candidates: Vec<Candidate<Hotel>> = universe
            .iter()
            // Stage 1: Budget filter
            .filter(|hotel| hotel_within_budget(hotel, request.budget_per_night))
            // Stage 2: Radius filter
            .filter_map(|hotel| {
                distance_within_radius(hotel, &request.center, request.radius_km)
                    .map(|distance| (hotel, distance))
            })
            // Stage 3: Scoring
            .map(|(hotel, distance)| {
                let inputs = inputs_for(
                    hotel,
                    &hotel.category,
                    &request.preferences,
                    &request.preferences,
                    distance,
                    request.radius_km,
                );
                let score = calculate_score(&inputs, &self.weights);
                let cost = hotel
                    .cheapest_room_within(request.budget_per_night)
                    .map_or(hotel.price_range.min, |room| room.price);

                let mut candidate = Candidate::new(hotel.clone(), distance, score, cost);
                candidate.reasons = Self::reasons(hotel, request);
                candidate.notes = Self::notes(hotel);
                candidate
            })
            .collect();

        let considered = candidates.len();
        let ranked = rank_candidates(candidates, request.limit);

        tracing::debug!(
            scorer = self.name(),
            universe = universe.len(),
            considered,
            returned = ranked.len(),
            "ranked hotels"
        );

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, PriceRange, Room, Transport};

    fn create_hotel(id: &str, category: &str, lat: f64, lon: f64, room_prices: &[f64]) -> Hotel {
        Hotel {
            id: id.to_string(),
            name: format!("Hotel {}", id),
            district_id: "west-lake".to_string(),
            description: String::new(),
            category: category.to_string(),
            location: Location::new(lat, lon),
            price_range: PriceRange {
                min: 300.0,
                max: 1500.0,
                currency: Some("CNY".to_string()),
                level: "mid".to_string(),
                notes: Some("Prices rise during holidays".to_string()),
            },
            rating: 4.5,
            rooms: room_prices
                .iter()
                .map(|&price| Room {
                    room_type: "twin".to_string(),
                    size_sqm: 30.0,
                    price,
                    features: vec!["king bed".to_string()],
                })
                .collect(),
            amenities: vec!["pool".to_string(), "breakfast".to_string()],
            transport: Transport {
                airport_taxi_time: Some("40 minutes".to_string()),
                airport_distance_km: Some(27.0),
                nearby_stations: vec!["Longxiangqiao".to_string()],
            },
        }
    }

    fn create_request() -> HotelRequest {
        HotelRequest {
            center: Location::new(30.2587, 120.1315),
            radius_km: 2.0,
            budget_per_night: Some(800.0),
            preferences: vec!["pool".to_string()],
            guests: 2,
            requirements: vec![],
            limit: 5,
        }
    }

    #[test]
    fn test_recommend_filters_budget_and_radius() {
        let scorer = HotelScorer::default();
        let hotels = vec![
            create_hotel("ok", "boutique", 30.259, 120.132, &[600.0]),
            create_hotel("pricey", "five-star", 30.259, 120.132, &[1200.0]),
            create_hotel("far", "boutique", 30.40, 120.30, &[500.0]),
        ];

        let ranked = scorer.recommend(&create_request(), &hotels).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].poi.id, "ok");
        assert_eq!(ranked[0].cost, 600.0);
    }

    #[test]
    fn test_higher_tier_ranks_first() {
        let scorer = HotelScorer::default();
        let hotels = vec![
            create_hotel("boutique", "boutique", 30.259, 120.132, &[600.0]),
            create_hotel("luxury", "five-star", 30.262, 120.135, &[790.0]),
        ];

        let ranked = scorer.recommend(&create_request(), &hotels).unwrap();
        assert_eq!(ranked[0].poi.id, "luxury");
    }

    #[test]
    fn test_explanations() {
        let scorer = HotelScorer::default();
        let hotels = vec![create_hotel("ok", "boutique", 30.259, 120.132, &[600.0])];

        let ranked = scorer.recommend(&create_request(), &hotels).unwrap();
        let candidate = &ranked[0];
        assert!(candidate.reasons.iter().any(|r| r.contains("Longxiangqiao")));
        assert!(candidate.reasons.iter().any(|r| r.contains("pool")));
        assert!(candidate.reasons.iter().any(|r| r == "Good value for money"));
        assert!(candidate.notes.iter().any(|n| n.contains("40 minutes")));
        assert!(candidate.notes.iter().any(|n| n.contains("holidays")));
    }

    #[test]
    fn test_non_positive_budget_is_rejected() {
        let scorer = HotelScorer::default();
        let mut request = create_request();
        request.budget_per_night = Some(0.0);

        let err = scorer.recommend(&request, &[]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unconstrained_budget_keeps_expensive_hotels() {
        let scorer = HotelScorer::default();
        let mut request = create_request();
        request.budget_per_night = None;
        let hotels = vec![create_hotel("pricey", "five-star", 30.259, 120.132, &[1200.0])];

        assert_eq!(scorer.recommend(&request, &hotels).unwrap().len(), 1);
    }

    #[test]
    fn test_suitable_rooms_flag_large_parties() {
        let hotel = create_hotel("ok", "boutique", 30.259, 120.132, &[600.0, 900.0]);
        let mut request = create_request();
        request.guests = 4;

        let rooms = HotelScorer::suitable_rooms(&hotel, &request);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].note.as_deref(), Some("may not fit the whole party"));
    }
}
