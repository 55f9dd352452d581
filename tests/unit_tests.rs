// Unit tests for the public scoring, distance and weather APIs

use chrono::NaiveDate;
use trip_planner::core::{
    calculate_bounding_box, discourages_outdoor, haversine_distance, is_within_bounding_box,
    AttractionScorer, HotelScorer, Recommender, RestaurantScorer, ScoringWeights, WeatherAdvisor,
};
use trip_planner::models::{
    ActivitySetting, Attraction, AttractionRequest, Conditions, DiningRequest, DiningSlot, Hotel,
    HotelRequest, Hours, Location, Price, PriceRange, RecommendedTime, Restaurant, Room, Span,
    Transport, WeatherForecast,
};
use trip_planner::services::{DataStore, InMemoryProvider};

const CENTER: (f64, f64) = (30.2587, 120.1315);

fn center() -> Location {
    Location::new(CENTER.0, CENTER.1)
}

fn attraction(id: &str, lat: f64, lon: f64, ticket: f64) -> Attraction {
    Attraction {
        id: id.to_string(),
        name: id.to_string(),
        district_id: "west-lake".to_string(),
        description: String::new(),
        location: Location::new(lat, lon),
        category: "natural".to_string(),
        price: Price {
            amount: ticket,
            currency: None,
            notes: None,
        },
        rating: 4.4,
        opening_hours: Hours::default(),
        recommended_time: RecommendedTime::default(),
        highlights: vec![],
        tags: vec!["natural".to_string()],
    }
}

fn restaurant(id: &str, lat: f64, lon: f64, min: f64, max: f64) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: id.to_string(),
        district_id: "west-lake".to_string(),
        description: String::new(),
        location: Location::new(lat, lon),
        cuisine: "hangzhou".to_string(),
        price_range: PriceRange {
            min,
            max,
            currency: None,
            level: "moderate".to_string(),
            notes: None,
        },
        rating: 4.1,
        opening_hours: Hours::default(),
        signature_dishes: vec![],
        features: vec![],
        reservation_required: false,
    }
}

fn hotel(id: &str, lat: f64, lon: f64, room_prices: &[f64]) -> Hotel {
    Hotel {
        id: id.to_string(),
        name: id.to_string(),
        district_id: "west-lake".to_string(),
        description: String::new(),
        category: "four-star".to_string(),
        location: Location::new(lat, lon),
        price_range: PriceRange {
            min: 200.0,
            max: 2000.0,
            currency: None,
            level: "mid".to_string(),
            notes: None,
        },
        rating: 4.2,
        rooms: room_prices
            .iter()
            .map(|&price| Room {
                room_type: "standard".to_string(),
                size_sqm: 25.0,
                price,
                features: vec![],
            })
            .collect(),
        amenities: vec![],
        transport: Transport::default(),
    }
}

/// A spread of hotels around the center, some over budget, some out of range
fn hotel_grid() -> Vec<Hotel> {
    (0..40)
        .map(|i| {
            let lat = CENTER.0 + ((i % 8) as f64 - 4.0) * 0.004;
            let lon = CENTER.1 + ((i / 8) as f64 - 2.0) * 0.005;
            hotel(&format!("h-{:02}", i), lat, lon, &[300.0 + (i as f64) * 25.0])
        })
        .collect()
}

#[test]
fn test_haversine_symmetry_and_identity() {
    let points = [
        (30.2587, 120.1315),
        (-33.8688, 151.2093),
        (51.5074, -0.1278),
        (89.9, 0.0),
        (0.0, 179.9),
        (0.0, -179.9),
    ];

    for &(lat1, lon1) in &points {
        assert_eq!(haversine_distance(lat1, lon1, lat1, lon1), 0.0);
        for &(lat2, lon2) in &points {
            let ab = haversine_distance(lat1, lon1, lat2, lon2);
            let ba = haversine_distance(lat2, lon2, lat1, lon1);
            assert!((ab - ba).abs() < 1e-9, "asymmetric for {:?} {:?}", (lat1, lon1), (lat2, lon2));
        }
    }
}

#[test]
fn test_haversine_known_distance() {
    // Hangzhou to Shanghai, roughly 165 km
    let distance = haversine_distance(30.2741, 120.1551, 31.2304, 121.4737);
    assert!((distance - 165.0).abs() < 5.0, "got {}", distance);
}

#[test]
fn test_bounding_box_contains_radius_circle() {
    let bbox = calculate_bounding_box(CENTER.0, CENTER.1, 3.0);
    for step in 0..36 {
        let bearing = (step as f64 * 10.0).to_radians();
        // Slightly inside 3 km
        let lat = CENTER.0 + (2.99 / 111.2) * bearing.cos();
        let lon = CENTER.1 + (2.99 / (111.2 * CENTER.0.to_radians().cos())) * bearing.sin();
        assert!(is_within_bounding_box(lat, lon, &bbox));
    }
}

#[test]
fn test_store_within_radius_is_inclusive() {
    let store = DataStore::new();
    store
        .load_all(&InMemoryProvider::new(
            vec![
                attraction("here", CENTER.0, CENTER.1, 0.0),
                attraction("near", CENTER.0 + 0.01, CENTER.1, 0.0),
                attraction("sydney", -33.8688, 151.2093, 0.0),
            ],
            vec![],
            vec![],
            vec![],
        ))
        .unwrap();

    let at_zero: Vec<Attraction> = store.within_radius(&center(), 0.0);
    assert_eq!(at_zero.len(), 1);
    assert_eq!(at_zero[0].id, "here");

    let near = haversine_distance(CENTER.0, CENTER.1, CENTER.0 + 0.01, CENTER.1);
    let exact: Vec<Attraction> = store.within_radius(&center(), near);
    assert_eq!(exact.len(), 2);

    let everything: Vec<Attraction> = store.within_radius(&center(), 25_000.0);
    assert_eq!(everything.len(), 3);
}

#[test]
fn test_hotel_budget_is_never_exceeded() {
    let scorer = HotelScorer::default();
    let request = HotelRequest {
        center: center(),
        radius_km: 2.0,
        budget_per_night: Some(650.0),
        preferences: vec![],
        guests: 2,
        requirements: vec![],
        limit: 5,
    };

    let ranked = scorer.recommend(&request, &hotel_grid()).unwrap();
    assert!(!ranked.is_empty());
    assert!(ranked.len() <= 5);
    for candidate in &ranked {
        assert!(candidate.cost <= 650.0);
        assert!(candidate.distance_km <= 2.0);
    }
}

#[test]
fn test_recommend_is_deterministic() {
    let scorer = HotelScorer::default();
    let request = HotelRequest {
        center: center(),
        radius_km: 2.0,
        budget_per_night: None,
        preferences: vec![],
        guests: 1,
        requirements: vec![],
        limit: 5,
    };
    let hotels = hotel_grid();

    let first = scorer.recommend(&request, &hotels).unwrap();
    for _ in 0..10 {
        assert_eq!(scorer.recommend(&request, &hotels).unwrap(), first);
    }

    // Reversing the input does not change the ranking
    let mut reversed = hotels.clone();
    reversed.reverse();
    assert_eq!(scorer.recommend(&request, &reversed).unwrap(), first);
}

#[test]
fn test_equal_scores_order_by_distance() {
    // Without the distance term every candidate scores the same tier bonus
    let scorer = RestaurantScorer::new(ScoringWeights {
        distance: 0.0,
        ..ScoringWeights::default()
    });
    let restaurants = vec![
        restaurant("far", CENTER.0 + 0.02, CENTER.1, 40.0, 60.0),
        restaurant("mid", CENTER.0 + 0.01, CENTER.1, 40.0, 60.0),
        restaurant("close", CENTER.0 + 0.001, CENTER.1, 40.0, 60.0),
    ];
    let request = DiningRequest {
        center: center(),
        radius_km: 3.0,
        budget_per_person: Some(100.0),
        cuisines: vec![],
        preferences: vec![],
        party_size: 2,
        slot: DiningSlot::Evening,
        limit: 5,
    };

    let ranked = scorer.recommend(&request, &restaurants).unwrap();
    let ids: Vec<_> = ranked.iter().map(|c| c.poi.id.as_str()).collect();
    assert_eq!(ids, vec!["close", "mid", "far"]);
    assert!(ranked.windows(2).all(|w| w[0].score == w[1].score));
}

#[test]
fn test_attraction_ticket_budget_is_never_exceeded() {
    let scorer = AttractionScorer::default();
    let attractions: Vec<Attraction> = (0..20)
        .map(|i| {
            let lat = CENTER.0 + i as f64 * 0.001;
            attraction(&format!("a-{}", i), lat, CENTER.1, i as f64 * 15.0)
        })
        .collect();
    let request = AttractionRequest {
        center: center(),
        radius_km: 5.0,
        budget_per_ticket: Some(100.0),
        preferences: vec!["natural".to_string()],
        setting: ActivitySetting::Any,
        limit: 10,
    };

    let ranked = scorer.recommend(&request, &attractions).unwrap();
    assert_eq!(ranked.len(), 7);
    assert!(ranked.iter().all(|c| c.cost <= 100.0));
}

#[test]
fn test_zero_limit_is_rejected() {
    let scorer = AttractionScorer::default();
    let request = AttractionRequest {
        center: center(),
        radius_km: 5.0,
        budget_per_ticket: None,
        preferences: vec![],
        setting: ActivitySetting::Any,
        limit: 0,
    };

    assert!(scorer.recommend(&request, &[]).unwrap_err().is_validation());
}

fn forecast(day: &str, min: f64, max: f64, wind: f64, rain: f64, aqi: u32) -> WeatherForecast {
    WeatherForecast {
        date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        conditions: Conditions {
            day: day.to_string(),
            night: day.to_string(),
        },
        temperature: Span { min, max },
        wind_speed: Span { min: 0.0, max: wind },
        precipitation_probability: rain,
        precipitation_mm: 0.0,
        aqi,
    }
}

#[test]
fn test_weather_hot_and_windy_accumulate() {
    let advice = WeatherAdvisor::default().advise(&forecast("Sunny", 28.0, 38.0, 45.0, 5.0, 60));

    assert!(advice.precautions.iter().any(|p| p.contains("hydrated")));
    assert!(advice.precautions.iter().any(|p| p.contains("wind")));
    assert!(discourages_outdoor(&advice));
    assert!(!advice.indoor_options.is_empty());
}

#[test]
fn test_weather_indoor_options_never_empty() {
    let advisor = WeatherAdvisor::default();
    let cases = [
        forecast("Sunny", 15.0, 25.0, 5.0, 0.0, 30),
        forecast("Thunderstorm", 20.0, 28.0, 35.0, 95.0, 80),
        forecast("Haze", 2.0, 9.0, 10.0, 10.0, 220),
        forecast("Fog", 16.0, 31.0, 10.0, 10.0, 60),
    ];

    for case in &cases {
        let advice = advisor.advise(case);
        assert!(!advice.indoor_options.is_empty(), "{}", case.conditions.day);
        if !discourages_outdoor(&advice) {
            assert!(!advice.outdoor_options.is_empty(), "{}", case.conditions.day);
        }
    }
}
