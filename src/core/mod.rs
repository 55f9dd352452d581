// Core algorithm exports
pub mod attractions;
pub mod composer;
pub mod dining;
pub mod distance;
pub mod filters;
pub mod lodging;
pub mod ranking;
pub mod scoring;
pub mod weather;

pub use attractions::AttractionScorer;
pub use composer::{CancelToken, ItineraryComposer};
pub use dining::RestaurantScorer;
pub use distance::{calculate_bounding_box, distance_km, haversine_distance, is_within_bounding_box};
pub use lodging::HotelScorer;
pub use ranking::{compare_candidates, rank_candidates, Recommender};
pub use scoring::{calculate_score, ScoringWeights};
pub use weather::{discourages_outdoor, WeatherAdvisor, WeatherThresholds, PROLONGED_OUTDOOR};
