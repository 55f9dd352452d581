//! Trip Planner - point-of-interest recommendation and itinerary composition
//!
//! Ranks hotels, restaurants and attractions around a traveler's chosen
//! location and composes them into a weather-aware, budget-aware multi-day plan.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::Settings;
pub use core::{
    distance::{calculate_bounding_box, haversine_distance},
    AttractionScorer, CancelToken, HotelScorer, ItineraryComposer, Recommender, RestaurantScorer,
    WeatherAdvisor,
};
pub use error::PlanError;
pub use models::{Candidate, TripPlan, TripRequest};
pub use services::{DataStore, DatasetProvider, InMemoryProvider, JsonDirectoryProvider};
