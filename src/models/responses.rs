use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{Attraction, Hotel, Restaurant, WeatherForecast};
use crate::models::requests::DiningSlot;

/// A point of interest evaluated against one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate<P> {
    pub poi: P,
    pub distance_km: f64,
    pub score: f64,
    /// Estimated cost per night (hotels) or per person (dining, attractions)
    pub cost: f64,
    pub reasons: Vec<String>,
    pub notes: Vec<String>,
    #[serde(default)]
    pub tip: Option<String>,
}

impl<P> Candidate<P> {
    pub fn new(poi: P, distance_km: f64, score: f64, cost: f64) -> Self {
        Self {
            poi,
            distance_km,
            score,
            cost,
            reasons: Vec::new(),
            notes: Vec::new(),
            tip: None,
        }
    }
}

/// A room type that fits the nightly budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomChoice {
    pub room_type: String,
    pub price: f64,
    pub size_sqm: f64,
    pub features: Vec<String>,
    pub note: Option<String>,
}

/// Activity guidance derived from one day's forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAdvice {
    pub forecast: WeatherForecast,
    pub suitable: Vec<String>,
    pub unsuitable: Vec<String>,
    pub precautions: Vec<String>,
    pub indoor_options: Vec<String>,
    pub outdoor_options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl BlockPeriod {
    pub fn start_time(self) -> &'static str {
        match self {
            BlockPeriod::Morning => "09:00",
            BlockPeriod::Afternoon => "14:00",
            BlockPeriod::Evening => "19:00",
        }
    }

    pub fn duration_minutes(self) -> u32 {
        match self {
            BlockPeriod::Morning | BlockPeriod::Afternoon => 180,
            BlockPeriod::Evening => 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Outdoor,
    Indoor,
    Leisure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityBlock {
    pub period: BlockPeriod,
    pub start_time: String,
    pub duration_minutes: u32,
    pub kind: ActivityKind,
    pub attraction: Option<Candidate<Attraction>>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningPick {
    pub slot: DiningSlot,
    /// "HH:MM" the meal is planned for
    pub time: String,
    pub restaurant: Candidate<Restaurant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    pub weather: Option<WeatherAdvice>,
    pub activities: Vec<ActivityBlock>,
    pub dining: Vec<DiningPick>,
    pub notes: Vec<String>,
}

impl DailyPlan {
    /// Cost of every selected attraction and restaurant, per person
    pub fn cost_per_person(&self) -> f64 {
        let activities: f64 = self
            .activities
            .iter()
            .filter_map(|block| block.attraction.as_ref())
            .map(|candidate| candidate.cost)
            .sum();
        let dining: f64 = self.dining.iter().map(|pick| pick.restaurant.cost).sum();
        activities + dining
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub id: Uuid,
    pub duration_days: usize,
    pub accommodation: Option<Candidate<Hotel>>,
    pub daily_plans: Vec<DailyPlan>,
    pub total_cost: f64,
    pub tips: Vec<String>,
    pub highlights: Vec<String>,
    /// Optional narrative produced by an enrichment collaborator
    #[serde(default)]
    pub narrative: Option<String>,
}
