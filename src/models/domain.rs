use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::distance::haversine_distance;

/// Geographic point with an optional display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            name: None,
        }
    }

    pub fn named(latitude: f64, longitude: f64, name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            name: Some(name.into()),
        }
    }

    /// Great-circle distance to `other` in kilometers
    #[inline]
    pub fn distance_to(&self, other: &Location) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Opening hours, as "HH:MM" strings from the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hours {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub break_time: Option<BreakTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakTime {
    pub start: String,
    pub end: String,
}

/// Coarse quality tier used for the tier bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Top,
    Mid,
    Other,
}

/// Capability shared by every point-of-interest variant
pub trait PointOfInterest: Clone + Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn district_id(&self) -> &str;
    fn location(&self) -> &Location;
    fn tags(&self) -> &[String];
    /// Declared lowest and highest price, as filtered by price-range queries
    fn price_bounds(&self) -> (f64, f64);
    fn tier(&self) -> Tier;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTime {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub best_times: Vec<String>,
}

/// Named area of the city with its transit links and landmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "coordinates")]
    pub location: Location,
    #[serde(default)]
    pub area_km2: f64,
    #[serde(default)]
    pub transportation: Vec<String>,
    #[serde(default)]
    pub landmarks: Vec<String>,
}

/// Tags marking an attraction as an indoor venue
pub const INDOOR_TAGS: &[&str] = &[
    "indoor",
    "museum",
    "gallery",
    "theater",
    "aquarium",
    "exhibition",
    "shopping",
    "博物馆",
    "艺术馆",
    "室内景点",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub district_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "coordinates")]
    pub location: Location,
    #[serde(default)]
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub opening_hours: Hours,
    #[serde(default)]
    pub recommended_time: RecommendedTime,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Attraction {
    pub fn is_indoor(&self) -> bool {
        self.tags
            .iter()
            .any(|tag| INDOOR_TAGS.contains(&tag.to_lowercase().as_str()))
    }

    /// True when any best-visit hint mentions the evening or night
    pub fn suits_evening(&self) -> bool {
        self.recommended_time.best_times.iter().any(|t| {
            let t = t.to_lowercase();
            t.contains("evening")
                || t.contains("night")
                || t.contains("sunset")
                || t.contains('晚')
                || t.contains('夜')
        })
    }
}

impl PointOfInterest for Attraction {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn district_id(&self) -> &str {
        &self.district_id
    }
    fn location(&self) -> &Location {
        &self.location
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn price_bounds(&self) -> (f64, f64) {
        (self.price.amount, self.price.amount)
    }
    fn tier(&self) -> Tier {
        if self.rating >= 4.5 {
            Tier::Top
        } else if self.rating >= 4.0 {
            Tier::Mid
        } else {
            Tier::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub currency: Option<String>,
    /// Free-form level such as "economy", "mid", "high"
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PriceRange {
    pub fn average(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Economy and mid-range levels are called out as good value
    pub fn is_value_level(&self) -> bool {
        matches!(
            self.level.to_lowercase().as_str(),
            "economy" | "budget" | "mid" | "moderate" | "mid-range" | "经济" | "中等"
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub district_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "coordinates")]
    pub location: Location,
    #[serde(alias = "cuisine_type")]
    pub cuisine: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub opening_hours: Hours,
    #[serde(default)]
    pub signature_dishes: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, alias = "reservations_required")]
    pub reservation_required: bool,
}

impl PointOfInterest for Restaurant {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn district_id(&self) -> &str {
        &self.district_id
    }
    fn location(&self) -> &Location {
        &self.location
    }
    fn tags(&self) -> &[String] {
        &self.features
    }
    fn price_bounds(&self) -> (f64, f64) {
        (self.price_range.min, self.price_range.max)
    }
    fn tier(&self) -> Tier {
        match self.price_range.level.to_lowercase().as_str() {
            "high" | "luxury" | "fine dining" | "高端" => Tier::Top,
            "mid" | "moderate" | "mid-range" | "中等" => Tier::Mid,
            _ => Tier::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(default)]
    pub size_sqm: f64,
    pub price: f64,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransportRecord")]
pub struct Transport {
    pub airport_taxi_time: Option<String>,
    pub airport_distance_km: Option<f64>,
    pub nearby_stations: Vec<String>,
}

/// Accepts both the flat shape and the dataset's nested `from_airport` block
#[derive(Deserialize)]
struct TransportRecord {
    #[serde(default)]
    from_airport: Option<AirportTransfer>,
    #[serde(default)]
    airport_taxi_time: Option<String>,
    #[serde(default)]
    airport_distance_km: Option<f64>,
    #[serde(default)]
    nearby_stations: Vec<String>,
}

#[derive(Deserialize)]
struct AirportTransfer {
    #[serde(default)]
    taxi_time: Option<String>,
    #[serde(default)]
    distance_km: Option<f64>,
}

impl From<TransportRecord> for Transport {
    fn from(record: TransportRecord) -> Self {
        let (taxi_time, distance_km) = match record.from_airport {
            Some(airport) => (airport.taxi_time, airport.distance_km),
            None => (None, None),
        };
        Self {
            airport_taxi_time: record.airport_taxi_time.or(taxi_time).filter(|t| !t.is_empty()),
            airport_distance_km: record.airport_distance_km.or(distance_km),
            nearby_stations: record.nearby_stations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub district_id: String,
    #[serde(default)]
    pub description: String,
    /// Star rating or style, e.g. "five-star", "boutique"
    pub category: String,
    #[serde(alias = "coordinates")]
    pub location: Location,
    pub price_range: PriceRange,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, alias = "transportation")]
    pub transport: Transport,
}

impl Hotel {
    /// Cheapest room priced at or under `budget`, or the cheapest overall when unconstrained
    pub fn cheapest_room_within(&self, budget: Option<f64>) -> Option<&Room> {
        self.rooms
            .iter()
            .filter(|room| budget.map_or(true, |b| room.price <= b))
            .min_by(|a, b| a.price.total_cmp(&b.price))
    }
}

impl PointOfInterest for Hotel {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn district_id(&self) -> &str {
        &self.district_id
    }
    fn location(&self) -> &Location {
        &self.location
    }
    fn tags(&self) -> &[String] {
        &self.amenities
    }
    /// The declared nightly range; room prices only drive the budget filter
    fn price_bounds(&self) -> (f64, f64) {
        (self.price_range.min, self.price_range.max)
    }
    fn tier(&self) -> Tier {
        match self.category.to_lowercase().as_str() {
            "five-star" | "5-star" | "luxury" | "五星级" => Tier::Top,
            "four-star" | "4-star" | "upscale" | "四星级" => Tier::Mid,
            _ => Tier::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub day: String,
    pub night: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

/// One day of forecast data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub date: NaiveDate,
    pub conditions: Conditions,
    /// Degrees Celsius
    pub temperature: Span,
    /// km/h
    pub wind_speed: Span,
    /// Percent, 0-100
    pub precipitation_probability: f64,
    #[serde(default)]
    pub precipitation_mm: f64,
    pub aqi: u32,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn whole_longitude(min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon: -180.0,
            max_lon: 180.0,
        }
    }
}
