use config::{Config, ConfigError, Environment, File};
use geo::{coord, Intersects, Point, Rect};
use serde::Deserialize;
use std::path::Path;

use crate::core::scoring::ScoringWeights;
use crate::core::weather::WeatherThresholds;
use crate::models::Location;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub planner: PlannerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub weather: WeatherThresholds,
    #[serde(default = "default_hot_zones")]
    pub hot_zones: Vec<HotZone>,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            planner: PlannerSettings::default(),
            scoring: ScoringSettings::default(),
            weather: WeatherThresholds::default(),
            hot_zones: default_hot_zones(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerSettings {
    /// Radius for the single trip-wide hotel search
    #[serde(default = "default_hotel_radius")]
    pub hotel_radius_km: f64,
    #[serde(default = "default_dining_radius")]
    pub dining_radius_km: f64,
    #[serde(default = "default_attraction_radius")]
    pub attraction_radius_km: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            hotel_radius_km: default_hotel_radius(),
            dining_radius_km: default_dining_radius(),
            attraction_radius_km: default_attraction_radius(),
            max_results: default_max_results(),
        }
    }
}

fn default_hotel_radius() -> f64 { 2.0 }
fn default_dining_radius() -> f64 { 3.0 }
fn default_attraction_radius() -> f64 { 5.0 }
fn default_max_results() -> usize { 5 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_category_match_weight")]
    pub category_match: f64,
    #[serde(default = "default_tag_match_weight")]
    pub tag_match: f64,
    #[serde(default = "default_tier_top")]
    pub tier_top: f64,
    #[serde(default = "default_tier_mid")]
    pub tier_mid: f64,
    #[serde(default = "default_tier_other")]
    pub tier_other: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            distance: default_distance_weight(),
            category_match: default_category_match_weight(),
            tag_match: default_tag_match_weight(),
            tier_top: default_tier_top(),
            tier_mid: default_tier_mid(),
            tier_other: default_tier_other(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            distance: config.distance,
            category_match: config.category_match,
            tag_match: config.tag_match,
            tier_top: config.tier_top,
            tier_mid: config.tier_mid,
            tier_other: config.tier_other,
        }
    }
}

fn default_distance_weight() -> f64 { 3.0 }
fn default_category_match_weight() -> f64 { 5.0 }
fn default_tag_match_weight() -> f64 { 2.0 }
fn default_tier_top() -> f64 { 5.0 }
fn default_tier_mid() -> f64 { 4.0 }
fn default_tier_other() -> f64 { 3.0 }

/// Area whose visitors get extra location-specific tips
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HotZone {
    pub name: String,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl HotZone {
    /// Boundary inclusive
    pub fn contains(&self, location: &Location) -> bool {
        let area = Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        );
        Point::new(location.longitude, location.latitude).intersects(&area)
    }
}

fn default_hot_zones() -> Vec<HotZone> {
    vec![HotZone {
        name: "West Lake".to_string(),
        min_lat: 30.2,
        max_lat: 30.3,
        min_lon: 120.1,
        max_lon: 120.2,
        tips: vec![
            "West Lake scenic area is very crowded on weekends".to_string(),
            "Prefer the metro or public buses over taxis around the lake".to_string(),
            "A combined ticket for the lake attractions saves money".to_string(),
        ],
    }]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TRIP_), after reading `.env`
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TRIP__PLANNER__HOTEL_RADIUS_KM -> planner.hotel_radius_km
            .add_source(
                Environment::with_prefix("TRIP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TRIP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Parse settings from an in-memory TOML document
    pub fn from_toml_str(document: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(document)
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}
