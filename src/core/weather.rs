//! Weather-conditioned activity advice.
//!
//! A forecast is run through an ordered rule table. Rules are not exclusive:
//! every rule that fires appends its suggestions, so a hot and windy day
//! carries precautions from both.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{WeatherAdvice, WeatherForecast};
use crate::services::store::Snapshot;

/// Marker placed in `unsuitable` when outdoor blocks should move indoors
pub const PROLONGED_OUTDOOR: &str = "prolonged outdoor activity";

const RAIN_KEYWORDS: &[&str] = &[
    "rain", "shower", "drizzle", "storm", "thunder", "snow", "sleet", "雨", "雪", "雷",
];
const CLEAR_KEYWORDS: &[&str] = &[
    "sunny", "clear", "cloudy", "overcast", "fair", "晴", "多云", "阴",
];

const INDOOR_BASELINE: &[&str] = &["museums", "art galleries", "tea houses"];
const OUTDOOR_BASELINE: &[&str] = &["lakeside walks", "park visits", "city sightseeing"];

/// Trigger levels for the advice rules
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherThresholds {
    /// Precipitation probability (percent) treated as a rainy day
    #[serde(default = "default_rain_probability")]
    pub rain_probability: f64,
    /// Upper bound of the mild band, max temperature
    #[serde(default = "default_mild_max")]
    pub mild_max_celsius: f64,
    /// Lower bound of the mild band, min temperature
    #[serde(default = "default_mild_min")]
    pub mild_min_celsius: f64,
    #[serde(default = "default_heat")]
    pub heat_celsius: f64,
    #[serde(default = "default_cold")]
    pub cold_celsius: f64,
    #[serde(default = "default_wind")]
    pub wind_kmh: f64,
    /// AQI strictly above this is poor air
    #[serde(default = "default_poor_aqi")]
    pub poor_aqi: u32,
}

impl Default for WeatherThresholds {
    fn default() -> Self {
        Self {
            rain_probability: default_rain_probability(),
            mild_max_celsius: default_mild_max(),
            mild_min_celsius: default_mild_min(),
            heat_celsius: default_heat(),
            cold_celsius: default_cold(),
            wind_kmh: default_wind(),
            poor_aqi: default_poor_aqi(),
        }
    }
}

fn default_rain_probability() -> f64 { 70.0 }
fn default_mild_max() -> f64 { 30.0 }
fn default_mild_min() -> f64 { 10.0 }
fn default_heat() -> f64 { 35.0 }
fn default_cold() -> f64 { 5.0 }
fn default_wind() -> f64 { 30.0 }
fn default_poor_aqi() -> u32 { 150 }

/// One row of the rule table
struct Rule {
    name: &'static str,
    applies: fn(&WeatherForecast, &WeatherThresholds) -> bool,
    suitable: &'static [&'static str],
    unsuitable: &'static [&'static str],
    precautions: &'static [&'static str],
    indoor: &'static [&'static str],
    outdoor: &'static [&'static str],
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|k| text.contains(k))
}

fn is_rainy(f: &WeatherForecast, t: &WeatherThresholds) -> bool {
    mentions_any(&f.conditions.day, RAIN_KEYWORDS)
        || mentions_any(&f.conditions.night, RAIN_KEYWORDS)
        || f.precipitation_probability >= t.rain_probability
}

fn is_clear_and_mild(f: &WeatherForecast, t: &WeatherThresholds) -> bool {
    mentions_any(&f.conditions.day, CLEAR_KEYWORDS)
        && !mentions_any(&f.conditions.day, RAIN_KEYWORDS)
        && f.temperature.max <= t.mild_max_celsius
        && f.temperature.min >= t.mild_min_celsius
}

fn is_hot(f: &WeatherForecast, t: &WeatherThresholds) -> bool {
    f.temperature.max >= t.heat_celsius
}

fn is_cold(f: &WeatherForecast, t: &WeatherThresholds) -> bool {
    f.temperature.min <= t.cold_celsius
}

fn is_windy(f: &WeatherForecast, t: &WeatherThresholds) -> bool {
    f.wind_speed.max >= t.wind_kmh
}

fn has_poor_air(f: &WeatherForecast, t: &WeatherThresholds) -> bool {
    f.aqi > t.poor_aqi
}

// Evaluated in order; all matching rules contribute.
const RULES: &[Rule] = &[
    Rule {
        name: "rain",
        applies: is_rainy,
        suitable: &["museum visits", "tea tasting"],
        unsuitable: &[PROLONGED_OUTDOOR, "boating"],
        precautions: &["Carry an umbrella and wear waterproof shoes"],
        indoor: &["museums", "art galleries", "shopping centers"],
        outdoor: &[],
    },
    Rule {
        name: "clear",
        applies: is_clear_and_mild,
        suitable: &["sightseeing walks", "cycling", "boating"],
        unsuitable: &[],
        precautions: &["Use sunscreen during the middle of the day"],
        indoor: &[],
        outdoor: &["lakeside walks", "hiking", "cycling"],
    },
    Rule {
        name: "heat",
        applies: is_hot,
        suitable: &["early morning sightseeing", "evening strolls"],
        unsuitable: &[PROLONGED_OUTDOOR, "midday hiking"],
        precautions: &["Stay hydrated and avoid the midday sun"],
        indoor: &["museums", "air-conditioned shopping centers"],
        outdoor: &[],
    },
    Rule {
        name: "cold",
        applies: is_cold,
        suitable: &["tea houses", "hot spring visits"],
        unsuitable: &[],
        precautions: &["Dress in warm layers"],
        indoor: &["museums", "tea houses"],
        outdoor: &[],
    },
    Rule {
        name: "wind",
        applies: is_windy,
        suitable: &[],
        unsuitable: &[PROLONGED_OUTDOOR, "boating"],
        precautions: &["Strong winds expected: secure loose items and avoid boat trips"],
        indoor: &["museums"],
        outdoor: &[],
    },
    Rule {
        name: "air",
        applies: has_poor_air,
        suitable: &[],
        unsuitable: &[PROLONGED_OUTDOOR, "strenuous outdoor exercise"],
        precautions: &["Poor air quality: consider wearing a mask outdoors"],
        indoor: &["museums", "shopping centers"],
        outdoor: &[],
    },
];

fn extend_unique(target: &mut Vec<String>, items: &[&str]) {
    for item in items {
        if !target.iter().any(|existing| existing == item) {
            target.push(item.to_string());
        }
    }
}

/// True when the advice moves daytime activity blocks indoors
#[inline]
pub fn discourages_outdoor(advice: &WeatherAdvice) -> bool {
    advice.unsuitable.iter().any(|a| a == PROLONGED_OUTDOOR)
}

#[derive(Debug, Clone, Default)]
pub struct WeatherAdvisor {
    thresholds: WeatherThresholds,
}

impl WeatherAdvisor {
    pub fn new(thresholds: WeatherThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &WeatherThresholds {
        &self.thresholds
    }

    pub fn advise(&self, forecast: &WeatherForecast) -> WeatherAdvice {
        let mut advice = WeatherAdvice {
            forecast: forecast.clone(),
            suitable: Vec::new(),
            unsuitable: Vec::new(),
            precautions: Vec::new(),
            indoor_options: Vec::new(),
            outdoor_options: Vec::new(),
        };

        let mut fired = Vec::new();
        for rule in RULES {
            if (rule.applies)(forecast, &self.thresholds) {
                extend_unique(&mut advice.suitable, rule.suitable);
                extend_unique(&mut advice.unsuitable, rule.unsuitable);
                extend_unique(&mut advice.precautions, rule.precautions);
                extend_unique(&mut advice.indoor_options, rule.indoor);
                extend_unique(&mut advice.outdoor_options, rule.outdoor);
                fired.push(rule.name);
            }
        }

        if advice.indoor_options.is_empty() {
            extend_unique(&mut advice.indoor_options, INDOOR_BASELINE);
        }
        if advice.outdoor_options.is_empty() && !discourages_outdoor(&advice) {
            extend_unique(&mut advice.outdoor_options, OUTDOOR_BASELINE);
        }

        tracing::debug!(date = %forecast.date, rules = ?fired, "weather advice");

        advice
    }

    /// Advice for `date`, or `None` when the snapshot has no forecast for it
    pub fn advise_for_date(&self, snapshot: &Snapshot, date: NaiveDate) -> Option<WeatherAdvice> {
        snapshot.forecast_for(date).map(|forecast| self.advise(forecast))
    }
}
