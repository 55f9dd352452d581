use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::PlanError;
use crate::models::domain::Location;

/// Default number of ranked candidates a scorer returns
pub const DEFAULT_RESULT_LIMIT: usize = 5;

fn default_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_party_size() -> u32 {
    1
}

/// Validation rules for a search center
#[derive(Debug, Clone, Validate)]
pub struct CenterPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<&Location> for CenterPoint {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// Spending limits for a trip.
///
/// `None` means the caller explicitly left that budget unconstrained;
/// a present value must be strictly positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub hotel_per_night: Option<f64>,
    #[serde(default)]
    pub food_per_day: Option<f64>,
    #[serde(default)]
    pub activity_per_day: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
}

impl Budget {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    fn fields(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("budget.hotel_per_night", self.hotel_per_night),
            ("budget.food_per_day", self.food_per_day),
            ("budget.activity_per_day", self.activity_per_day),
            ("budget.total", self.total),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPreferences {
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub hotel: Vec<String>,
}

/// Top-level request for a multi-day plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub start_date: NaiveDate,
    /// Exclusive: a trip from the 1st to the 3rd covers two days
    pub end_date: NaiveDate,
    pub center: Location,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub preferences: TripPreferences,
    #[serde(default = "default_party_size")]
    pub party_size: u32,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl TripRequest {
    /// Number of whole days between start and end
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Check the request, reporting the first violation found.
    ///
    /// Order: date range, center coordinates, budget fields, party size.
    pub fn validate_request(&self) -> Result<(), PlanError> {
        if self.end_date <= self.start_date {
            return Err(PlanError::validation(
                "end_date",
                format!(
                    "end date {} must be after start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }

        validate_center(&self.center)?;
        if self.center.latitude == 0.0 && self.center.longitude == 0.0 {
            return Err(PlanError::validation(
                "center",
                "center coordinates must not be (0, 0)",
            ));
        }

        for (field, value) in self.budget.fields() {
            validate_budget(field, value)?;
        }

        if self.party_size == 0 {
            return Err(PlanError::validation("party_size", "party size must be at least 1"));
        }

        Ok(())
    }
}

pub(crate) fn validate_center(center: &Location) -> Result<(), PlanError> {
    if !center.latitude.is_finite() || !center.longitude.is_finite() {
        return Err(PlanError::validation("center", "coordinates must be finite"));
    }
    CenterPoint::from(center).validate()?;
    Ok(())
}

pub(crate) fn validate_budget(field: &str, value: Option<f64>) -> Result<(), PlanError> {
    match value {
        Some(amount) if !(amount.is_finite() && amount > 0.0) => Err(PlanError::validation(
            field,
            format!("budget must be positive, got {}", amount),
        )),
        _ => Ok(()),
    }
}

pub(crate) fn validate_radius(radius_km: f64) -> Result<(), PlanError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(())
    } else {
        Err(PlanError::validation(
            "radius_km",
            format!("radius must be positive, got {}", radius_km),
        ))
    }
}

/// Meal slot a dining request is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiningSlot {
    Midday,
    Evening,
}

impl DiningSlot {
    pub const ALL: [DiningSlot; 2] = [DiningSlot::Midday, DiningSlot::Evening];

    pub fn label(self) -> &'static str {
        match self {
            DiningSlot::Midday => "lunch",
            DiningSlot::Evening => "dinner",
        }
    }

    pub fn start_time(self) -> &'static str {
        match self {
            DiningSlot::Midday => "12:00",
            DiningSlot::Evening => "18:00",
        }
    }
}

/// Indoor/outdoor restriction for attraction searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivitySetting {
    Outdoor,
    Indoor,
    #[default]
    Any,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HotelRequest {
    pub center: Location,
    pub radius_km: f64,
    #[serde(default)]
    pub budget_per_night: Option<f64>,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[validate(range(min = 1))]
    #[serde(default = "default_party_size")]
    pub guests: u32,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningRequest {
    pub center: Location,
    pub radius_km: f64,
    /// Per person, per meal
    #[serde(default)]
    pub budget_per_person: Option<f64>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[validate(range(min = 1))]
    #[serde(default = "default_party_size")]
    pub party_size: u32,
    pub slot: DiningSlot,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttractionRequest {
    pub center: Location,
    pub radius_km: f64,
    /// Highest acceptable ticket price per person
    #[serde(default)]
    pub budget_per_ticket: Option<f64>,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub setting: ActivitySetting,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: usize,
}
