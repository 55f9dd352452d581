use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::core::filters::{within_price_range, within_radius};
use crate::error::PlanError;
use crate::models::{
    Attraction, District, Hotel, Location, PointOfInterest, Restaurant, WeatherForecast,
};
use crate::services::provider::{DatasetProvider, ProviderError};

/// Immutable result of one successful bulk load
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub districts: Vec<District>,
    pub attractions: Vec<Attraction>,
    pub restaurants: Vec<Restaurant>,
    pub hotels: Vec<Hotel>,
    forecasts: BTreeMap<NaiveDate, WeatherForecast>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new(
        districts: Vec<District>,
        attractions: Vec<Attraction>,
        restaurants: Vec<Restaurant>,
        hotels: Vec<Hotel>,
        forecasts: Vec<WeatherForecast>,
    ) -> Self {
        Self {
            districts,
            attractions,
            restaurants,
            hotels,
            forecasts: forecasts.into_iter().map(|f| (f.date, f)).collect(),
            loaded_at: Some(Utc::now()),
        }
    }

    /// False for the empty snapshot a store starts with
    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn forecast_for(&self, date: NaiveDate) -> Option<&WeatherForecast> {
        self.forecasts.get(&date)
    }

    pub fn district(&self, id: &str) -> Option<&District> {
        self.districts.iter().find(|d| d.id == id)
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            districts: self.districts.len(),
            attractions: self.attractions.len(),
            restaurants: self.restaurants.len(),
            hotels: self.hotels.len(),
            forecasts: self.forecasts.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub districts: usize,
    pub attractions: usize,
    pub restaurants: usize,
    pub hotels: usize,
    pub forecasts: usize,
}

/// POI kinds a snapshot holds a collection of
pub trait Catalogued: PointOfInterest + Sized {
    fn collection(snapshot: &Snapshot) -> &[Self];
}

impl Catalogued for Attraction {
    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.attractions
    }
}

impl Catalogued for Restaurant {
    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.restaurants
    }
}

impl Catalogued for Hotel {
    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.hotels
    }
}

/// In-memory holder of the loaded datasets
///
/// Bulk loads are serialized by `load_lock`; the swap itself takes the write
/// lock only long enough to replace the `Arc`, and queries clone the `Arc`
/// under a read lock and work on that snapshot.
#[derive(Debug, Default)]
pub struct DataStore {
    load_lock: Mutex<()>,
    current: RwLock<Arc<Snapshot>>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with fresh data from `provider`
    ///
    /// All-or-nothing: if any dataset fails the previous snapshot stays in place.
    pub fn load_all(&self, provider: &dyn DatasetProvider) -> Result<StoreCounts, PlanError> {
        let _guard = self.load_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let districts = provider
            .districts()
            .map_err(|e| Self::load_failed("districts", e))?;
        let attractions = provider
            .attractions()
            .map_err(|e| Self::load_failed("attractions", e))?;
        let restaurants = provider
            .restaurants()
            .map_err(|e| Self::load_failed("restaurants", e))?;
        let hotels = provider
            .hotels()
            .map_err(|e| Self::load_failed("hotels", e))?;
        let forecasts = provider
            .forecasts()
            .map_err(|e| Self::load_failed("forecasts", e))?;

        let snapshot = Arc::new(Snapshot::new(
            districts,
            attractions,
            restaurants,
            hotels,
            forecasts,
        ));
        let counts = snapshot.counts();
        let loaded_at = snapshot.loaded_at();

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = snapshot;

        tracing::info!(
            districts = counts.districts,
            attractions = counts.attractions,
            restaurants = counts.restaurants,
            hotels = counts.hotels,
            forecasts = counts.forecasts,
            loaded_at = ?loaded_at,
            "datasets loaded"
        );

        Ok(counts)
    }

    fn load_failed(dataset: &str, source: ProviderError) -> PlanError {
        tracing::error!(dataset, error = %source, "dataset load failed, keeping previous snapshot");
        PlanError::data_unavailable(dataset, source)
    }

    /// Current snapshot; cheap to call, never blocks on a load in progress
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_loaded()
    }

    pub fn counts(&self) -> StoreCounts {
        self.snapshot().counts()
    }

    pub fn by_district<P: Catalogued>(&self, district_id: &str) -> Vec<P> {
        let snapshot = self.snapshot();
        P::collection(&snapshot)
            .iter()
            .filter(|poi| poi.district_id() == district_id)
            .cloned()
            .collect()
    }

    /// Every POI with `distance(center, poi) <= radius_km`
    pub fn within_radius<P: Catalogued>(&self, center: &Location, radius_km: f64) -> Vec<P> {
        let snapshot = self.snapshot();
        within_radius(P::collection(&snapshot), center, radius_km)
            .map(|(poi, _)| poi.clone())
            .collect()
    }

    pub fn by_price_range<P: Catalogued>(&self, min: f64, max: f64) -> Vec<P> {
        let snapshot = self.snapshot();
        P::collection(&snapshot)
            .iter()
            .filter(|poi| within_price_range(*poi, min, max))
            .cloned()
            .collect()
    }

    /// Restaurants whose cuisine is exactly `cuisine`
    pub fn restaurants_by_cuisine(&self, cuisine: &str) -> Vec<Restaurant> {
        self.snapshot()
            .restaurants
            .iter()
            .filter(|r| r.cuisine == cuisine)
            .cloned()
            .collect()
    }

    pub fn district(&self, id: &str) -> Option<District> {
        self.snapshot().district(id).cloned()
    }

    pub fn forecast_for(&self, date: NaiveDate) -> Option<WeatherForecast> {
        self.snapshot().forecast_for(date).cloned()
    }
}
