use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Attraction, Conditions, District, Hotel, Restaurant, Span, WeatherForecast};

/// Errors that can occur while obtaining a dataset
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Dataset not provided: {0}")]
    Missing(String),
}

/// Source of fully-typed POI and forecast records
///
/// Implementations own file formats and I/O; the store only sees typed data.
pub trait DatasetProvider: Send + Sync {
    fn districts(&self) -> Result<Vec<District>, ProviderError>;
    fn attractions(&self) -> Result<Vec<Attraction>, ProviderError>;
    fn restaurants(&self) -> Result<Vec<Restaurant>, ProviderError>;
    fn hotels(&self) -> Result<Vec<Hotel>, ProviderError>;
    fn forecasts(&self) -> Result<Vec<WeatherForecast>, ProviderError>;
}

/// Provider over records already in memory; a `None` dataset reports `Missing`
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    pub districts: Option<Vec<District>>,
    pub attractions: Option<Vec<Attraction>>,
    pub restaurants: Option<Vec<Restaurant>>,
    pub hotels: Option<Vec<Hotel>>,
    pub forecasts: Option<Vec<WeatherForecast>>,
}

impl InMemoryProvider {
    pub fn new(
        attractions: Vec<Attraction>,
        restaurants: Vec<Restaurant>,
        hotels: Vec<Hotel>,
        forecasts: Vec<WeatherForecast>,
    ) -> Self {
        Self {
            districts: Some(Vec::new()),
            attractions: Some(attractions),
            restaurants: Some(restaurants),
            hotels: Some(hotels),
            forecasts: Some(forecasts),
        }
    }

    pub fn with_districts(mut self, districts: Vec<District>) -> Self {
        self.districts = Some(districts);
        self
    }
}

fn provided<T: Clone>(dataset: &Option<Vec<T>>, name: &str) -> Result<Vec<T>, ProviderError> {
    dataset
        .clone()
        .ok_or_else(|| ProviderError::Missing(name.to_string()))
}

impl DatasetProvider for InMemoryProvider {
    fn districts(&self) -> Result<Vec<District>, ProviderError> {
        provided(&self.districts, "districts")
    }

    fn attractions(&self) -> Result<Vec<Attraction>, ProviderError> {
        provided(&self.attractions, "attractions")
    }

    fn restaurants(&self) -> Result<Vec<Restaurant>, ProviderError> {
        provided(&self.restaurants, "restaurants")
    }

    fn hotels(&self) -> Result<Vec<Hotel>, ProviderError> {
        provided(&self.hotels, "hotels")
    }

    fn forecasts(&self) -> Result<Vec<WeatherForecast>, ProviderError> {
        provided(&self.forecasts, "forecasts")
    }
}

/// Reads `districts.json`, `attractions.json`, `restaurants.json`,
/// `hotels.json` and `weather.json` from one directory
#[derive(Debug, Clone)]
pub struct JsonDirectoryProvider {
    base_path: PathBuf,
}

/// A file holds either a bare array or an object wrapping it under one key
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(
            alias = "districts",
            alias = "attractions",
            alias = "restaurants",
            alias = "hotels",
            alias = "daily_forecasts"
        )]
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { items } => items,
        }
    }
}

/// Forecast as laid out in the weather dataset
#[derive(Deserialize)]
struct DailyForecastRecord {
    date: NaiveDate,
    weather: Conditions,
    temperature: Span,
    wind: WindRecord,
    #[serde(default)]
    precipitation: PrecipitationRecord,
    #[serde(default)]
    air_quality: AirQualityRecord,
}

#[derive(Deserialize)]
struct WindRecord {
    speed: Span,
}

#[derive(Default, Deserialize)]
struct PrecipitationRecord {
    #[serde(default)]
    probability: f64,
    #[serde(default)]
    amount: f64,
}

#[derive(Default, Deserialize)]
struct AirQualityRecord {
    #[serde(default)]
    aqi: u32,
}

impl From<DailyForecastRecord> for WeatherForecast {
    fn from(record: DailyForecastRecord) -> Self {
        Self {
            date: record.date,
            conditions: record.weather,
            temperature: record.temperature,
            wind_speed: record.wind.speed,
            precipitation_probability: record.precipitation.probability,
            precipitation_mm: record.precipitation.amount,
            aqi: record.air_quality.aqi,
        }
    }
}

impl JsonDirectoryProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn read<T: DeserializeOwned>(&self, filename: &str) -> Result<Vec<T>, ProviderError> {
        let path = self.base_path.join(filename);
        let contents = fs::read_to_string(&path).map_err(|source| ProviderError::Io {
            path: path.clone(),
            source,
        })?;

        let listing: Listing<T> = serde_json::from_str(&contents)
            .map_err(|source| ProviderError::Json { path: path.clone(), source })?;

        let items = listing.into_vec();
        tracing::debug!(path = %path.display(), records = items.len(), "dataset file read");
        Ok(items)
    }
}

impl DatasetProvider for JsonDirectoryProvider {
    fn districts(&self) -> Result<Vec<District>, ProviderError> {
        self.read("districts.json")
    }

    fn attractions(&self) -> Result<Vec<Attraction>, ProviderError> {
        self.read("attractions.json")
    }

    fn restaurants(&self) -> Result<Vec<Restaurant>, ProviderError> {
        self.read("restaurants.json")
    }

    fn hotels(&self) -> Result<Vec<Hotel>, ProviderError> {
        self.read("hotels.json")
    }

    fn forecasts(&self) -> Result<Vec<WeatherForecast>, ProviderError> {
        let records: Vec<DailyForecastRecord> = self.read("weather.json")?;
        Ok(records.into_iter().map(WeatherForecast::from).collect())
    }
}
